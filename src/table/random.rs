use rand::distributions::{Distribution, Uniform};
use rand::Rng;

/// Exclusive upper bound of a reading, in hundredths.
const CENTS_MAX: u32 = 100 * 100;

/// Uniform readings in `[0, 100)` with two decimals.
///
/// Sampled as whole hundredths so rounding can never push a value up to 100.
pub struct Readings {
    cents: Uniform<u32>,
}

impl Readings {
    pub fn new() -> Self {
        Self {
            cents: Uniform::new(0, CENTS_MAX),
        }
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        f64::from(self.cents.sample(rng)) / 100.0
    }

    /// Draw `n` readings in order.
    pub fn take<R: Rng + ?Sized>(&self, rng: &mut R, n: usize) -> Vec<f64> {
        (0..n).map(|_| self.sample(rng)).collect()
    }
}

impl Default for Readings {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn readings_stay_in_range_with_two_decimals() {
        let mut rng = StdRng::seed_from_u64(7);
        let readings = Readings::new();
        for v in readings.take(&mut rng, 50_000) {
            assert!((0.0..100.0).contains(&v), "{} out of range", v);
            let scaled = v * 100.0;
            assert!((scaled - scaled.round()).abs() < 1e-6, "{} has >2 decimals", v);
        }
    }

    #[test]
    fn same_seed_same_readings() {
        let readings = Readings::new();
        let a = readings.take(&mut StdRng::seed_from_u64(42), 100);
        let b = readings.take(&mut StdRng::seed_from_u64(42), 100);
        let c = readings.take(&mut StdRng::seed_from_u64(43), 100);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
