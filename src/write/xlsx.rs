use anyhow::{bail, Context, Result};
use rust_xlsxwriter::{ColNum, ExcelDateTime, Format, RowNum, Workbook};
use std::path::Path;

use crate::table::Table;

/// Rows per worksheet, header included.
pub const MAX_SHEET_ROWS: usize = 1_048_576;

/// Columns per worksheet, index included.
pub const MAX_SHEET_COLS: usize = 16_384;

pub const SHEET_NAME: &str = "Sheet1";

const DATETIME_FORMAT: &str = "yyyy-mm-dd hh:mm:ss";

/// One worksheet: header row, index as datetimes in column A, readings after it.
pub fn write_xlsx(path: &Path, table: &Table) -> Result<()> {
    let rows = table.num_rows() + 1;
    let cols = table.num_value_columns() + 1;
    if rows > MAX_SHEET_ROWS || cols > MAX_SHEET_COLS {
        bail!(
            "{} x {} table does not fit in a worksheet (max {} x {})",
            rows,
            cols,
            MAX_SHEET_ROWS,
            MAX_SHEET_COLS
        );
    }

    let header = Format::new().set_bold();
    let datetime = Format::new().set_num_format(DATETIME_FORMAT);

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    sheet.write_string_with_format(0, 0, table.index_name(), &header)?;
    for (c, name) in table.value_column_names().into_iter().enumerate() {
        sheet.write_string_with_format(0, (c + 1) as ColNum, name, &header)?;
    }

    for (r, ts) in table.index()?.iter().enumerate() {
        let when = ExcelDateTime::from_timestamp(ts.and_utc().timestamp())
            .with_context(|| format!("converting {} to an Excel datetime", ts))?;
        sheet.write_datetime_with_format((r + 1) as RowNum, 0, &when, &datetime)?;
    }

    for c in 0..table.num_value_columns() {
        let Some(values) = table.values(c) else {
            continue;
        };
        for (r, v) in values.values().iter().enumerate() {
            sheet.write_number((r + 1) as RowNum, (c + 1) as ColNum, *v)?;
        }
    }
    sheet.set_column_width(0, 20)?;

    workbook
        .save(path)
        .with_context(|| format!("saving workbook {}", path.display()))?;
    Ok(())
}
