// src/table/batch.rs

use anyhow::Result;
use arrow::{
    array::{ArrayRef, Float64Array, TimestampMillisecondArray},
    datatypes::{DataType, Field, Schema, TimeUnit},
    record_batch::RecordBatch,
};
use chrono::NaiveDateTime;
use std::sync::Arc;

/// Arrow type of the index column: naive (zone-less) milliseconds.
pub fn index_type() -> DataType {
    DataType::Timestamp(TimeUnit::Millisecond, None)
}

/// Index column first, then one non-nullable `Float64` per value column.
pub fn build_schema(index_name: &str, value_names: &[String]) -> Arc<Schema> {
    let mut fields = Vec::with_capacity(value_names.len() + 1);
    fields.push(Field::new(index_name, index_type(), false));
    fields.extend(
        value_names
            .iter()
            .map(|name| Field::new(name, DataType::Float64, false)),
    );
    Arc::new(Schema::new(fields))
}

/// Assemble the batch from an index and its value columns.
pub fn build_batch(
    index_name: &str,
    index: &[NaiveDateTime],
    value_names: &[String],
    columns: Vec<Vec<f64>>,
) -> Result<RecordBatch> {
    let schema = build_schema(index_name, value_names);

    let millis: Vec<i64> = index
        .iter()
        .map(|t| t.and_utc().timestamp_millis())
        .collect();
    let mut arrays: Vec<ArrayRef> = Vec::with_capacity(columns.len() + 1);
    arrays.push(Arc::new(TimestampMillisecondArray::from(millis)));
    arrays.extend(
        columns
            .into_iter()
            .map(|col| Arc::new(Float64Array::from(col)) as ArrayRef),
    );

    RecordBatch::try_new(schema, arrays).map_err(Into::into)
}
