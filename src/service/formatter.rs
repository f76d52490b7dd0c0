use crate::models::{
    Buckets, ColumnMap, Field, FormattedRecord, PerformanceRecord, Schema, ACOS_LABEL,
};
use serde_json::{Number, Value};

fn text(value: &Option<String>) -> Value {
    match value {
        Some(s) => Value::String(s.clone()),
        None => Value::Null,
    }
}

/// Whole-currency amount, halves to even.
fn amount(value: f64) -> Value {
    Value::from(value.round_ties_even() as i64)
}

/// Render one record in the schema's output shape. `catalog_bucket` upper-
/// cases the key; classification already ran on the lower-cased form.
/// Fields whose column was absent from the upload render as null.
pub fn format_record(
    record: &PerformanceRecord,
    schema: &Schema,
    columns: &ColumnMap,
    catalog_bucket: bool,
) -> FormattedRecord {
    let mut out = FormattedRecord::default();

    for spec in schema.fields {
        let value = match spec.field {
            _ if !columns.provides(spec.field) => Value::Null,
            Field::Key if catalog_bucket => Value::String(record.key.to_uppercase()),
            Field::Key => Value::String(record.key.clone()),
            Field::Campaign => text(&record.campaign),
            Field::AdGroup => text(&record.ad_group),
            Field::MatchType => text(&record.match_type),
            Field::Orders => Value::from(record.orders),
            Field::Impressions => Value::from(record.impressions),
            Field::Clicks => Value::from(record.clicks),
            Field::Sales => amount(record.sales),
            Field::Spend => amount(record.spend),
        };
        out.insert(spec.label, value);
    }

    let acos = record
        .acos
        .and_then(Number::from_f64)
        .map(Value::Number)
        .unwrap_or(Value::Null);
    out.insert(ACOS_LABEL, acos);

    out
}

pub fn format_buckets(
    buckets: Buckets<PerformanceRecord>,
    schema: &Schema,
    columns: &ColumnMap,
) -> Buckets<FormattedRecord> {
    buckets.map(|record, catalog_bucket| format_record(&record, schema, columns, catalog_bucket))
}
