use crate::error::AnalyzerError;
use crate::models::{
    ColumnMap, ExistingTarget, Field, FieldSpec, PerformanceRecord, RawTable, Schema,
};
use rayon::prelude::*;

pub const PERFORMANCE_TABLE: &str = "performance report";
pub const TARGETS_TABLE: &str = "existing-targets report";

pub fn normalize_label(label: &str) -> String {
    label.trim().to_lowercase()
}

pub fn normalized_labels(table: &RawTable) -> Vec<String> {
    table.headers().iter().map(|h| normalize_label(h)).collect()
}

/// Trimmed, lower-cased key. Blank cells and spreadsheet `nan` are absent.
pub fn normalize_key(value: Option<&str>) -> Option<String> {
    let value = value?.trim().to_lowercase();
    if value.is_empty() || value == "nan" {
        None
    } else {
        Some(value)
    }
}

/// Trimmed display text with its casing kept.
pub fn normalize_text(value: Option<&str>) -> Option<String> {
    let value = value?.trim();
    if value.is_empty() || value.eq_ignore_ascii_case("nan") {
        None
    } else {
        Some(value.to_string())
    }
}

/// Non-numeric, non-finite, missing and negative cells all coerce to zero.
pub fn coerce_amount(value: Option<&str>) -> f64 {
    value
        .and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite() && *v > 0.0)
        .unwrap_or(0.0)
}

/// Counts follow the amount rules, then drop any fractional part.
pub fn coerce_count(value: Option<&str>) -> u64 {
    coerce_amount(value).trunc() as u64
}

/// Column of the first label equal to `spec.label`, else of the first label
/// equal to one of its aliases, in alias order.
pub fn find_column(labels: &[String], spec: &FieldSpec) -> Option<usize> {
    labels.iter().position(|l| l == spec.label).or_else(|| {
        spec.aliases
            .iter()
            .find_map(|alias| labels.iter().position(|l| l == alias))
    })
}

/// Map each schema field to its column. Exact labels win over aliases.
pub fn resolve_columns(
    labels: &[String],
    schema: &Schema,
    table: &'static str,
) -> Result<ColumnMap, AnalyzerError> {
    let mut columns = ColumnMap::default();

    for spec in schema.fields {
        match find_column(labels, spec) {
            Some(column) => columns.insert(spec.field, column),
            None if spec.required => {
                return Err(AnalyzerError::Schema {
                    table,
                    column: spec.label.to_string(),
                })
            }
            None => tracing::debug!("{} has no '{}' column", table, spec.label),
        }
    }

    Ok(columns)
}

/// Coerce every performance row against the schema. Row order is kept.
pub fn normalize_performance(
    table: &RawTable,
    labels: &[String],
    schema: &Schema,
) -> Result<(ColumnMap, Vec<PerformanceRecord>), AnalyzerError> {
    let columns = resolve_columns(labels, schema, PERFORMANCE_TABLE)?;

    let records: Vec<PerformanceRecord> = (0..table.len())
        .into_par_iter()
        .map(|row| normalize_row(table, row, schema, &columns))
        .collect();

    tracing::debug!(
        "normalized {} rows of the {} ({})",
        records.len(),
        PERFORMANCE_TABLE,
        schema.variant
    );

    Ok((columns, records))
}

fn normalize_row(
    table: &RawTable,
    row: usize,
    schema: &Schema,
    columns: &ColumnMap,
) -> PerformanceRecord {
    let cell = |field: Field| columns.column(field).and_then(|c| table.cell(row, c));
    let mut record = PerformanceRecord::new(row, "");

    for spec in schema.fields {
        let value = cell(spec.field);
        match spec.field {
            Field::Key => record.key = normalize_key(value).unwrap_or_default(),
            Field::Campaign => record.campaign = normalize_text(value),
            Field::AdGroup => record.ad_group = normalize_text(value),
            Field::MatchType => record.match_type = normalize_text(value),
            Field::Orders => record.orders = coerce_count(value),
            Field::Impressions => record.impressions = coerce_count(value),
            Field::Clicks => record.clicks = coerce_count(value),
            Field::Sales => record.sales = coerce_amount(value),
            Field::Spend => record.spend = coerce_amount(value),
        }
    }

    record
}

/// Read the targeting column of the existing-targets report.
pub fn normalize_targets(
    table: &RawTable,
    schema: &Schema,
) -> Result<Vec<ExistingTarget>, AnalyzerError> {
    let labels = normalized_labels(table);
    let column = find_column(&labels, &schema.target).ok_or_else(|| AnalyzerError::Schema {
            table: TARGETS_TABLE,
            column: schema.target.label.to_string(),
        })?;

    let targets = (0..table.len())
        .map(|row| {
            let raw = table.cell(row, column);
            ExistingTarget {
                value: normalize_key(raw),
                expression: normalize_text(raw),
                identifier: None,
            }
        })
        .collect();

    Ok(targets)
}
