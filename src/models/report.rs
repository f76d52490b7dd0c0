use crate::models::Variant;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

/// Output record with a fixed, ordered field set per variant.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FormattedRecord(IndexMap<&'static str, Value>);

impl FormattedRecord {
    pub fn insert(&mut self, label: &'static str, value: Value) {
        self.0.insert(label, value);
    }

    pub fn get(&self, label: &str) -> Option<&Value> {
        self.0.get(label)
    }

    pub fn labels(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.keys().copied()
    }

    /// Cell text for tabular export; nulls become empty cells.
    pub fn cells(&self) -> Vec<String> {
        self.0
            .values()
            .map(|value| match value {
                Value::Null => String::new(),
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect()
    }
}

/// A classified set split by the catalog-identifier prefix.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Buckets<T> {
    pub no_b0: Vec<T>,
    pub only_b0: Vec<T>,
}

impl<T> Buckets<T> {
    pub fn len(&self) -> usize {
        self.no_b0.len() + self.only_b0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.no_b0.is_empty() && self.only_b0.is_empty()
    }

    pub fn map<U>(self, mut f: impl FnMut(T, bool) -> U) -> Buckets<U> {
        Buckets {
            no_b0: self.no_b0.into_iter().map(|item| f(item, false)).collect(),
            only_b0: self.only_b0.into_iter().map(|item| f(item, true)).collect(),
        }
    }
}

impl<T> Default for Buckets<T> {
    fn default() -> Self {
        Self {
            no_b0: Vec::new(),
            only_b0: Vec::new(),
        }
    }
}

/// Per-run counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClassificationStats {
    pub total_rows: usize,
    pub excluded_rows: usize,
    pub positive_candidates: usize,
    pub positive_kept: usize,
    pub negative_candidates: usize,
    pub negative_kept: usize,
}

/// Final result of one analysis request.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub variant: Variant,
    pub generated_at: DateTime<Utc>,
    pub stats: ClassificationStats,
    pub positive: Buckets<FormattedRecord>,
    pub negative: Buckets<FormattedRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_fields_in_insertion_order() {
        let mut record = FormattedRecord::default();
        record.insert("spend", json!(3));
        record.insert("customer search term", json!("shoes"));
        record.insert("acos", Value::Null);

        let text = serde_json::to_string(&record).unwrap();
        assert_eq!(text, r#"{"spend":3,"customer search term":"shoes","acos":null}"#);
        assert_eq!(record.cells(), ["3", "shoes", ""]);
    }

    #[test]
    fn buckets_map_reports_prefix_side() {
        let buckets = Buckets {
            no_b0: vec![1, 2],
            only_b0: vec![3],
        };
        let mapped = buckets.map(|n, b0| (n, b0));
        assert_eq!(mapped.no_b0, [(1, false), (2, false)]);
        assert_eq!(mapped.only_b0, [(3, true)]);
        assert_eq!(mapped.len(), 3);
    }
}
