use crate::models::{ClassificationStats, PerformanceRecord, Schema};
use crate::service::variant_matcher::ExclusionSet;

/// Selection thresholds for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionPolicy {
    /// Minimum orders for a positive; never below 1.
    pub threshold: u64,
    /// Share of positives kept, in percent. `None` keeps all of them.
    pub positive_percent: Option<u32>,
    /// Share of negatives kept, in percent.
    pub negative_percent: Option<u32>,
}

impl SelectionPolicy {
    pub fn new(threshold: u64, positive_percent: Option<u32>, negative_percent: Option<u32>) -> Self {
        if threshold == 0 {
            tracing::debug!("order threshold 0 raised to 1 to keep positives and negatives apart");
        }
        Self {
            threshold: threshold.max(1),
            positive_percent,
            negative_percent,
        }
    }

    pub fn for_schema(schema: &Schema, threshold: u64, positive_percent: u32, negative_percent: u32) -> Self {
        let positive = schema.truncate_positives.then_some(positive_percent);
        Self::new(threshold, positive, Some(negative_percent))
    }
}

/// Rows kept out of `candidates` when keeping the top `percent`:
/// `ceil(percent/100 * candidates)`, at least one, never more than exist.
pub fn retained_count(candidates: usize, percent: u32) -> usize {
    if candidates == 0 {
        return 0;
    }
    let scaled = candidates * percent as usize;
    scaled.div_ceil(100).clamp(1, candidates)
}

#[derive(Debug, Clone, Default)]
pub struct Classification {
    /// Sorted by sales descending.
    pub positive: Vec<PerformanceRecord>,
    /// Sorted by spend descending.
    pub negative: Vec<PerformanceRecord>,
    pub stats: ClassificationStats,
}

/// Select positive and negative candidates that are not already targeted.
pub fn classify(
    records: Vec<PerformanceRecord>,
    exclusions: &ExclusionSet,
    policy: &SelectionPolicy,
) -> Classification {
    let mut stats = ClassificationStats {
        total_rows: records.len(),
        ..Default::default()
    };
    let mut positive = Vec::new();
    let mut negative = Vec::new();

    for record in records {
        if exclusions.excludes(&record.key) {
            stats.excluded_rows += 1;
            continue;
        }
        if record.orders >= policy.threshold {
            positive.push(record);
        } else if record.orders == 0 {
            negative.push(record);
        }
    }

    // sort_by is stable: equal keys keep report order
    positive.sort_by(|a, b| b.sales.total_cmp(&a.sales));
    negative.sort_by(|a, b| b.spend.total_cmp(&a.spend));

    stats.positive_candidates = positive.len();
    stats.negative_candidates = negative.len();

    if let Some(percent) = policy.positive_percent {
        positive.truncate(retained_count(positive.len(), percent));
    }
    if let Some(percent) = policy.negative_percent {
        negative.truncate(retained_count(negative.len(), percent));
    }

    stats.positive_kept = positive.len();
    stats.negative_kept = negative.len();

    Classification {
        positive,
        negative,
        stats,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExistingTarget, MatchStrategy, Variant};

    fn record(row: usize, key: &str, orders: u64, sales: f64, spend: f64) -> PerformanceRecord {
        let mut r = PerformanceRecord::new(row, key);
        r.orders = orders;
        r.sales = sales;
        r.spend = spend;
        r
    }

    fn exclusions(values: &[&str]) -> ExclusionSet {
        let mut targets: Vec<ExistingTarget> = values
            .iter()
            .map(|v| ExistingTarget {
                value: Some(v.to_string()),
                expression: Some(v.to_string()),
                identifier: None,
            })
            .collect();
        ExclusionSet::build(&mut targets, MatchStrategy::ExactTerm)
    }

    fn keys(records: &[PerformanceRecord]) -> Vec<&str> {
        records.iter().map(|r| r.key.as_str()).collect()
    }

    #[test]
    fn retained_count_uses_ceiling_with_floor_of_one() {
        assert_eq!(retained_count(0, 40), 0);
        assert_eq!(retained_count(1, 40), 1);
        assert_eq!(retained_count(5, 40), 2);
        assert_eq!(retained_count(15, 40), 6);
        assert_eq!(retained_count(3, 20), 1);
        assert_eq!(retained_count(6, 20), 2);
        assert_eq!(retained_count(10, 20), 2);
        assert_eq!(retained_count(4, 0), 1);
        assert_eq!(retained_count(4, 100), 4);
    }

    #[test]
    fn keeps_top_forty_percent_of_positives_by_sales() {
        let mut records = vec![
            record(0, "a", 1, 10.0, 1.0),
            record(1, "b", 2, 50.0, 1.0),
            record(2, "c", 1, 30.0, 1.0),
            record(3, "d", 3, 40.0, 1.0),
            record(4, "e", 1, 20.0, 1.0),
        ];
        for i in 5..10 {
            records.push(record(i, "known", 4, 99.0, 1.0));
        }
        let policy = SelectionPolicy::new(1, Some(40), Some(20));
        let result = classify(records, &exclusions(&["known"]), &policy);

        assert_eq!(keys(&result.positive), ["b", "d"]);
        assert_eq!(result.stats.positive_candidates, 5);
        assert_eq!(result.stats.excluded_rows, 5);
    }

    #[test]
    fn keeps_top_twenty_percent_of_negatives_by_spend() {
        let records = vec![
            record(0, "x", 0, 0.0, 4.0),
            record(1, "y", 0, 0.0, 9.0),
            record(2, "z", 0, 0.0, 2.0),
        ];
        let policy = SelectionPolicy::new(1, Some(40), Some(20));
        let result = classify(records, &exclusions(&[]), &policy);

        assert_eq!(keys(&result.negative), ["y"]);
        assert_eq!(result.stats.negative_candidates, 3);
        assert_eq!(result.stats.negative_kept, 1);
    }

    #[test]
    fn rows_between_zero_and_threshold_are_neither() {
        let records = vec![record(0, "one", 1, 5.0, 1.0), record(1, "three", 3, 5.0, 1.0)];
        let policy = SelectionPolicy::new(2, None, None);
        let result = classify(records, &exclusions(&[]), &policy);

        assert_eq!(keys(&result.positive), ["three"]);
        assert!(result.negative.is_empty());
    }

    #[test]
    fn ties_keep_report_order() {
        let records = vec![
            record(0, "first", 0, 0.0, 5.0),
            record(1, "second", 0, 0.0, 5.0),
            record(2, "third", 0, 0.0, 5.0),
        ];
        let policy = SelectionPolicy::new(1, None, None);
        let result = classify(records, &exclusions(&[]), &policy);
        assert_eq!(keys(&result.negative), ["first", "second", "third"]);
    }

    #[test]
    fn empty_candidates_stay_empty() {
        let policy = SelectionPolicy::new(1, Some(40), Some(20));
        let result = classify(Vec::new(), &exclusions(&[]), &policy);
        assert!(result.positive.is_empty());
        assert!(result.negative.is_empty());
        assert_eq!(result.stats, ClassificationStats::default());
    }

    #[test]
    fn zero_threshold_is_raised_to_one() {
        let policy = SelectionPolicy::new(0, None, None);
        assert_eq!(policy.threshold, 1);

        let records = vec![record(0, "none", 0, 0.0, 1.0)];
        let result = classify(records, &exclusions(&[]), &policy);
        assert!(result.positive.is_empty());
        assert_eq!(result.negative.len(), 1);
    }

    #[test]
    fn lowering_threshold_never_shrinks_positive_candidates() {
        let records: Vec<_> = (0..12)
            .map(|i| record(i, &format!("t{i}"), i as u64 % 5, i as f64, 1.0))
            .collect();
        let mut previous: Option<Classification> = None;

        for threshold in (1..=5).rev() {
            let result = classify(
                records.clone(),
                &exclusions(&[]),
                &SelectionPolicy::new(threshold, None, Some(20)),
            );
            if let Some(stricter) = &previous {
                assert!(result.stats.positive_candidates >= stricter.stats.positive_candidates);
                for kept in &stricter.positive {
                    assert!(result.positive.iter().any(|r| r.row == kept.row));
                }
            }
            previous = Some(result);
        }
    }

    #[test]
    fn truncated_positives_are_not_monotonic_in_threshold() {
        let records = vec![
            record(0, "a", 3, 10.0, 1.0),
            record(1, "b", 1, 50.0, 1.0),
            record(2, "c", 1, 40.0, 1.0),
        ];
        let strict = classify(records.clone(), &exclusions(&[]), &SelectionPolicy::new(3, Some(40), Some(20)));
        let loose = classify(records, &exclusions(&[]), &SelectionPolicy::new(1, Some(40), Some(20)));

        assert_eq!(keys(&strict.positive), ["a"]);
        assert_eq!(loose.stats.positive_candidates, 3);
        // ceil(0.4 * 3) = 2 higher-sales rows push "a" out
        assert_eq!(keys(&loose.positive), ["b", "c"]);
    }

    #[test]
    fn display_schema_keeps_every_positive() {
        let policy = SelectionPolicy::for_schema(Variant::Display.schema(), 1, 40, 20);
        assert_eq!(policy.positive_percent, None);
        assert_eq!(policy.negative_percent, Some(20));

        let products = SelectionPolicy::for_schema(Variant::Products.schema(), 1, 40, 20);
        assert_eq!(products.positive_percent, Some(40));
    }
}
