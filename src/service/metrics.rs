use crate::models::PerformanceRecord;

/// Round to two decimals, halves to even.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// Advertising cost of sale as a percentage; absent without sales.
pub fn acos(spend: f64, sales: f64) -> Option<f64> {
    if sales > 0.0 {
        Some(round2(spend / sales * 100.0))
    } else {
        None
    }
}

pub fn annotate_acos(records: &mut [PerformanceRecord]) {
    for record in records.iter_mut() {
        record.acos = acos(record.spend, record.sales);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acos_is_spend_over_sales_percent() {
        assert_eq!(acos(10.0, 40.0), Some(25.0));
        assert_eq!(acos(1.0, 3.0), Some(33.33));
        assert_eq!(acos(2.0, 3.0), Some(66.67));
        assert_eq!(acos(0.0, 12.0), Some(0.0));
    }

    #[test]
    fn acos_absent_without_sales() {
        assert_eq!(acos(10.0, 0.0), None);
        assert_eq!(acos(0.0, 0.0), None);
    }

    #[test]
    fn halves_round_to_even() {
        assert_eq!(round2(0.125), 0.12);
        assert_eq!(round2(0.375), 0.38);
        assert_eq!(round2(1.0 / 3.0), 0.33);
        assert_eq!(round2(2.5), 2.5);
    }

    #[test]
    fn annotates_every_record() {
        let mut with_sales = PerformanceRecord::new(0, "a");
        with_sales.sales = 50.0;
        with_sales.spend = 5.0;
        let mut without_sales = PerformanceRecord::new(1, "b");
        without_sales.spend = 10.0;

        let mut records = vec![with_sales, without_sales];
        annotate_acos(&mut records);
        assert_eq!(records[0].acos, Some(10.0));
        assert_eq!(records[1].acos, None);
    }
}
