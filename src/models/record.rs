/// One normalized row of a performance report.
#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceRecord {
    /// Zero-based row position in the uploaded report.
    pub row: usize,
    /// Search term or matched target, trimmed and lower-cased.
    pub key: String,
    pub campaign: Option<String>,
    pub ad_group: Option<String>,
    pub match_type: Option<String>,
    pub orders: u64,
    pub sales: f64,
    pub spend: f64,
    pub impressions: u64,
    pub clicks: u64,
    /// Present iff sales > 0.
    pub acos: Option<f64>,
}

impl PerformanceRecord {
    pub fn new(row: usize, key: impl Into<String>) -> Self {
        Self {
            row,
            key: key.into(),
            campaign: None,
            ad_group: None,
            match_type: None,
            orders: 0,
            sales: 0.0,
            spend: 0.0,
            impressions: 0,
            clicks: 0,
            acos: None,
        }
    }
}

/// One row of the existing-targets report.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExistingTarget {
    /// Trimmed, lower-cased targeting value; `None` for blank cells.
    pub value: Option<String>,
    /// Trimmed expression with its original casing.
    pub expression: Option<String>,
    /// ASIN extracted from the expression (display reports only).
    pub identifier: Option<String>,
}
