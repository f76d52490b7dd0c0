use crate::error::AnalyzerError;
use crate::models::PerformanceRecord;

/// Optional ACOS constraint applied to the positive buckets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AcosFilter {
    Greater(f64),
    Less(f64),
    Equal(f64),
}

impl AcosFilter {
    /// Parse the `acos_filter` / `acos_value` form pair. `none` or a blank
    /// kind means no filter.
    pub fn parse(kind: Option<&str>, value: Option<&str>) -> Result<Option<Self>, AnalyzerError> {
        let kind = kind.map(|k| k.trim().to_ascii_lowercase()).unwrap_or_default();
        if kind.is_empty() || kind == "none" {
            return Ok(None);
        }

        let raw = value.unwrap_or_default();
        let threshold = raw
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| AnalyzerError::InvalidOption {
                name: "acos_value",
                value: raw.to_string(),
            })?;

        match kind.as_str() {
            "greater" => Ok(Some(AcosFilter::Greater(threshold))),
            "less" => Ok(Some(AcosFilter::Less(threshold))),
            "equal" => Ok(Some(AcosFilter::Equal(threshold))),
            _ => Err(AnalyzerError::InvalidOption {
                name: "acos_filter",
                value: kind,
            }),
        }
    }

    /// Records without ACOS never pass an active filter.
    pub fn accepts(&self, acos: Option<f64>) -> bool {
        let Some(acos) = acos else {
            return false;
        };
        match *self {
            AcosFilter::Greater(v) => acos > v,
            AcosFilter::Less(v) => acos < v,
            AcosFilter::Equal(v) => acos == v,
        }
    }

    pub fn retain(&self, records: &mut Vec<PerformanceRecord>) {
        records.retain(|r| self.accepts(r.acos));
    }
}
