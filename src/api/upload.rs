use crate::error::AnalyzerError;
use crate::models::{RawTable, Variant};
use crate::service::{AcosFilter, AnalysisRequest};
use axum::extract::multipart::{Multipart, MultipartError};

fn upload_error(e: MultipartError) -> AnalyzerError {
    AnalyzerError::Upload(e.to_string())
}

/// Parse the `positive_order_threshold` form value. Blank means default.
pub fn parse_threshold(text: &str) -> Result<Option<u64>, AnalyzerError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    text.parse::<u64>()
        .map(Some)
        .map_err(|_| AnalyzerError::InvalidOption {
            name: "positive_order_threshold",
            value: text.to_string(),
        })
}

/// Parse the `product_type` form value. Blank means auto-detect.
pub fn parse_variant(text: &str) -> Result<Option<Variant>, AnalyzerError> {
    if text.trim().is_empty() {
        Ok(None)
    } else {
        text.parse().map(Some)
    }
}

/// Read a multipart upload into an analysis request. Empty file parts count
/// as not supplied.
pub async fn read_request(mut multipart: Multipart) -> Result<AnalysisRequest, AnalyzerError> {
    let mut request = AnalysisRequest::default();
    let mut acos_kind: Option<String> = None;
    let mut acos_value: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(upload_error)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "search_file" | "targeting_file" => {
                let bytes = field.bytes().await.map_err(upload_error)?;
                if bytes.is_empty() {
                    continue;
                }
                let table = RawTable::from_csv_reader(bytes.as_ref())?;
                tracing::debug!("{}: {} rows", name, table.len());
                if name == "search_file" {
                    request.performance = Some(table);
                } else {
                    request.targets = Some(table);
                }
            }
            "positive_order_threshold" => {
                let text = field.text().await.map_err(upload_error)?;
                request.options.threshold = parse_threshold(&text)?;
            }
            "product_type" => {
                let text = field.text().await.map_err(upload_error)?;
                request.options.variant = parse_variant(&text)?;
            }
            "acos_filter" => acos_kind = Some(field.text().await.map_err(upload_error)?),
            "acos_value" => acos_value = Some(field.text().await.map_err(upload_error)?),
            other => tracing::debug!("ignoring upload field '{}'", other),
        }
    }

    request.options.acos_filter = AcosFilter::parse(acos_kind.as_deref(), acos_value.as_deref())?;
    Ok(request)
}
