use crate::api::upload;
use crate::error::AnalyzerError;
use crate::models::AnalysisReport;
use crate::service::{export, SearchTermAnalyzer};
use axum::{
    extract::{Multipart, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::sync::Arc;

/// Error body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for AnalyzerError {
    fn into_response(self) -> Response {
        let status = if self.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        tracing::warn!("Request rejected ({}): {}", status, self);
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Health check
pub async fn health_check() -> &'static str {
    "Backend running"
}

/// Parse the upload and run the pipeline off the async workers.
async fn run_analysis(
    analyzer: Arc<SearchTermAnalyzer>,
    multipart: Multipart,
) -> Result<AnalysisReport, AnalyzerError> {
    let request = upload::read_request(multipart).await?;
    tokio::task::spawn_blocking(move || analyzer.analyze(request))
        .await
        .map_err(|e| AnalyzerError::Internal(e.to_string()))?
}

/// Classified buckets as JSON
pub async fn process(
    State(analyzer): State<Arc<SearchTermAnalyzer>>,
    multipart: Multipart,
) -> Response {
    match run_analysis(analyzer, multipart).await {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Classified buckets as a sectioned CSV attachment
pub async fn download(
    State(analyzer): State<Arc<SearchTermAnalyzer>>,
    multipart: Multipart,
) -> Response {
    let report = match run_analysis(analyzer, multipart).await {
        Ok(report) => report,
        Err(e) => return e.into_response(),
    };

    match export::export_to_csv(&report) {
        Ok(body) => {
            let disposition = format!("attachment; filename=\"{}\"", export::file_name(&report));
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                body,
            )
                .into_response()
        }
        Err(e) => AnalyzerError::Internal(e.to_string()).into_response(),
    }
}
