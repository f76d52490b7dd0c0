pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod service;

pub use config::{AnalysisConfig, AppConfig};
pub use error::AnalyzerError;
pub use models::{AnalysisReport, RawTable, Variant};
pub use service::{AcosFilter, AnalysisOptions, AnalysisRequest, SearchTermAnalyzer};
