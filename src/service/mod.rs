pub mod acos_filter;
pub mod analyzer;
pub mod bucketizer;
pub mod classifier;
pub mod export;
pub mod formatter;
pub mod metrics;
pub mod normalizer;
pub mod variant_matcher;

pub use acos_filter::AcosFilter;
pub use analyzer::{AnalysisOptions, AnalysisRequest, SearchTermAnalyzer};
pub use classifier::{Classification, SelectionPolicy};
pub use variant_matcher::ExclusionSet;
