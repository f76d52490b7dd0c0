pub mod record;
pub mod report;
pub mod schema;
pub mod table;

pub use record::{ExistingTarget, PerformanceRecord};
pub use report::{AnalysisReport, Buckets, ClassificationStats, FormattedRecord};
pub use schema::{ColumnMap, Field, FieldSpec, MatchStrategy, Schema, Variant, ACOS_LABEL};
pub use table::RawTable;
