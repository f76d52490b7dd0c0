use crate::config::AnalysisConfig;
use crate::error::AnalyzerError;
use crate::models::{AnalysisReport, RawTable, Variant};
use crate::service::acos_filter::AcosFilter;
use crate::service::classifier::{self, SelectionPolicy};
use crate::service::variant_matcher::ExclusionSet;
use crate::service::{bucketizer, formatter, metrics, normalizer};
use chrono::Utc;

/// Caller-supplied options for one run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalysisOptions {
    /// Minimum positive order count; the configured default when unset.
    pub threshold: Option<u64>,
    /// Detected from the performance report when unset.
    pub variant: Option<Variant>,
    pub acos_filter: Option<AcosFilter>,
}

/// Both uploaded tables plus options, as handed over by the transport layer.
#[derive(Debug, Clone, Default)]
pub struct AnalysisRequest {
    pub performance: Option<RawTable>,
    pub targets: Option<RawTable>,
    pub options: AnalysisOptions,
}

impl AnalysisRequest {
    pub fn new(performance: RawTable, targets: RawTable) -> Self {
        Self {
            performance: Some(performance),
            targets: Some(targets),
            options: AnalysisOptions::default(),
        }
    }

    pub fn with_options(mut self, options: AnalysisOptions) -> Self {
        self.options = options;
        self
    }
}

/// Search term classification pipeline. Holds configuration only, so one
/// instance serves any number of concurrent requests.
#[derive(Debug, Clone)]
pub struct SearchTermAnalyzer {
    settings: AnalysisConfig,
}

impl SearchTermAnalyzer {
    pub fn new(settings: AnalysisConfig) -> Self {
        Self { settings }
    }

    /// Run the full pipeline. Either every bucket is produced or an error is
    /// returned; there are no partial results.
    pub fn analyze(&self, request: AnalysisRequest) -> Result<AnalysisReport, AnalyzerError> {
        // 1. Both tables must be present before any work starts
        let performance = request
            .performance
            .ok_or(AnalyzerError::MissingInput("search_file"))?;
        let targets = request
            .targets
            .ok_or(AnalyzerError::MissingInput("targeting_file"))?;
        let options = request.options;

        // 2. Resolve the schema once
        let labels = normalizer::normalized_labels(&performance);
        let variant = options.variant.unwrap_or_else(|| Variant::detect(&labels));
        let schema = variant.schema();
        let threshold = options.threshold.unwrap_or(self.settings.default_threshold);

        tracing::info!(
            "Analyzing {} report: {} rows, {} existing targets, threshold {}",
            variant,
            performance.len(),
            targets.len(),
            threshold
        );

        // 3. Normalize
        let (columns, mut records) =
            normalizer::normalize_performance(&performance, &labels, schema)?;
        let mut existing = normalizer::normalize_targets(&targets, schema)?;

        // 4. Derived metric
        metrics::annotate_acos(&mut records);

        // 5. Exclusion of already-targeted keys
        let exclusions = ExclusionSet::build(&mut existing, schema.matching);
        tracing::debug!(
            "{} distinct existing targets ({:?})",
            exclusions.len(),
            exclusions.strategy()
        );

        // 6. Classify and truncate
        let policy = SelectionPolicy::for_schema(
            schema,
            threshold,
            self.settings.positive_top_percent,
            self.settings.negative_top_percent,
        );
        let mut classification = classifier::classify(records, &exclusions, &policy);

        if let Some(filter) = options.acos_filter {
            let before = classification.positive.len();
            filter.retain(&mut classification.positive);
            tracing::debug!(
                "ACOS filter {:?} kept {}/{} positives",
                filter,
                classification.positive.len(),
                before
            );
        }

        // 7. Split by catalog prefix and render
        let positive = bucketizer::split_by_prefix(classification.positive, |r| r.key.as_str());
        let negative = bucketizer::split_by_prefix(classification.negative, |r| r.key.as_str());

        let stats = classification.stats;
        tracing::info!(
            "Analysis done: positive {}/{} (b0: {}), negative {}/{} (b0: {}), excluded {}",
            stats.positive_kept,
            stats.positive_candidates,
            positive.only_b0.len(),
            stats.negative_kept,
            stats.negative_candidates,
            negative.only_b0.len(),
            stats.excluded_rows
        );

        Ok(AnalysisReport {
            variant,
            generated_at: Utc::now(),
            stats,
            positive: formatter::format_buckets(positive, schema, &columns),
            negative: formatter::format_buckets(negative, schema, &columns),
        })
    }
}
