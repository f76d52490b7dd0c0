use crate::error::AnalyzerError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Label of the derived ACOS column, appended after the schema fields.
pub const ACOS_LABEL: &str = "acos";

/// Advertising product type; selects the column schema and matching strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    Products,
    Brands,
    Display,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Products => "products",
            Variant::Brands => "brands",
            Variant::Display => "display",
        }
    }

    pub fn schema(&self) -> &'static Schema {
        match self {
            Variant::Products => &PRODUCTS,
            Variant::Brands => &BRANDS,
            Variant::Display => &DISPLAY,
        }
    }

    /// Pick a variant from the performance report's normalized labels.
    pub fn detect(labels: &[String]) -> Variant {
        if DISPLAY.recognizes(labels) {
            Variant::Display
        } else {
            // search-term reports and unrecognized layouts both land here
            Variant::Products
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Variant {
    type Err = AnalyzerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "products" => Ok(Variant::Products),
            "brands" => Ok(Variant::Brands),
            "display" => Ok(Variant::Display),
            _ => Err(AnalyzerError::InvalidOption {
                name: "product_type",
                value: s.to_string(),
            }),
        }
    }
}

/// Canonical fields a performance report can provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Key,
    Campaign,
    AdGroup,
    MatchType,
    Orders,
    Sales,
    Spend,
    Impressions,
    Clicks,
}

/// One output column: its label, the source labels accepted for it, and
/// whether the upload is rejected without it.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub field: Field,
    pub label: &'static str,
    pub aliases: &'static [&'static str],
    pub required: bool,
}

impl FieldSpec {
    const fn new(field: Field, label: &'static str, required: bool) -> Self {
        Self {
            field,
            label,
            aliases: &[],
            required,
        }
    }

    const fn with_aliases(mut self, aliases: &'static [&'static str]) -> Self {
        self.aliases = aliases;
        self
    }
}

/// How a performance row is compared against the existing-targets report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStrategy {
    /// Normalized key must not appear among normalized targeting values.
    ExactTerm,
    /// Normalized key must not equal any `asin="..."` identifier.
    AsinExpression,
}

/// Column layout and selection policy of one variant.
#[derive(Debug)]
pub struct Schema {
    pub variant: Variant,
    pub fields: &'static [FieldSpec],
    pub target: FieldSpec,
    pub matching: MatchStrategy,
    /// Keep only the top share of positives; otherwise keep all of them.
    pub truncate_positives: bool,
}

impl Schema {
    /// The key is always the first declared field.
    pub fn key(&self) -> &FieldSpec {
        &self.fields[0]
    }

    pub fn field(&self, field: Field) -> Option<&FieldSpec> {
        self.fields.iter().find(|spec| spec.field == field)
    }

    /// Whether a table with these normalized labels carries this schema's key.
    pub fn recognizes(&self, labels: &[String]) -> bool {
        labels.iter().any(|label| label == self.key().label)
    }

    /// Column headers of the formatted output, in order.
    pub fn output_labels(&self) -> Vec<&'static str> {
        self.fields
            .iter()
            .map(|spec| spec.label)
            .chain(std::iter::once(ACOS_LABEL))
            .collect()
    }
}

const ORDERS_ALIASES: &[&str] = &["7 day total orders (#)", "orders"];
const SALES_ALIASES: &[&str] = &["7 day total sales", "sales"];
const SPEND_ALIASES: &[&str] = &["cost"];
const TARGET_ALIASES: &[&str] = &["keyword text", "keyword"];

static SEARCH_TERM_FIELDS: [FieldSpec; 9] = [
    FieldSpec::new(Field::Key, "customer search term", true),
    FieldSpec::new(Field::Campaign, "campaign name", false),
    FieldSpec::new(Field::AdGroup, "ad group name", false),
    FieldSpec::new(Field::MatchType, "match type", false),
    FieldSpec::new(Field::Orders, "14 day total orders (#)", true).with_aliases(ORDERS_ALIASES),
    FieldSpec::new(Field::Sales, "14 day total sales", true).with_aliases(SALES_ALIASES),
    FieldSpec::new(Field::Spend, "spend", true).with_aliases(SPEND_ALIASES),
    FieldSpec::new(Field::Impressions, "impressions", false),
    FieldSpec::new(Field::Clicks, "clicks", false),
];

static DISPLAY_FIELDS: [FieldSpec; 7] = [
    FieldSpec::new(Field::Key, "matched target", true),
    FieldSpec::new(Field::Campaign, "campaign name", false),
    FieldSpec::new(Field::Orders, "14 day total orders (#)", true).with_aliases(ORDERS_ALIASES),
    FieldSpec::new(Field::Sales, "14 day total sales", true).with_aliases(SALES_ALIASES),
    FieldSpec::new(Field::Spend, "spend", true).with_aliases(SPEND_ALIASES),
    FieldSpec::new(Field::Impressions, "impressions", false),
    FieldSpec::new(Field::Clicks, "clicks", false),
];

static PRODUCTS: Schema = Schema {
    variant: Variant::Products,
    fields: &SEARCH_TERM_FIELDS,
    target: FieldSpec::new(Field::Key, "targeting", true).with_aliases(TARGET_ALIASES),
    matching: MatchStrategy::ExactTerm,
    truncate_positives: true,
};

static BRANDS: Schema = Schema {
    variant: Variant::Brands,
    fields: &SEARCH_TERM_FIELDS,
    target: FieldSpec::new(Field::Key, "targeting", true).with_aliases(TARGET_ALIASES),
    matching: MatchStrategy::ExactTerm,
    truncate_positives: true,
};

static DISPLAY: Schema = Schema {
    variant: Variant::Display,
    fields: &DISPLAY_FIELDS,
    target: FieldSpec::new(Field::Key, "targeting", true),
    matching: MatchStrategy::AsinExpression,
    truncate_positives: false,
};

/// Fields a concrete upload provides, resolved once at ingestion.
#[derive(Debug, Clone, Default)]
pub struct ColumnMap {
    index: HashMap<Field, usize>,
}

impl ColumnMap {
    pub fn insert(&mut self, field: Field, column: usize) {
        self.index.insert(field, column);
    }

    pub fn column(&self, field: Field) -> Option<usize> {
        self.index.get(&field).copied()
    }

    pub fn provides(&self, field: Field) -> bool {
        self.index.contains_key(&field)
    }
}
