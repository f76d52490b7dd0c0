use crate::models::{ExistingTarget, MatchStrategy};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

static ASIN_EXPRESSION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)^asin="([^"]*)"$"#).expect("static ASIN pattern"));

/// Identifier inside an `asin="<value>"` targeting expression, trimmed and
/// lower-cased. Any other shape yields nothing.
pub fn extract_asin(expression: Option<&str>) -> Option<String> {
    let captures = ASIN_EXPRESSION.captures(expression?.trim())?;
    let value = captures.get(1)?.as_str().trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_lowercase())
    }
}

/// Keys already targeted, compared against each performance key.
///
/// For search-term reports this is the set of normalized targeting values.
/// For display reports it is the right-hand side of a left join on the
/// extracted ASIN: a performance row is eligible exactly when the join finds
/// no partner. Expressions without an ASIN never join.
#[derive(Debug, Clone)]
pub struct ExclusionSet {
    strategy: MatchStrategy,
    keys: HashSet<String>,
}

impl ExclusionSet {
    /// Build the set, filling in `identifier` on display targets.
    pub fn build(targets: &mut [ExistingTarget], strategy: MatchStrategy) -> Self {
        let keys = match strategy {
            MatchStrategy::ExactTerm => targets
                .iter()
                .filter_map(|t| t.value.clone())
                .collect(),
            MatchStrategy::AsinExpression => {
                for target in targets.iter_mut() {
                    target.identifier = extract_asin(target.expression.as_deref());
                }
                let unmatched = targets.iter().filter(|t| t.identifier.is_none()).count();
                if unmatched > 0 {
                    tracing::debug!("{} targeting expressions carry no ASIN", unmatched);
                }
                targets
                    .iter()
                    .filter_map(|t| t.identifier.clone())
                    .collect()
            }
        };

        Self { strategy, keys }
    }

    pub fn strategy(&self) -> MatchStrategy {
        self.strategy
    }

    /// Whether a normalized performance key is already targeted.
    pub fn excludes(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
