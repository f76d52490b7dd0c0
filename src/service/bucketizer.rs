use crate::models::Buckets;

/// Prefix of Amazon catalog identifiers.
pub const CATALOG_PREFIX: &str = "b0";

pub fn has_catalog_prefix(key: &str) -> bool {
    key.get(..CATALOG_PREFIX.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(CATALOG_PREFIX))
}

/// Partition rows by key prefix, keeping order on both sides.
pub fn split_by_prefix<T>(rows: Vec<T>, key: impl Fn(&T) -> &str) -> Buckets<T> {
    let mut buckets = Buckets::default();
    for row in rows {
        if has_catalog_prefix(key(&row)) {
            buckets.only_b0.push(row);
        } else {
            buckets.no_b0.push(row);
        }
    }
    buckets
}
