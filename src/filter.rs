use crate::model::IconRecord;

/// Icons of `base` whose name contains `term`, ignoring case, in `base` order.
/// An empty term keeps everything.
pub fn filter(base: &[IconRecord], term: &str) -> Vec<IconRecord> {
    if term.is_empty() {
        return base.to_vec();
    }
    let needle = term.to_lowercase();
    base.iter()
        .filter(|icon| icon.name().matches(&needle))
        .cloned()
        .collect()
}
