use std::collections::HashSet;

/// Allow-list of Outline collections. Empty means every collection passes.
#[derive(Debug, Clone, Default)]
pub struct CollectionFilter {
    allowed: HashSet<String>,
}

impl CollectionFilter {
    pub fn new<I, S>(collections: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed: collections.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_active(&self) -> bool {
        !self.allowed.is_empty()
    }

    /// An unresolved collection is rejected whenever the filter is active.
    pub fn is_allowed(&self, collection_id: Option<&str>) -> bool {
        if !self.is_active() {
            return true;
        }
        collection_id.is_some_and(|id| self.allowed.contains(id))
    }
}
