//! Named region lookup.

use std::collections::BTreeMap;

use super::TextRegion;

/// A collection of named regions a writer can resolve its target against.
///
/// The moral equivalent of a document a selector runs over: regions are
/// registered by name, and a writer takes ownership of its target when it
/// is constructed.
#[derive(Debug, Default, Clone)]
pub struct Stage {
    regions: BTreeMap<String, TextRegion>,
}

impl Stage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a region under its own name, replacing any previous region
    /// with that name.
    pub fn insert(&mut self, region: TextRegion) {
        self.regions.insert(region.name().to_string(), region);
    }

    pub fn get(&self, name: &str) -> Option<&TextRegion> {
        self.regions.get(name)
    }

    /// Remove and return the named region, transferring ownership to the
    /// caller. Returns `None` if no region of that name exists.
    pub fn take(&mut self, name: &str) -> Option<TextRegion> {
        self.regions.remove(name)
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Region names, in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.regions.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_stage_resolves_nothing() {
        let mut stage = Stage::new();
        assert!(stage.is_empty());
        assert!(stage.get("banner").is_none());
        assert!(stage.take("banner").is_none());
    }

    #[test]
    fn insert_then_get_by_name() {
        let mut stage = Stage::new();
        stage.insert(TextRegion::with_text("banner", "Hi"));
        assert_eq!(stage.len(), 1);
        assert_eq!(stage.get("banner").map(|r| r.name()), Some("banner"));
    }

    #[test]
    fn insert_replaces_same_name() {
        let mut stage = Stage::new();
        stage.insert(TextRegion::with_text("banner", "old"));
        stage.insert(TextRegion::with_text("banner", "new"));
        assert_eq!(stage.len(), 1);
        assert_eq!(
            stage.get("banner").map(crate::surface::Surface::text),
            Some("new")
        );
    }

    #[test]
    fn take_removes_the_region() {
        let mut stage = Stage::new();
        stage.insert(TextRegion::new("banner"));
        let region = stage.take("banner");
        assert!(region.is_some());
        assert!(stage.is_empty());
    }

    #[test]
    fn names_are_sorted() {
        let mut stage = Stage::new();
        stage.insert(TextRegion::new("zeta"));
        stage.insert(TextRegion::new("alpha"));
        let names: Vec<&str> = stage.names().collect();
        assert_eq!(names, vec!["alpha", "zeta"]);
    }
}
