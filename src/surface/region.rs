//! In-memory text region, the default surface implementation.

use std::collections::BTreeSet;

use super::{Surface, TYPING_CLASS};

/// A named block of visible text with presentation classes.
///
/// New regions start with [`TYPING_CLASS`] set, matching the idle state a
/// renderer expects before any writer has touched the region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRegion {
    name: String,
    text: String,
    classes: BTreeSet<String>,
}

impl TextRegion {
    /// Create an empty region with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        let mut classes = BTreeSet::new();
        classes.insert(TYPING_CLASS.to_string());
        Self {
            name: name.into(),
            text: String::new(),
            classes,
        }
    }

    /// Create a region pre-seeded with visible text.
    pub fn with_text(name: impl Into<String>, text: impl Into<String>) -> Self {
        let mut region = Self::new(name);
        region.text = text.into();
        region
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Classes currently set, in sorted order.
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(String::as_str)
    }
}

impl Surface for TextRegion {
    fn text(&self) -> &str {
        &self.text
    }

    fn set_text(&mut self, text: String) {
        self.text = text;
    }

    fn push_char(&mut self, ch: char) {
        self.text.push(ch);
    }

    fn pop_char(&mut self) {
        self.text.pop();
    }

    fn add_class(&mut self, class: &str) {
        self.classes.insert(class.to_string());
    }

    fn toggle_class(&mut self, class: &str) {
        if !self.classes.remove(class) {
            self.classes.insert(class.to_string());
        }
    }

    fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }
}
