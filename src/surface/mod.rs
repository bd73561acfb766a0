//! Display surfaces a writer animates onto
//!
//! A [`Surface`] is the seam between the animation engine and whatever
//! actually displays the text: it exposes plain-text content plus a set of
//! presentation classes the renderer interprets. [`TextRegion`] is the
//! owned in-memory implementation; [`Stage`] resolves region names to
//! regions the way a selector lookup would.
//!
//! The class contract is the only rendering protocol: [`TYPING_CLASS`] is
//! present while the writer is idle (renderers blink the cursor), absent
//! while characters are animating (solid cursor), and
//! [`CURSOR_HIDDEN_CLASS`] is added permanently when a writer finishes with
//! hide-cursor-on-end configured.

mod region;
mod stage;

pub use region::TextRegion;
pub use stage::Stage;

/// Class present while the writer is idle; renderers blink the cursor.
pub const TYPING_CLASS: &str = "typing";

/// Class added permanently when playback ends with hide-cursor-on-end set.
pub const CURSOR_HIDDEN_CLASS: &str = "cursor-hidden";

/// A text display target with toggleable presentation classes.
///
/// Playback mutates the surface exclusively through this trait. Length
/// accounting (`erase_all`) assumes nothing else mutates the surface
/// between queuing and playback; implementations that share their text
/// with other writers must document that hazard themselves.
pub trait Surface {
    /// Current visible text.
    fn text(&self) -> &str;

    /// Replace the visible text.
    fn set_text(&mut self, text: String);

    /// Visible length in characters (not bytes).
    fn char_count(&self) -> usize {
        self.text().chars().count()
    }

    /// Append one character to the visible text.
    fn push_char(&mut self, ch: char) {
        let mut text = self.text().to_string();
        text.push(ch);
        self.set_text(text);
    }

    /// Remove the trailing character, if any.
    ///
    /// Removing from an empty surface is a no-op, so erase overshoot
    /// saturates instead of failing.
    fn pop_char(&mut self) {
        let mut text = self.text().to_string();
        if text.pop().is_some() {
            self.set_text(text);
        }
    }

    /// Add a presentation class. Adding a present class is a no-op.
    fn add_class(&mut self, class: &str);

    /// Toggle a presentation class: remove it if present, add it if not.
    fn toggle_class(&mut self, class: &str);

    /// Whether a presentation class is currently set.
    fn has_class(&self, class: &str) -> bool;
}
