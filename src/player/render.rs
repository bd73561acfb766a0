//! Rendering helpers for the interactive player.
//!
//! Pure layout and widget construction, kept separate from the event loop
//! so the text and cursor composition can be unit tested without a
//! terminal.

use std::time::Duration;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::theme::Theme;

/// Glyph drawn for the visible cursor.
pub const CURSOR_GLYPH: char = '▌';

/// Split the frame into content, status line, and footer areas.
pub fn build_player_layout(area: Rect) -> (Rect, Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);
    (chunks[0], chunks[1], chunks[2])
}

/// Compose the typed text plus an optional cursor into renderable lines.
///
/// The cursor span is appended to the last line so it always trails the
/// most recently typed character.
pub fn build_text_lines(text: &str, cursor: Option<char>, theme: &Theme) -> Vec<Line<'static>> {
    let mut lines: Vec<Line<'static>> = text
        .split('\n')
        .map(|line| Line::from(Span::styled(line.to_string(), theme.text_style())))
        .collect();

    if let Some(glyph) = cursor {
        let cursor_span = Span::styled(glyph.to_string(), theme.cursor_style());
        match lines.last_mut() {
            Some(last) => last.spans.push(cursor_span),
            None => lines.push(Line::from(cursor_span)),
        }
    }

    lines
}

/// Render a status line with the given text.
///
/// Displays the text in the theme's secondary text color. The app
/// computes its own state-aware status text and passes it here.
pub fn render_status_line(frame: &mut Frame, area: Rect, text: &str, theme: &Theme) {
    let status = Paragraph::new(text.to_string()).style(theme.text_secondary_style());
    frame.render_widget(status, area);
}

/// Render a centered footer with keybinding hints.
///
/// Takes pairs of (key, description) and joins them with " | " separators.
///
/// Example: `&[("q", "quit"), ("?", "help")]` renders as `"q: quit | ?: help"`.
pub fn render_footer(frame: &mut Frame, area: Rect, keys: &[(&str, &str)], theme: &Theme) {
    let spans: Vec<Span<'static>> = build_footer_spans(keys, theme);
    let footer = Paragraph::new(Line::from(spans))
        .style(theme.text_secondary_style())
        .alignment(Alignment::Center);
    frame.render_widget(footer, area);
}

/// Build styled spans for footer keybinding hints.
///
/// Each key is highlighted in bold accent, descriptions use the
/// secondary text color, and entries are separated by " | ".
fn build_footer_spans(keys: &[(&str, &str)], theme: &Theme) -> Vec<Span<'static>> {
    let mut spans = Vec::with_capacity(keys.len() * 3);
    for (i, (key, desc)) in keys.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" | ".to_string(), theme.text_secondary_style()));
        }
        spans.push(Span::styled(key.to_string(), theme.accent_bold_style()));
        spans.push(Span::styled(
            format!(": {}", desc),
            theme.text_secondary_style(),
        ));
    }
    spans
}

/// Format an elapsed playback duration as MM:SS.
pub fn format_elapsed(elapsed: Duration) -> String {
    let total_secs = elapsed.as_secs();
    let mins = total_secs / 60;
    let secs = total_secs % 60;
    format!("{:02}:{:02}", mins, secs)
}
