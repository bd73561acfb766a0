//! Non-interactive playback to stdout.
//!
//! Streams the animation as plain terminal output: typed characters are
//! printed as they appear, erased characters are blanked with backspace
//! sequences sized to their display width. Suited to pipes losing the
//! cursor and to terminals without the interactive UI.

use std::io::{self, Write};
use std::time::Duration;

use anyhow::Result;
use unicode_width::UnicodeWidthChar;

use crate::clock::{Clock, StopToken, SystemClock};
use crate::script::Script;
use crate::surface::Surface;
use crate::writer::{Options, Outcome};

/// How long to sleep between stop-token checks while waiting.
const POLL_SLICE: Duration = Duration::from_millis(15);

/// Play a script to stdout on the system clock.
///
/// Returns when the script ends or the stop token fires. Looping
/// scripts never end on their own; callers should refuse them or hold
/// a way to stop.
pub fn play_plain(script: &Script, options: Options, stop: &StopToken) -> Result<Outcome> {
    let mut writer = super::writer_from_script(script, options)?;
    writer.start()?;
    tracing::debug!(steps = script.steps.len(), "plain playback started");

    let clock = SystemClock::new();
    let mut stdout = io::stdout();
    let mut shown = writer.surface().text().to_string();
    write!(stdout, "{}", shown)?;
    stdout.flush()?;

    loop {
        if stop.is_stopped() {
            writeln!(stdout)?;
            tracing::debug!("plain playback stopped");
            return Ok(Outcome::Stopped);
        }

        let Some(deadline) = writer.next_deadline() else {
            writeln!(stdout)?;
            tracing::debug!("plain playback finished");
            return Ok(Outcome::Finished);
        };

        let now = clock.now();
        if now < deadline {
            clock.sleep((deadline - now).min(POLL_SLICE));
            continue;
        }

        writer.advance_to(now);
        let text = writer.surface().text();
        if text != shown {
            write!(stdout, "{}", transition(&shown, text))?;
            stdout.flush()?;
            shown = text.to_string();
        }
    }
}

/// Terminal escape sequence turning `prev` into `next`.
///
/// Shared prefix is left alone. Removed characters are erased from the
/// end: one backspace-blank-backspace per display column, or a cursor-up
/// move when a line break is erased. Added characters are printed as-is.
pub fn transition(prev: &str, next: &str) -> String {
    let prev_chars: Vec<char> = prev.chars().collect();
    let next_chars: Vec<char> = next.chars().collect();
    let common = prev_chars
        .iter()
        .zip(&next_chars)
        .take_while(|(a, b)| a == b)
        .count();

    let mut out = String::new();
    let mut kept = prev_chars;
    while kept.len() > common {
        let ch = kept.pop().unwrap_or_default();
        if ch == '\n' {
            // Rejoin the previous line at the end of its content.
            let col = trailing_line_width(&kept) + 1;
            out.push_str(&format!("\x1b[A\x1b[{}G", col));
        } else {
            let width = ch.width().unwrap_or(0);
            for _ in 0..width {
                out.push_str("\u{8} \u{8}");
            }
        }
    }

    for ch in &next_chars[common..] {
        out.push(*ch);
    }
    out
}

/// Display width of everything after the last line break.
fn trailing_line_width(chars: &[char]) -> usize {
    chars
        .iter()
        .rev()
        .take_while(|ch| **ch != '\n')
        .map(|ch| ch.width().unwrap_or(0))
        .sum()
}
