//! Typewriter animation engine
//!
//! A [`Writer`] queues write/erase instructions against a single
//! [`Surface`], then plays them back one character per tick. Queuing is
//! fluent and synchronous; playback is a pull-based timeline the caller
//! advances with a clock.
//!
//! # Architecture
//!
//! The writer is organized into submodules:
//! - `error`: the [`WriterError`] precondition errors
//! - `playback`: the phase machine, deadlines, and the blocking driver
//!
//! Queue building and playback are strictly separated: `start` freezes the
//! queue, and from then on every mutation of the surface happens inside
//! [`Writer::advance_to`]. Erases are encoded as instructions whose text is
//! a run of [`ERASE_MARKER`] characters, so one playback loop handles both
//! directions.
//!
//! # Usage
//!
//! ```
//! use std::time::Duration;
//! use typeline::clock::{ManualClock, StopToken};
//! use typeline::surface::{Surface, TextRegion};
//! use typeline::writer::{Options, Outcome, Writer};
//!
//! let region = TextRegion::new("banner");
//! let mut writer = Writer::new(region, Options::default());
//! writer.write("Hello", Duration::ZERO)?.start()?;
//!
//! let clock = ManualClock::new();
//! let outcome = writer.run(&clock, &StopToken::new());
//! assert_eq!(outcome, Outcome::Finished);
//! assert_eq!(writer.surface().text(), "Hello");
//! # Ok::<(), typeline::writer::WriterError>(())
//! ```

mod error;
mod playback;

pub use error::WriterError;
pub use playback::{Outcome, Phase};

use std::time::Duration;

use crate::surface::{Stage, Surface, TextRegion};

/// Sentinel character marking "remove one trailing character" within an
/// instruction's text.
pub const ERASE_MARKER: char = '\u{8}';

/// Region name a writer targets when none is configured.
pub const DEFAULT_TARGET: &str = "typeline";

/// Per-character delay used when none is configured.
pub const DEFAULT_TYPE_DELAY: Duration = Duration::from_millis(150);

/// Playback configuration, immutable once the writer is constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Name of the region this writer animates.
    pub target: String,
    /// Delay between revealed characters.
    pub type_delay: Duration,
    /// Restart playback after the queue is exhausted.
    pub looping: bool,
    /// Instruction index playback restarts from when looping.
    pub loop_from: usize,
    /// Add the permanent cursor-hidden class when playback ends.
    pub hide_cursor_on_end: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            target: DEFAULT_TARGET.to_string(),
            type_delay: DEFAULT_TYPE_DELAY,
            looping: false,
            loop_from: 0,
            hide_cursor_on_end: false,
        }
    }
}

/// One queued unit of playback: text to reveal (or erase markers to apply)
/// after a pre-delay relative to the previous instruction's completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub text: String,
    pub delay: Duration,
}

impl Instruction {
    /// Length of the text in characters.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// The typewriter: a frozen-at-start instruction queue played back onto an
/// exclusively owned surface.
#[derive(Debug)]
pub struct Writer<S: Surface> {
    surface: S,
    options: Options,
    queue: Vec<Instruction>,
    chars_queued: usize,
    chars_erased: usize,
    phase: Phase,
    deadline: Option<Duration>,
    active_chars: Vec<char>,
    loops_completed: usize,
}

impl Writer<TextRegion> {
    /// Resolve the configured target against a stage and take ownership of
    /// that region.
    pub fn from_stage(stage: &mut Stage, options: Options) -> Result<Self, WriterError> {
        let region = stage
            .take(&options.target)
            .ok_or_else(|| WriterError::TargetNotFound {
                target: options.target.clone(),
            })?;
        Ok(Self::new(region, options))
    }
}

impl<S: Surface> Writer<S> {
    /// Create a writer over an already-resolved surface.
    pub fn new(surface: S, options: Options) -> Self {
        Self {
            surface,
            options,
            queue: Vec::new(),
            chars_queued: 0,
            chars_erased: 0,
            phase: Phase::Building,
            deadline: None,
            active_chars: Vec::new(),
            loops_completed: 0,
        }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Consume the writer and return its surface.
    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Whether `start` has been called (the queue is frozen).
    pub fn is_started(&self) -> bool {
        !matches!(self.phase, Phase::Building)
    }

    /// The queued instructions, in playback order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.queue
    }

    /// Total characters queued for writing so far.
    pub fn chars_queued(&self) -> usize {
        self.chars_queued
    }

    /// Total characters marked for erasing so far.
    pub fn chars_erased(&self) -> usize {
        self.chars_erased
    }

    /// Append a write instruction.
    ///
    /// Each character is tallied as it is queued: erase markers count
    /// toward the erased total, everything else toward the queued total.
    pub fn write(&mut self, text: &str, delay: Duration) -> Result<&mut Self, WriterError> {
        if self.is_started() {
            return Err(WriterError::AlreadyStarted);
        }
        for ch in text.chars() {
            if ch == ERASE_MARKER {
                self.chars_erased += 1;
            } else {
                self.chars_queued += 1;
            }
        }
        tracing::debug!(
            chars = text.chars().count(),
            delay_ms = delay.as_millis() as u64,
            "queued instruction"
        );
        self.queue.push(Instruction {
            text: text.to_string(),
            delay,
        });
        Ok(self)
    }

    /// Append an instruction erasing `count` trailing characters, encoded
    /// as a run of erase markers.
    pub fn erase(&mut self, count: usize, delay: Duration) -> Result<&mut Self, WriterError> {
        let markers: String = std::iter::repeat(ERASE_MARKER).take(count).collect();
        self.write(&markers, delay)
    }

    /// Erase exactly the character length of the most recently queued
    /// instruction.
    ///
    /// Caveat, kept deliberately: calling this twice in a row measures the
    /// erase instruction it just queued, so it erases that instruction's
    /// synthetic marker text rather than older content. Alternate writes
    /// and erases to get the intuitive behavior.
    pub fn erase_last(&mut self, delay: Duration) -> Result<&mut Self, WriterError> {
        let len = self
            .queue
            .last()
            .map(Instruction::char_len)
            .ok_or(WriterError::NoPriorWrite)?;
        self.erase(len, delay)
    }

    /// Erase everything: the surface's current text plus all characters
    /// queued so far, minus those already scheduled for erasing.
    ///
    /// The count is computed now, at queuing time. It stays accurate
    /// because the writer owns its surface; a shared surface mutated from
    /// outside would desynchronize it.
    pub fn erase_all(&mut self, delay: Duration) -> Result<&mut Self, WriterError> {
        let count =
            (self.surface.char_count() + self.chars_queued).saturating_sub(self.chars_erased);
        self.erase(count, delay)
    }

    /// Freeze the queue and arm the first instruction.
    ///
    /// On an empty queue this completes immediately: no deadline is armed
    /// and the phase goes straight to [`Phase::Done`] (the end-of-playback
    /// cursor handling does not fire). The playback timeline starts at
    /// zero; drive it with a clock whose origin is at or before this call.
    pub fn start(&mut self) -> Result<&mut Self, WriterError> {
        if self.is_started() {
            return Err(WriterError::AlreadyStarted);
        }
        if self.queue.is_empty() {
            tracing::debug!("started with an empty queue; nothing to play");
            self.phase = Phase::Done;
            return Ok(self);
        }
        tracing::debug!(instructions = self.queue.len(), "starting playback");
        self.phase = Phase::Waiting { instruction: 0 };
        self.deadline = Some(self.queue[0].delay);
        Ok(self)
    }
}
