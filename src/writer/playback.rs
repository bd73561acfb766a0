//! Playback: the phase machine and its pull-based timeline.
//!
//! Playback is advanced by the caller, not by timers: [`Writer::next_deadline`]
//! reports when the next step is due on the playback timeline (which starts
//! at zero when `start` is called), and [`Writer::advance_to`] applies every
//! step due at or before the given time. [`Writer::run`] wraps that in a
//! blocking loop against a [`Clock`], checking a [`StopToken`] between
//! waits.

use std::time::Duration;

use crate::clock::{Clock, StopToken};
use crate::surface::{Surface, CURSOR_HIDDEN_CLASS, TYPING_CLASS};

use super::{Writer, ERASE_MARKER};

/// Upper bound on a single wait inside [`Writer::run`], so stop checks stay
/// responsive during long delays.
const RUN_POLL_SLICE: Duration = Duration::from_millis(15);

/// Where playback currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// The queue is still accepting instructions; `start` not yet called.
    Building,
    /// An instruction's pre-delay is armed. Also the loop re-entry state.
    Waiting { instruction: usize },
    /// Revealing characters of an instruction, one per tick.
    Typing {
        instruction: usize,
        char_index: usize,
    },
    /// Terminal. Nothing leaves this phase except constructing a fresh
    /// writer.
    Done,
}

/// How a blocking playback run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The timeline ran out of work.
    Finished,
    /// The stop token was tripped.
    Stopped,
}

impl<S: Surface> Writer<S> {
    /// When the next step is due on the playback timeline, or `None` when
    /// no work is pending (not started, or done).
    pub fn next_deadline(&self) -> Option<Duration> {
        self.deadline
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Completed loop resets since playback started.
    pub fn loops_completed(&self) -> usize {
        self.loops_completed
    }

    /// Apply every step due at or before `now`.
    ///
    /// One bound: a single call applies at most one loop pass. When a loop
    /// reset occurs the call returns with the loop-from instruction armed,
    /// even if its deadline has already passed; the next call continues.
    /// This keeps the method total for zero-delay looping scripts and gives
    /// drivers a cancellation check point between cycles.
    pub fn advance_to(&mut self, now: Duration) {
        let loop_fence = self.loops_completed;
        while let Some(deadline) = self.deadline {
            if deadline > now {
                break;
            }
            self.step(deadline);
            if self.loops_completed > loop_fence {
                break;
            }
        }
    }

    /// Drive playback against a clock until the timeline is exhausted or
    /// the token stops it. A writer with no pending work returns
    /// [`Outcome::Finished`] immediately.
    pub fn run(&mut self, clock: &impl Clock, stop: &StopToken) -> Outcome {
        loop {
            if stop.is_stopped() {
                return Outcome::Stopped;
            }
            let Some(deadline) = self.deadline else {
                return Outcome::Finished;
            };
            let now = clock.now();
            if now < deadline {
                clock.sleep((deadline - now).min(RUN_POLL_SLICE));
            }
            self.advance_to(clock.now());
        }
    }

    /// Apply the single step armed at `at`.
    fn step(&mut self, at: Duration) {
        match self.phase {
            Phase::Waiting { instruction } => self.enter_instruction(instruction, at),
            Phase::Typing {
                instruction,
                char_index,
            } => self.apply_char(instruction, char_index, at),
            Phase::Building | Phase::Done => self.deadline = None,
        }
    }

    /// Begin an instruction: the idle-cursor class toggles off and the
    /// first character tick is armed. Empty instructions complete here.
    fn enter_instruction(&mut self, index: usize, at: Duration) {
        self.active_chars = self.queue[index].text.chars().collect();
        self.surface.toggle_class(TYPING_CLASS);
        tracing::debug!(
            instruction = index,
            chars = self.active_chars.len(),
            "instruction started"
        );
        if self.active_chars.is_empty() {
            self.finish_instruction(index, at);
        } else {
            self.phase = Phase::Typing {
                instruction: index,
                char_index: 0,
            };
            self.deadline = Some(at + self.options.type_delay);
        }
    }

    /// Reveal or erase one character, then arm the next tick or finish.
    fn apply_char(&mut self, index: usize, char_index: usize, at: Duration) {
        let ch = self.active_chars[char_index];
        if ch == ERASE_MARKER {
            self.surface.pop_char();
        } else {
            self.surface.push_char(ch);
        }
        tracing::trace!(instruction = index, char_index, "tick");

        let next = char_index + 1;
        if next == self.active_chars.len() {
            self.finish_instruction(index, at);
        } else {
            self.phase = Phase::Typing {
                instruction: index,
                char_index: next,
            };
            self.deadline = Some(at + self.options.type_delay);
        }
    }

    /// Restore the idle-cursor class and route: next instruction, loop
    /// reset, or terminal (with the one-time cursor hide if configured).
    fn finish_instruction(&mut self, index: usize, at: Duration) {
        self.surface.toggle_class(TYPING_CLASS);

        let next = index + 1;
        if next < self.queue.len() {
            self.arm(next, at);
        } else if self.options.looping && self.options.loop_from < self.queue.len() {
            self.loops_completed += 1;
            tracing::debug!(
                cycle = self.loops_completed,
                from = self.options.loop_from,
                "loop reset"
            );
            self.arm(self.options.loop_from, at);
        } else {
            if self.options.hide_cursor_on_end {
                self.surface.add_class(CURSOR_HIDDEN_CLASS);
            }
            tracing::debug!("playback finished");
            self.phase = Phase::Done;
            self.deadline = None;
        }
    }

    fn arm(&mut self, index: usize, at: Duration) {
        self.phase = Phase::Waiting { instruction: index };
        self.deadline = Some(at + self.queue[index].delay);
    }
}
