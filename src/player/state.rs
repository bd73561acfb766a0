//! Player state management
//!
//! `PlayerState` maps wall time onto the playback timeline: pausing stops
//! the mapping, speed scales it. The writer only ever sees the mapped
//! playback time, so pause and speed need no support inside the engine.

use std::time::Duration;

/// Result of processing an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputResult {
    /// Continue playback/rendering
    Continue,
    /// Exit the player normally
    Quit,
    /// Exit because the user interrupted (Ctrl-C)
    Interrupt,
}

/// Wall-to-playback time mapping plus presentation flags.
///
/// The mapping is anchored: `play_offset` is the playback time accumulated
/// up to the last anchor, `wall_anchor` the wall time of that anchor.
/// Pausing freezes the offset; resuming and speed changes re-anchor so the
/// new rate only applies forward.
#[derive(Debug)]
pub struct PlayerState {
    /// Whether playback is paused
    pub paused: bool,
    /// Playback speed multiplier (1.0 = normal)
    pub speed: f64,
    /// Playback time accumulated up to the last anchor
    play_offset: Duration,
    /// Wall time of the last anchor
    wall_anchor: Duration,
    /// True when the screen needs to be redrawn
    pub needs_render: bool,
}

impl PlayerState {
    /// Slowest supported playback rate.
    pub const MIN_SPEED: f64 = 0.25;
    /// Fastest supported playback rate.
    pub const MAX_SPEED: f64 = 4.0;

    pub fn new() -> Self {
        Self {
            paused: false,
            speed: 1.0,
            play_offset: Duration::ZERO,
            wall_anchor: Duration::ZERO,
            needs_render: true,
        }
    }

    /// Playback time corresponding to the given wall time.
    pub fn playback_now(&self, wall_now: Duration) -> Duration {
        if self.paused {
            return self.play_offset;
        }
        let elapsed = wall_now.saturating_sub(self.wall_anchor);
        self.play_offset + elapsed.mul_f64(self.speed)
    }

    /// Toggle pause. Resuming re-anchors so paused wall time never reaches
    /// the playback timeline.
    pub fn toggle_pause(&mut self, wall_now: Duration) {
        if self.paused {
            self.wall_anchor = wall_now;
            self.paused = false;
        } else {
            self.play_offset = self.playback_now(wall_now);
            self.paused = true;
        }
        self.needs_render = true;
    }

    /// Increase playback speed (max 4x).
    pub fn speed_up(&mut self, wall_now: Duration) {
        self.rescale(wall_now, (self.speed * 1.5).min(Self::MAX_SPEED));
    }

    /// Decrease playback speed (min 0.25x).
    pub fn speed_down(&mut self, wall_now: Duration) {
        self.rescale(wall_now, (self.speed / 1.5).max(Self::MIN_SPEED));
    }

    /// Set an explicit rate, clamped to the supported range.
    pub fn set_speed(&mut self, wall_now: Duration, speed: f64) {
        if !speed.is_finite() {
            return;
        }
        self.rescale(wall_now, speed.clamp(Self::MIN_SPEED, Self::MAX_SPEED));
    }

    /// Re-anchor at the current position, then change the rate. Without
    /// the re-anchor a speed change would rescale time already played.
    fn rescale(&mut self, wall_now: Duration, speed: f64) {
        self.play_offset = self.playback_now(wall_now);
        self.wall_anchor = wall_now;
        self.speed = speed;
        self.needs_render = true;
    }
}

impl Default for PlayerState {
    fn default() -> Self {
        Self::new()
    }
}
