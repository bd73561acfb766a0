//! Script playback module
//!
//! Plays a typing script either interactively in the current terminal,
//! with live controls for pausing and speed, or as a plain character
//! stream on stdout for non-TTY use.
//!
//! # Architecture
//!
//! The player is organized into submodules:
//! - `state`: PlayerState wall-to-playback time mapping and shared types (InputResult)
//! - `render`: UI rendering (layout, text with cursor, status bar, footer)
//! - `app`: Terminal lifecycle, event loop, and key handling
//! - `plain`: Non-interactive rendering to stdout
//!
//! # Usage
//!
//! ```no_run
//! use typeline::config::Config;
//! use typeline::player::{play_script, PlaybackResult};
//! use typeline::script::Script;
//!
//! let script = Script::parse("intro.twl").unwrap();
//! let config = Config::default();
//! let options = script.options_over(config.base_options());
//! match play_script(&script, &config, options, "intro".to_string(), None).unwrap() {
//!     PlaybackResult::Finished(text) => println!("{}", text),
//!     PlaybackResult::Interrupted => println!("Stopped by user"),
//! }
//! ```

mod app;
pub mod plain;
pub mod render;
pub mod state;

pub use app::{play_script, PlaybackResult, PlayerApp};
pub use plain::play_plain;
pub use state::{InputResult, PlayerState};

use crate::script::Script;
use crate::surface::{Stage, Surface, TextRegion};
use crate::writer::{Options, Writer, WriterError};

/// Build a queued, unstarted writer for a script.
///
/// The stage holds a single region named by the options' target, seeded
/// with the script's initial text.
pub(crate) fn writer_from_script(
    script: &Script,
    options: Options,
) -> Result<Writer<TextRegion>, WriterError> {
    let mut stage = Stage::new();
    let mut region = TextRegion::new(&options.target);
    if let Some(seed) = &script.header.initial_text {
        region.set_text(seed.clone());
    }
    stage.insert(region);

    let mut writer = Writer::from_stage(&mut stage, options)?;
    script.apply(&mut writer)?;
    Ok(writer)
}
