//! Command handlers for the typeline binary
//!
//! Each submodule handles one CLI subcommand. Handlers resolve options,
//! call into the library, and print results; playback itself lives in
//! `typeline::player` and `typeline::writer`.

pub mod completions;
pub mod config;
pub mod demo;
pub mod play;
