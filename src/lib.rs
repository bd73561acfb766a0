//! typeline - typewriter-effect text animation for the terminal
//!
//! A scripted typing engine: instructions queue text with per-character
//! delays, then play back onto a surface one character at a time, with
//! optional looping and cursor handling. Ships with a JSON-lines script
//! format (`.twl`), an interactive terminal player, and a plain stdout
//! mode.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use typeline::surface::{Surface, TextRegion};
//! use typeline::writer::{Options, Writer};
//!
//! let mut writer = Writer::new(TextRegion::new("banner"), Options::default());
//! writer.write("Hi", Duration::ZERO).unwrap();
//! writer.start().unwrap();
//!
//! writer.advance_to(Duration::from_millis(300));
//! assert_eq!(writer.surface().text(), "Hi");
//! ```

pub mod cli;
pub mod clock;
pub mod config;
pub mod player;
pub mod script;
pub mod surface;
pub mod theme;
pub mod writer;

pub use config::Config;
pub use script::Script;
pub use writer::{Options, Writer, WriterError};
