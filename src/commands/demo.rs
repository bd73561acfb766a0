//! Demo command handler
//!
//! Plays a small built-in script so the tool can be tried without
//! writing a .twl file first.

use anyhow::{Context, Result};

use typeline::cli::PlaybackArgs;
use typeline::script::Script;
use typeline::Config;

use super::play::{resolve_options, run_with_options};

/// Built-in demo script, in the same format `play` reads from disk.
const DEMO_SCRIPT: &str = r#"{"version":1,"title":"typeline demo","type_delay":60}
[400,"w","Hello, world."]
[900,"l"]
[200,"w","Hello, typeline."]
[700,"w","\nA typewriter effect for your terminal."]
[1200,"a"]
[300,"w","bye."]
"#;

/// Play the built-in demo script.
#[cfg(not(tarpaulin_include))]
pub fn handle_demo(args: &PlaybackArgs, plain: bool) -> Result<()> {
    let config = Config::load()?;
    let script = Script::parse_str(DEMO_SCRIPT).context("Built-in demo script is invalid")?;

    let options = resolve_options(&config, &script, args);
    let title = script
        .header
        .title
        .clone()
        .unwrap_or_else(|| "demo".to_string());

    run_with_options(&script, &config, options, title, args.speed, plain)
}
