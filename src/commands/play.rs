//! Play command handler

use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Result};

use typeline::cli::PlaybackArgs;
use typeline::clock::StopToken;
use typeline::player::{play_plain, play_script, PlaybackResult};
use typeline::script::Script;
use typeline::writer::{Options, Outcome};
use typeline::Config;

/// Resolve effective playback options.
///
/// Precedence: command-line flags over the script header over the config
/// file over built-in defaults.
pub(crate) fn resolve_options(config: &Config, script: &Script, args: &PlaybackArgs) -> Options {
    let mut options = script.options_over(config.base_options());
    if let Some(ms) = args.type_delay {
        options.type_delay = Duration::from_millis(ms);
    }
    if args.looping {
        options.looping = true;
    }
    if args.no_loop {
        options.looping = false;
    }
    if let Some(index) = args.loop_from {
        options.loop_from = index;
    }
    if args.hide_cursor {
        options.hide_cursor_on_end = true;
    }
    options
}

/// Play a script file.
#[cfg(not(tarpaulin_include))]
pub fn handle_play(file: &Path, args: &PlaybackArgs, plain: bool) -> Result<()> {
    let config = Config::load()?;
    let script = Script::parse(file)?;

    let options = resolve_options(&config, &script, args);
    let title = script
        .header
        .title
        .clone()
        .unwrap_or_else(|| title_from_path(file));

    run_with_options(&script, &config, options, title, args.speed, plain)
}

/// Fall back to the file stem when the script has no title.
fn title_from_path(file: &Path) -> String {
    file.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "typeline".to_string())
}

/// Run a resolved script interactively or in plain mode.
///
/// The interactive player needs a TTY on stdout; without one, plain
/// mode is used even when `--plain` was not given.
#[cfg(not(tarpaulin_include))]
pub(crate) fn run_with_options(
    script: &Script,
    config: &Config,
    options: Options,
    title: String,
    speed: Option<f64>,
    plain: bool,
) -> Result<()> {
    let theme = config.theme();
    let interactive = !plain && atty::is(atty::Stream::Stdout);

    if interactive {
        match play_script(script, config, options, title, speed)? {
            PlaybackResult::Finished(text) => {
                println!("{}", theme.primary_text(&text));
            }
            PlaybackResult::Interrupted => {
                println!("{}", theme.secondary_text("Interrupted."));
            }
        }
        return Ok(());
    }

    if options.looping {
        bail!(
            "{}",
            theme.error_text("Looping scripts never end in plain mode; pass --no-loop to play once")
        );
    }
    if speed.is_some() {
        tracing::warn!("--speed only applies to the interactive player");
    }

    let stop = StopToken::new();
    let handler_stop = stop.clone();
    ctrlc::set_handler(move || handler_stop.stop())?;

    match play_plain(script, options, &stop)? {
        Outcome::Finished => Ok(()),
        Outcome::Stopped => {
            eprintln!("{}", theme.secondary_text("Interrupted."));
            Ok(())
        }
    }
}
