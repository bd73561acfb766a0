//! Command-line interface definitions
//!
//! The clap command tree lives in the library so the xtask man page
//! generator can reach it. Handlers live in the binary's `commands`
//! module.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// Version string with git SHA and build date (dev builds).
#[cfg(not(feature = "release"))]
pub const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("VERGEN_GIT_SHA"),
    " ",
    env!("TYPELINE_BUILD_DATE"),
    ")"
);

/// Version string without git SHA (official release builds).
#[cfg(feature = "release")]
pub const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("TYPELINE_BUILD_DATE"),
    ")"
);

/// Typewriter-style text animation for the terminal.
#[derive(Parser)]
#[command(
    name = "typeline",
    about = "Play typewriter-style text animations in your terminal",
    version,
    long_version = LONG_VERSION
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Play a typing script
    Play {
        /// Script file to play (.twl)
        file: PathBuf,

        #[command(flatten)]
        playback: PlaybackArgs,

        /// Print the animation to stdout without the interactive UI
        #[arg(long)]
        plain: bool,
    },

    /// Play the built-in demo script
    Demo {
        #[command(flatten)]
        playback: PlaybackArgs,

        /// Print the animation to stdout without the interactive UI
        #[arg(long)]
        plain: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Playback flags shared by `play` and `demo`.
///
/// Flags override the script header, which overrides the config file.
#[derive(Args)]
pub struct PlaybackArgs {
    /// Per-character delay in milliseconds
    #[arg(long, value_name = "MS")]
    pub type_delay: Option<u64>,

    /// Restart from the beginning when the script ends
    #[arg(long = "loop", conflicts_with = "no_loop")]
    pub looping: bool,

    /// Never loop, even if the script or config asks for it
    #[arg(long)]
    pub no_loop: bool,

    /// Instruction index to restart from when looping
    #[arg(long, value_name = "INDEX")]
    pub loop_from: Option<usize>,

    /// Hide the cursor once the script ends
    #[arg(long)]
    pub hide_cursor: bool,

    /// Initial playback speed in the interactive player
    #[arg(long, value_name = "FACTOR")]
    pub speed: Option<f64>,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,
    /// Open configuration file in the default editor
    Edit,
    /// Print the configuration file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn play_parses_file_and_flags() {
        let cli = Cli::parse_from([
            "typeline",
            "play",
            "intro.twl",
            "--type-delay",
            "80",
            "--loop",
            "--loop-from",
            "2",
        ]);
        match cli.command {
            Commands::Play {
                file,
                playback,
                plain,
            } => {
                assert_eq!(file, PathBuf::from("intro.twl"));
                assert_eq!(playback.type_delay, Some(80));
                assert!(playback.looping);
                assert_eq!(playback.loop_from, Some(2));
                assert!(!plain);
            }
            _ => panic!("expected play command"),
        }
    }

    #[test]
    fn loop_and_no_loop_conflict() {
        let result = Cli::try_parse_from(["typeline", "play", "a.twl", "--loop", "--no-loop"]);
        assert!(result.is_err());
    }

    #[test]
    fn demo_accepts_plain_flag() {
        let cli = Cli::parse_from(["typeline", "demo", "--plain"]);
        match cli.command {
            Commands::Demo { plain, .. } => assert!(plain),
            _ => panic!("expected demo command"),
        }
    }

    #[test]
    fn long_version_includes_package_version() {
        assert!(LONG_VERSION.starts_with(env!("CARGO_PKG_VERSION")));
    }
}
