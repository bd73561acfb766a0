//! Interactive terminal player application.
//!
//! Owns the terminal lifecycle (raw mode, alternate screen) and the event
//! loop. Each iteration maps wall time through `PlayerState` onto the
//! playback timeline, advances the writer to that instant, and redraws.
//! Input handling is kept pure so it can be tested without a terminal.

use std::io::{self, Stdout};
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame, Terminal,
};

use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::script::Script;
use crate::surface::{Surface, TextRegion, CURSOR_HIDDEN_CLASS, TYPING_CLASS};
use crate::theme::Theme;
use crate::writer::{Options, Phase, Writer, WriterError};

use super::render;
use super::state::{InputResult, PlayerState};

/// Cap on how long the event loop sleeps between frames.
const FRAME_INTERVAL: Duration = Duration::from_millis(33);

/// Poll interval while paused (only input can change anything).
const PAUSED_INTERVAL: Duration = Duration::from_millis(250);

const FOOTER_KEYS: &[(&str, &str)] = &[
    ("space", "pause"),
    ("+/-", "speed"),
    ("?", "help"),
    ("q", "quit"),
];

/// Outcome of an interactive playback session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackResult {
    /// Playback ended or the user quit normally; carries the final text
    Finished(String),
    /// The user interrupted with Ctrl-C
    Interrupted,
}

/// UI mode of the player.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
enum Mode {
    #[default]
    Playing,
    Help,
}

/// Interactive player driving a [`Writer`] on a wall clock.
pub struct PlayerApp {
    writer: Writer<TextRegion>,
    state: PlayerState,
    mode: Mode,
    title: String,
    cursor_blink: Duration,
    theme: Theme,
}

impl PlayerApp {
    /// Build a player for the given script.
    ///
    /// The stage is seeded with the script's initial text and the queue is
    /// filled from its steps. Playback does not begin until [`run`].
    ///
    /// [`run`]: PlayerApp::run
    pub fn new(
        script: &Script,
        config: &Config,
        options: Options,
        title: String,
    ) -> Result<Self, WriterError> {
        let writer = super::writer_from_script(script, options)?;
        Ok(Self {
            writer,
            state: PlayerState::new(),
            mode: Mode::default(),
            title,
            cursor_blink: config.cursor_blink(),
            theme: config.theme(),
        })
    }

    /// Set the initial playback speed (clamped to the supported range).
    pub fn set_speed(&mut self, speed: f64) {
        self.state.set_speed(Duration::ZERO, speed);
    }

    /// Current text on the animated region.
    pub fn text(&self) -> &str {
        self.writer.surface().text()
    }

    /// Run playback until the script ends and the user quits, or until
    /// interrupted.
    #[cfg(not(tarpaulin_include))]
    pub fn run(&mut self) -> Result<PlaybackResult> {
        self.writer.start()?;

        let mut terminal = setup_terminal()?;
        let clock = SystemClock::new();
        let result = self.event_loop(&mut terminal, &clock);
        let restored = restore_terminal(&mut terminal);

        let outcome = result?;
        restored?;
        Ok(outcome)
    }

    #[cfg(not(tarpaulin_include))]
    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
        clock: &SystemClock,
    ) -> Result<PlaybackResult> {
        loop {
            let wall = clock.now();
            let play_now = self.state.playback_now(wall);
            if !self.state.paused {
                self.writer.advance_to(play_now);
            }

            if self.state.needs_render || !self.state.paused {
                terminal.draw(|frame| self.draw_frame(frame, play_now))?;
                self.state.needs_render = false;
            }

            if event::poll(self.poll_timeout(play_now))? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        match self.handle_key(key, clock.now()) {
                            InputResult::Continue => {}
                            InputResult::Quit => {
                                return Ok(PlaybackResult::Finished(self.text().to_string()))
                            }
                            InputResult::Interrupt => return Ok(PlaybackResult::Interrupted),
                        }
                    }
                    Event::Resize(_, _) => self.state.needs_render = true,
                    _ => {}
                }
            }
        }
    }

    /// How long the loop may sleep without missing a deadline or a blink
    /// phase change.
    fn poll_timeout(&self, play_now: Duration) -> Duration {
        if self.state.paused {
            return PAUSED_INTERVAL;
        }
        match self.writer.next_deadline() {
            Some(deadline) => {
                let remaining = deadline.saturating_sub(play_now);
                let wall_remaining = remaining.div_f64(self.state.speed);
                wall_remaining.clamp(Duration::from_millis(1), FRAME_INTERVAL)
            }
            None => FRAME_INTERVAL,
        }
    }

    /// Process a key press. Pure state transition, no terminal access.
    fn handle_key(&mut self, key: KeyEvent, wall: Duration) -> InputResult {
        if key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
        {
            return InputResult::Interrupt;
        }

        match (self.mode, key.code) {
            (Mode::Help, KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q')) => {
                self.mode = Mode::Playing;
                self.state.needs_render = true;
                InputResult::Continue
            }
            (Mode::Help, _) => InputResult::Continue,
            (Mode::Playing, KeyCode::Char('q') | KeyCode::Esc) => InputResult::Quit,
            (Mode::Playing, KeyCode::Char(' ')) => {
                self.state.toggle_pause(wall);
                InputResult::Continue
            }
            (Mode::Playing, KeyCode::Char('+') | KeyCode::Char('=')) => {
                self.state.speed_up(wall);
                InputResult::Continue
            }
            (Mode::Playing, KeyCode::Char('-') | KeyCode::Char('_')) => {
                self.state.speed_down(wall);
                InputResult::Continue
            }
            (Mode::Playing, KeyCode::Char('?')) => {
                self.mode = Mode::Help;
                self.state.needs_render = true;
                InputResult::Continue
            }
            _ => InputResult::Continue,
        }
    }

    fn draw_frame(&self, frame: &mut Frame, play_now: Duration) {
        let theme = &self.theme;
        let (content, status, footer) = render::build_player_layout(frame.area());

        let region = self.writer.surface();
        let lines = render::build_text_lines(region.text(), self.cursor_glyph(play_now), theme);
        let text = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(theme.text_secondary_style())
                    .title(format!(" {} ", self.title)),
            )
            .style(Style::default().bg(theme.background))
            .wrap(Wrap { trim: false });
        frame.render_widget(text, content);

        render::render_status_line(frame, status, &self.status_text(play_now), theme);
        render::render_footer(frame, footer, FOOTER_KEYS, theme);

        if self.mode == Mode::Help {
            render_help_modal(frame, frame.area(), theme);
        }
    }

    /// Cursor to display at the end of the text, if any.
    ///
    /// Hidden permanently once the writer applies the cursor-hidden class.
    /// Blinks at the configured cadence while the writer idles, solid while
    /// characters are being typed.
    fn cursor_glyph(&self, play_now: Duration) -> Option<char> {
        let region = self.writer.surface();
        if region.has_class(CURSOR_HIDDEN_CLASS) {
            return None;
        }
        if !region.has_class(TYPING_CLASS) {
            return Some(render::CURSOR_GLYPH);
        }
        let period = self.cursor_blink.as_millis().max(1);
        if (play_now.as_millis() / period) % 2 == 0 {
            Some(render::CURSOR_GLYPH)
        } else {
            None
        }
    }

    /// One-line playback status: position, speed, writer activity.
    fn status_text(&self, play_now: Duration) -> String {
        let marker = if self.state.paused { "⏸" } else { "▶" };
        let activity = match self.writer.phase() {
            Phase::Building => "idle",
            Phase::Waiting { .. } => "waiting",
            Phase::Typing { .. } => "typing",
            Phase::Done => "done",
        };
        let mut status = format!(
            " {} {}  {:.2}x  {}",
            marker,
            render::format_elapsed(play_now),
            self.state.speed,
            activity
        );
        if self.writer.loops_completed() > 0 {
            status.push_str(&format!("  cycle {}", self.writer.loops_completed() + 1));
        }
        status
    }
}

/// Render the help modal overlay.
fn render_help_modal(frame: &mut Frame, area: Rect, theme: &Theme) {
    let modal_width = 44.min(area.width.saturating_sub(4));
    let modal_height = 9.min(area.height.saturating_sub(4));
    let x = (area.width - modal_width) / 2;
    let y = (area.height - modal_height) / 2;
    let modal_area = Rect::new(x, y, modal_width, modal_height);

    // Clear the area behind the modal
    frame.render_widget(Clear, modal_area);

    let help = Paragraph::new(build_help_lines(theme))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.accent_style())
                .title(" Keys "),
        )
        .wrap(Wrap { trim: false });

    frame.render_widget(help, modal_area);
}

fn build_help_lines(theme: &Theme) -> Vec<Line<'static>> {
    let key = theme.accent_style();
    let desc = theme.text_style();
    let entry = |k: &str, d: &str| {
        Line::from(vec![
            Span::styled(format!("  {:<8}", k), key),
            Span::styled(d.to_string(), desc),
        ])
    };
    vec![
        Line::from(""),
        entry("space", "pause / resume"),
        entry("+ / -", "faster / slower"),
        entry("?", "toggle this help"),
        entry("q, esc", "quit"),
        entry("ctrl-c", "interrupt"),
    ]
}

#[cfg(not(tarpaulin_include))]
fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    terminal.hide_cursor()?;
    Ok(terminal)
}

#[cfg(not(tarpaulin_include))]
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Play a script interactively in the current terminal.
///
/// `speed` seeds the player's initial rate; `None` starts at 1x.
#[cfg(not(tarpaulin_include))]
pub fn play_script(
    script: &Script,
    config: &Config,
    options: Options,
    title: String,
    speed: Option<f64>,
) -> Result<PlaybackResult> {
    let mut app = PlayerApp::new(script, config, options, title)?;
    if let Some(speed) = speed {
        app.set_speed(speed);
    }
    app.run()
}
