//! .twl script format parser and writer
//!
//! A script is JSON Lines: a header object on the first line, then one
//! step per line. Steps are arrays in playback order:
//!
//! ```text
//! {"version":1,"title":"greeting","type_delay":150}
//! [0,"w","Hello"]
//! [500,"l"]
//! [0,"w","Goodbye"]
//! ```
//!
//! Step codes: `"w"` write text, `"e"` erase a character count, `"l"`
//! erase the last instruction's text, `"a"` erase everything. The first
//! element of each array is the step's pre-delay in milliseconds.
//!
//! Header fields other than `version` are optional; the playback fields
//! overlay a writer's [`Options`] (command-line flags still win, see the
//! play command).

use std::fs;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::surface::Surface;
use crate::writer::{Options, Writer, WriterError};

/// Script header: format version plus optional presentation and playback
/// fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub version: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    /// Text pre-seeded into the region before playback.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_text: Option<String>,
    /// Per-character delay in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_delay: Option<u64>,
    #[serde(rename = "loop", skip_serializing_if = "Option::is_none")]
    pub looping: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loop_from: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hide_cursor_on_end: Option<bool>,
}

impl Header {
    pub fn new() -> Self {
        Self {
            version: 1,
            title: None,
            target: None,
            initial_text: None,
            type_delay: None,
            looping: None,
            loop_from: None,
            hide_cursor_on_end: None,
        }
    }
}

impl Default for Header {
    fn default() -> Self {
        Self::new()
    }
}

/// What a step does when queued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepKind {
    Write(String),
    Erase(usize),
    EraseLast,
    EraseAll,
}

impl StepKind {
    pub fn code(&self) -> &'static str {
        match self {
            StepKind::Write(_) => "w",
            StepKind::Erase(_) => "e",
            StepKind::EraseLast => "l",
            StepKind::EraseAll => "a",
        }
    }
}

/// One script step: a pre-delay plus the queued action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// Delay before this step's instruction begins, in milliseconds.
    pub delay_ms: u64,
    pub kind: StepKind,
}

impl Step {
    pub fn write(delay_ms: u64, text: impl Into<String>) -> Self {
        Self {
            delay_ms,
            kind: StepKind::Write(text.into()),
        }
    }

    pub fn erase(delay_ms: u64, count: usize) -> Self {
        Self {
            delay_ms,
            kind: StepKind::Erase(count),
        }
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    /// Parse a step from a JSON line.
    pub fn from_json(line: &str) -> Result<Self> {
        let value: serde_json::Value =
            serde_json::from_str(line).context("Failed to parse step JSON")?;

        let arr = value.as_array().context("Step must be a JSON array")?;

        if arr.len() < 2 {
            bail!("Step array must have at least 2 elements");
        }

        let delay_ms = arr[0]
            .as_u64()
            .context("Step delay must be a non-negative integer")?;

        let code = arr[1].as_str().context("Step code must be a string")?;

        let kind = match code {
            "w" => {
                let text = arr
                    .get(2)
                    .and_then(serde_json::Value::as_str)
                    .context("Write step needs a text payload")?;
                StepKind::Write(text.to_string())
            }
            "e" => {
                let count = arr
                    .get(2)
                    .and_then(serde_json::Value::as_u64)
                    .context("Erase step needs a character count")?;
                StepKind::Erase(count as usize)
            }
            "l" => StepKind::EraseLast,
            "a" => StepKind::EraseAll,
            _ => bail!("Unknown step code: {}", code),
        };

        Ok(Step { delay_ms, kind })
    }

    /// Convert the step to a JSON line.
    pub fn to_json(&self) -> String {
        let value = match &self.kind {
            StepKind::Write(text) => serde_json::json!([self.delay_ms, "w", text]),
            StepKind::Erase(count) => serde_json::json!([self.delay_ms, "e", count]),
            StepKind::EraseLast => serde_json::json!([self.delay_ms, "l"]),
            StepKind::EraseAll => serde_json::json!([self.delay_ms, "a"]),
        };
        serde_json::to_string(&value).unwrap()
    }
}

/// Complete script file representation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Script {
    pub header: Header,
    pub steps: Vec<Step>,
}

impl Script {
    /// Create an empty script with the given header.
    pub fn new(header: Header) -> Self {
        Self {
            header,
            steps: Vec::new(),
        }
    }

    /// Parse a script from a path.
    pub fn parse<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file =
            fs::File::open(path).with_context(|| format!("Failed to open script: {:?}", path))?;
        let reader = BufReader::new(file);

        Self::parse_reader(reader)
    }

    /// Parse a script from a reader.
    pub fn parse_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut lines = reader.lines();

        // First line is the header
        let header_line = lines
            .next()
            .context("Script is empty")?
            .context("Failed to read header line")?;

        let header: Header =
            serde_json::from_str(&header_line).context("Failed to parse script header")?;

        if header.version != 1 {
            bail!(
                "Only script version 1 is supported (got version {})",
                header.version
            );
        }

        // Remaining lines are steps
        let mut steps = Vec::new();
        for (line_num, line_result) in lines.enumerate() {
            let line =
                line_result.with_context(|| format!("Failed to read line {}", line_num + 2))?;

            if line.trim().is_empty() {
                continue;
            }

            let step = Step::from_json(&line)
                .with_context(|| format!("Failed to parse step on line {}", line_num + 2))?;
            steps.push(step);
        }

        Ok(Script { header, steps })
    }

    /// Parse from a string.
    pub fn parse_str(content: &str) -> Result<Self> {
        let reader = BufReader::new(content.as_bytes());
        Self::parse_reader(reader)
    }

    /// Write the script to a path.
    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let mut file = fs::File::create(path)
            .with_context(|| format!("Failed to create script: {:?}", path))?;

        self.write_to(&mut file)
    }

    /// Write the script to a writer.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        let header_json =
            serde_json::to_string(&self.header).context("Failed to serialize header")?;
        writeln!(writer, "{}", header_json)?;

        for step in &self.steps {
            writeln!(writer, "{}", step.to_json())?;
        }

        Ok(())
    }

    /// Render to a string.
    pub fn to_string(&self) -> Result<String> {
        let mut buffer = Vec::new();
        self.write_to(&mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }

    /// Overlay the header's playback fields onto base options. Absent
    /// fields leave the base value untouched.
    pub fn options_over(&self, base: Options) -> Options {
        let mut options = base;
        if let Some(target) = &self.header.target {
            options.target = target.clone();
        }
        if let Some(ms) = self.header.type_delay {
            options.type_delay = Duration::from_millis(ms);
        }
        if let Some(looping) = self.header.looping {
            options.looping = looping;
        }
        if let Some(loop_from) = self.header.loop_from {
            options.loop_from = loop_from;
        }
        if let Some(hide) = self.header.hide_cursor_on_end {
            options.hide_cursor_on_end = hide;
        }
        options
    }

    /// Queue every step onto a writer, in order.
    pub fn apply<S: Surface>(&self, writer: &mut Writer<S>) -> Result<(), WriterError> {
        for step in &self.steps {
            let delay = step.delay();
            match &step.kind {
                StepKind::Write(text) => {
                    writer.write(text, delay)?;
                }
                StepKind::Erase(count) => {
                    writer.erase(*count, delay)?;
                }
                StepKind::EraseLast => {
                    writer.erase_last(delay)?;
                }
                StepKind::EraseAll => {
                    writer.erase_all(delay)?;
                }
            }
        }
        Ok(())
    }
}
