// Copyright 2025 the ScatterViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The line-oriented command stream and the session that runs it.
//!
//! One command per line:
//!
//! ```text
//! click x <field>      click y <field>      click-at <x> <y>
//! hover <x> <y>        leave                advance <ms>
//! resize <w> <h>       snapshot <path>      state
//! ```
//!
//! Blank lines and lines starting with `#` are skipped.

use std::fs;
use std::io;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use kurbo::Point;
use thiserror::Error;
use tracing::{debug, info};

use crate::coordinator::{Event, Outcome};
use crate::field::{Axis, FieldError, XField, YField};
use crate::host::Host;
use crate::scales::ScaleError;

/// Errors raised while parsing a command line.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// The first word is not a command.
    #[error("unknown command `{0}`")]
    Unknown(String),

    /// The command has the wrong number of arguments.
    #[error("`{command}` expects {expected}")]
    Arity {
        /// Command name.
        command: &'static str,
        /// Human-readable argument list.
        expected: &'static str,
    },

    /// An argument is not a number.
    #[error("invalid number `{0}`")]
    Number(String),

    /// `click` names an axis other than `x` or `y`.
    #[error("unknown axis `{0}`")]
    Axis(String),

    /// A field name does not belong to the axis.
    #[error(transparent)]
    Field(#[from] FieldError),
}

/// One parsed command.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Click the x title for a field.
    ClickX(XField),
    /// Click the y title for a field.
    ClickY(YField),
    /// Click at a canvas point.
    ClickAt(Point),
    /// Move the pointer to a canvas point.
    Hover(Point),
    /// Move the pointer off the canvas.
    Leave,
    /// Advance the virtual clock.
    Advance(Duration),
    /// Resize the window.
    Resize(f64, f64),
    /// Write an SVG snapshot of the current frame.
    Snapshot(PathBuf),
    /// Print the selection and popup state.
    State,
}

impl Command {
    /// Parses one line. Returns `Ok(None)` for blank lines and comments.
    pub fn parse_line(line: &str) -> Result<Option<Self>, CommandError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }
        line.parse().map(Some)
    }
}

fn number(s: &str) -> Result<f64, CommandError> {
    s.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| CommandError::Number(s.to_string()))
}

fn point(command: &'static str, args: &[&str]) -> Result<Point, CommandError> {
    match args {
        [x, y] => Ok(Point::new(number(x)?, number(y)?)),
        _ => Err(CommandError::Arity {
            command,
            expected: "<x> <y>",
        }),
    }
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let head = words.next().unwrap_or_default();
        let args: Vec<&str> = words.collect();
        match head {
            "click" => match args.as_slice() {
                ["x", field] => Ok(Self::ClickX(field.parse()?)),
                ["y", field] => Ok(Self::ClickY(field.parse()?)),
                [axis, _] => Err(CommandError::Axis((*axis).to_string())),
                _ => Err(CommandError::Arity {
                    command: "click",
                    expected: "<x|y> <field>",
                }),
            },
            "click-at" => point("click-at", &args).map(Self::ClickAt),
            "hover" => point("hover", &args).map(Self::Hover),
            "leave" if args.is_empty() => Ok(Self::Leave),
            "leave" => Err(CommandError::Arity {
                command: "leave",
                expected: "no arguments",
            }),
            "advance" => match args.as_slice() {
                [ms] => {
                    let ms: u64 = ms
                        .parse()
                        .map_err(|_| CommandError::Number((*ms).to_string()))?;
                    Ok(Self::Advance(Duration::from_millis(ms)))
                }
                _ => Err(CommandError::Arity {
                    command: "advance",
                    expected: "<ms>",
                }),
            },
            "resize" => point("resize", &args).map(|p| Self::Resize(p.x, p.y)),
            "snapshot" => match args.as_slice() {
                [path] => Ok(Self::Snapshot(PathBuf::from(path))),
                _ => Err(CommandError::Arity {
                    command: "snapshot",
                    expected: "<path>",
                }),
            },
            "state" if args.is_empty() => Ok(Self::State),
            "state" => Err(CommandError::Arity {
                command: "state",
                expected: "no arguments",
            }),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

/// Errors raised while running a command.
#[derive(Error, Debug)]
pub enum SessionError {
    /// The chart could not be rebuilt.
    #[error(transparent)]
    Scale(#[from] ScaleError),

    /// A snapshot was requested before anything was mounted.
    #[error("no chart is mounted")]
    NotMounted,

    /// A snapshot could not be written.
    #[error("failed to write {path}: {source}")]
    Write {
        /// Target path.
        path: PathBuf,
        /// Underlying error.
        source: io::Error,
    },
}

/// What a command produced.
#[derive(Clone, Debug, PartialEq)]
pub enum Reply {
    /// An event was dispatched.
    Dispatched(Outcome),
    /// The clock moved.
    Advanced(Duration),
    /// The chart was rebuilt.
    Resized,
    /// A snapshot was written.
    Written(PathBuf),
    /// A state report.
    State(String),
}

/// A host plus its virtual clock.
#[derive(Debug)]
pub struct Session {
    host: Host,
    now: Duration,
}

impl Session {
    /// Wraps a (usually already mounted) host. The clock starts at zero.
    pub fn new(host: Host) -> Self {
        Self {
            host,
            now: Duration::ZERO,
        }
    }

    /// The host.
    pub fn host(&self) -> &Host {
        &self.host
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Runs one command.
    pub fn apply(&mut self, command: Command) -> Result<Reply, SessionError> {
        let event = match command {
            Command::ClickX(field) => Event::ClickXLabel(field),
            Command::ClickY(field) => Event::ClickYLabel(field),
            Command::ClickAt(p) => Event::ClickAt(p),
            Command::Hover(p) => Event::PointerMove(p),
            Command::Leave => Event::PointerLeave,
            Command::Advance(dt) => {
                self.now += dt;
                return Ok(Reply::Advanced(self.now));
            }
            Command::Resize(w, h) => {
                self.host.resize(w, h, self.now)?;
                return Ok(Reply::Resized);
            }
            Command::Snapshot(path) => {
                let svg = self
                    .host
                    .snapshot(self.now)
                    .ok_or(SessionError::NotMounted)?;
                fs::write(&path, svg).map_err(|source| SessionError::Write {
                    path: path.clone(),
                    source,
                })?;
                info!(path = %path.display(), at_ms = self.now.as_millis(), "wrote snapshot");
                return Ok(Reply::Written(path));
            }
            Command::State => return Ok(Reply::State(self.state())),
        };
        let outcome = self.host.dispatch(event, self.now);
        if let Outcome::Reselected { axis, diffs } = &outcome {
            debug!(%axis, changed = diffs.len(), "dispatched");
        }
        Ok(Reply::Dispatched(outcome))
    }

    fn state(&self) -> String {
        let Some(chart) = self.host.chart() else {
            return "unmounted".to_string();
        };
        let sel = chart.selection();
        let mut out = format!(
            "{}={} {}={} t={}ms",
            Axis::X,
            sel.x,
            Axis::Y,
            sel.y,
            self.now.as_millis()
        );
        if chart.is_animating(self.now) {
            out.push_str(" animating");
        }
        if let Some(popup) = chart.popup() {
            out.push_str(&format!(" popup={}", popup.html));
        }
        out
    }
}
