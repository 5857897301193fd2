// ABOUTME: Output formatting for CLI feedback.
// ABOUTME: Supports normal, quiet (CI), and JSON output modes.

use crate::lifecycle::RunOutcome;
use serde::Serialize;
use std::io::{self, Write};
use std::time::Instant;

/// Output mode for CLI feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Daemon progress and human-friendly messages
    Normal,
    /// Only the final result
    Quiet,
    /// JSON lines for scripting
    Json,
}

/// Handles CLI output based on the configured mode.
pub struct Output {
    mode: OutputMode,
    start_time: Option<Instant>,
}

impl Output {
    pub fn new(mode: OutputMode) -> Self {
        Self {
            mode,
            start_time: None,
        }
    }

    /// Start timing an operation.
    pub fn start_timer(&mut self) {
        self.start_time = Some(Instant::now());
    }

    /// Get elapsed time since timer started.
    pub fn elapsed_secs(&self) -> f64 {
        self.start_time
            .map(|t| t.elapsed().as_secs_f64())
            .unwrap_or(0.0)
    }

    fn duration(&self) -> Option<f64> {
        self.start_time.map(|_| self.elapsed_secs())
    }

    /// Where streamed daemon output (build and push logs) should go.
    pub fn relay(&self) -> Box<dyn Write + Send> {
        match self.mode {
            OutputMode::Normal => Box::new(io::stdout()),
            OutputMode::Quiet | OutputMode::Json => Box::new(io::sink()),
        }
    }

    /// Print a progress message (suppressed in quiet/json mode).
    pub fn progress(&self, message: &str) {
        if self.mode == OutputMode::Normal {
            println!("{message}");
        }
    }

    /// Print a success message with optional timing.
    pub fn success(&self, message: &str) {
        match self.mode {
            OutputMode::Normal => match self.duration() {
                Some(elapsed) => println!("{message} ({:.1}s)", elapsed),
                None => println!("{message}"),
            },
            OutputMode::Quiet => println!("{message}"),
            OutputMode::Json => emit(&JsonEvent {
                event: "success",
                message,
                container: None,
                exit_status: None,
                duration_secs: self.duration(),
            }),
        }
    }

    /// Print the result of a run: the handle or the exit status line.
    pub fn outcome(&self, outcome: &RunOutcome) {
        if self.mode != OutputMode::Json {
            println!("{outcome}");
            return;
        }

        let (event, container, exit_status) = match outcome {
            RunOutcome::Detached(id) => ("detached", Some(id.as_str()), None),
            RunOutcome::Exited(status) => ("exited", None, Some(status.code())),
        };
        emit(&JsonEvent {
            event,
            message: &outcome.to_string(),
            container,
            exit_status,
            duration_secs: self.duration(),
        });
    }

    /// Print an error message.
    pub fn error(&self, message: &str) {
        match self.mode {
            OutputMode::Normal | OutputMode::Quiet => {
                eprintln!("Error: {message}");
            }
            OutputMode::Json => {
                let event = JsonEvent {
                    event: "error",
                    message,
                    container: None,
                    exit_status: None,
                    duration_secs: self.duration(),
                };
                if let Ok(json) = serde_json::to_string(&event) {
                    eprintln!("{json}");
                }
            }
        }
    }
}

fn emit(event: &JsonEvent<'_>) {
    if let Ok(json) = serde_json::to_string(event) {
        println!("{json}");
    }
}

#[derive(Serialize)]
struct JsonEvent<'a> {
    event: &'a str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    container: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    exit_status: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    duration_secs: Option<f64>,
}
