// ABOUTME: Output formatting for session feedback.
// ABOUTME: Supports normal, quiet (CI), and JSON output modes.

use crate::session::SessionState;
use crate::types::Percent;
use serde::Serialize;
use std::time::Instant;

const BAR_WIDTH: usize = 20;

/// Output mode for CLI feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-friendly output with log lines and progress bars
    Normal,
    /// Minimal output for CI (only final result)
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

    /// Print an informational message (suppressed in quiet/json mode).
    pub fn message(&self, message: &str) {
        if self.mode == OutputMode::Normal {
            println!("{message}");
        }
    }

    /// Print one line of the session log.
    pub fn log_line(&self, line: &str) {
        match self.mode {
            OutputMode::Normal => println!("{line}"),
            OutputMode::Quiet => {}
            OutputMode::Json => emit(&JsonEvent {
                event: "log",
                message: Some(line),
                ..JsonEvent::default()
            }),
        }
    }

    /// Print both progress readings.
    pub fn progress(&self, layer: Percent, overall: Percent) {
        match self.mode {
            OutputMode::Normal => println!(
                "  layer   {} {:>4}\n  overall {} {:>4}",
                bar(layer),
                layer,
                bar(overall),
                overall
            ),
            OutputMode::Quiet => {}
            OutputMode::Json => emit(&JsonEvent {
                event: "progress",
                layer: Some(layer.value()),
                overall: Some(overall.value()),
                ..JsonEvent::default()
            }),
        }
    }

    /// Announce a session state change.
    pub fn state(&self, state: SessionState) {
        match self.mode {
            OutputMode::Normal => println!("[{state}]"),
            OutputMode::Quiet => {}
            OutputMode::Json => emit(&JsonEvent {
                event: "state",
                state: Some(state),
                duration_secs: self.duration(),
                ..JsonEvent::default()
            }),
        }
    }

    /// Print a success message with optional timing.
    pub fn success(&self, message: &str) {
        match self.mode {
            OutputMode::Normal => {
                let elapsed = self.elapsed_secs();
                if elapsed > 0.0 {
                    println!("{message} ({:.1}s)", elapsed);
                } else {
                    println!("{message}");
                }
            }
            OutputMode::Quiet => {
                // Print only the essential result
                println!("{message}");
            }
            OutputMode::Json => emit(&JsonEvent {
                event: "success",
                message: Some(message),
                duration_secs: self.duration(),
                ..JsonEvent::default()
            }),
        }
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
                    message: Some(message),
                    duration_secs: self.duration(),
                    ..JsonEvent::default()
                };
                if let Ok(json) = serde_json::to_string(&event) {
                    eprintln!("{json}");
                }
            }
        }
    }
}

fn bar(value: Percent) -> String {
    let filled = usize::from(value.value()) * BAR_WIDTH / 100;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

fn emit(event: &JsonEvent<'_>) {
    if let Ok(json) = serde_json::to_string(event) {
        println!("{json}");
    }
}

#[derive(Serialize, Default)]
struct JsonEvent<'a> {
    event: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    layer: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    overall: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    state: Option<SessionState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    duration_secs: Option<f64>,
}
