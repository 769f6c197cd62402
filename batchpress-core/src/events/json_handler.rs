//! JSON progress handler for structured progress output
//!
//! Writes one JSON object per event, one per line, for consumption by
//! scripts and other tools wrapping batchpress.

use super::{Event, EventHandler};
use serde_json::json;
use std::io::{self, Write};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

/// Event handler that outputs progress events as structured JSON to stdout
pub struct JsonProgressHandler {
    output: Mutex<Box<dyn Write + Send>>,
}

impl JsonProgressHandler {
    /// Create a new JSON progress handler that writes to stdout
    pub fn new() -> Self {
        Self {
            output: Mutex::new(Box::new(io::stdout())),
        }
    }

    /// Create a new JSON progress handler with a custom writer
    pub fn with_writer(writer: Box<dyn Write + Send>) -> Self {
        Self {
            output: Mutex::new(writer),
        }
    }

    /// Get current timestamp as seconds since Unix epoch
    fn get_timestamp() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs()
    }

    /// Write a JSON progress event to the output
    fn write_json(&self, value: serde_json::Value) {
        if let Ok(mut output) = self.output.lock() {
            if let Ok(json_str) = serde_json::to_string(&value) {
                let _ = writeln!(output, "{}", json_str);
                let _ = output.flush();
            }
        }
    }

    fn to_value(event: &Event, timestamp: u64) -> serde_json::Value {
        match event {
            Event::StateChanged { from, to } => json!({
                "type": "state_changed",
                "from": from,
                "to": to,
                "timestamp": timestamp
            }),

            Event::NothingToDo { input_dir } => json!({
                "type": "nothing_to_do",
                "input_dir": input_dir,
                "timestamp": timestamp
            }),

            Event::BatchStarted {
                total,
                output_dir,
                max_workers,
            } => json!({
                "type": "batch_started",
                "total": total,
                "output_dir": output_dir,
                "max_workers": max_workers,
                "timestamp": timestamp
            }),

            Event::JobStarted {
                job_id,
                relative_path,
                output_path,
            } => json!({
                "type": "job_started",
                "job_id": job_id,
                "file": relative_path,
                "output_path": output_path,
                "timestamp": timestamp
            }),

            Event::JobCompleted {
                outcome,
                completed,
                total,
            } => json!({
                "type": "job_completed",
                "job_id": outcome.job_id,
                "file": outcome.relative_path,
                "output_path": outcome.output_path,
                "succeeded": outcome.succeeded(),
                "elapsed_seconds": outcome.elapsed.as_secs_f64(),
                "error": outcome.failure,
                "completed": completed,
                "total": total,
                "timestamp": timestamp
            }),

            Event::BatchComplete { summary } => json!({
                "type": "batch_complete",
                "total": summary.total,
                "succeeded": summary.succeeded,
                "failed": summary.failed,
                "total_elapsed_seconds": summary.total_elapsed.as_secs_f64(),
                "failures": summary.failures,
                "timestamp": timestamp
            }),
        }
    }
}

impl Default for JsonProgressHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl EventHandler for JsonProgressHandler {
    fn handle(&self, event: &Event) {
        self.write_json(Self::to_value(event, Self::get_timestamp()));
    }
}
