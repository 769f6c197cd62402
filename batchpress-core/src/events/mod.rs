use std::path::PathBuf;
use std::sync::Arc;

use crate::reporting::{BatchState, BatchSummary, JobOutcome};

pub mod json_handler;
pub mod recorder;

/// Notifications emitted while a batch runs.
///
/// All events are emitted from the thread driving the batch, never from
/// worker threads, so handlers see them in a single well-defined order.
#[derive(Debug, Clone)]
pub enum Event {
    StateChanged {
        from: BatchState,
        to: BatchState,
    },

    /// Discovery found no video files; the batch ends here.
    NothingToDo {
        input_dir: PathBuf,
    },

    BatchStarted {
        total: usize,
        output_dir: PathBuf,
        max_workers: usize,
    },

    JobStarted {
        job_id: usize,
        relative_path: PathBuf,
        output_path: PathBuf,
    },

    JobCompleted {
        outcome: JobOutcome,
        completed: usize,
        total: usize,
    },

    BatchComplete {
        summary: BatchSummary,
    },
}

pub trait EventHandler: Send + Sync {
    fn handle(&self, event: &Event);
}

pub struct EventDispatcher {
    handlers: Vec<Arc<dyn EventHandler>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    pub fn add_handler(&mut self, handler: Arc<dyn EventHandler>) {
        self.handlers.push(handler);
    }

    pub fn emit(&self, event: Event) {
        for handler in &self.handlers {
            handler.handle(&event);
        }
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}
