// batchpress-core/src/external/mocks.rs

// --- Mocking Infrastructure (for testing) ---

// Compiled for this crate's own unit tests and, for integration tests and
// downstream test suites, when the "test-mocks" feature is enabled.
#![cfg(any(test, feature = "test-mocks"))]

use super::ToolRunner;
use crate::error::{CoreError, CoreResult};
use crate::util::jobs::CompressJob;

use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

/// Mock implementation of ToolRunner.
///
/// Each call sleeps for `delay`, then either writes a small placeholder file
/// at the job's output path or fails with a `ToolExecution` error if the
/// job's file name was registered with [`MockToolRunner::fail_on`]. It keeps
/// track of how many calls were in flight at once.
#[derive(Debug, Default)]
pub struct MockToolRunner {
    delay: Duration,
    failing: Mutex<HashSet<String>>,
    panicking: Mutex<HashSet<String>>,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
    calls: Mutex<Vec<PathBuf>>,
}

impl MockToolRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Each invocation sleeps this long before finishing.
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay,
            ..Self::default()
        }
    }

    /// Fail jobs whose input file name equals `file_name`.
    pub fn fail_on(self, file_name: &str) -> Self {
        self.failing.lock().unwrap().insert(file_name.to_string());
        self
    }

    /// Panic inside the runner for jobs whose input file name equals `file_name`.
    pub fn panic_on(self, file_name: &str) -> Self {
        self.panicking.lock().unwrap().insert(file_name.to_string());
        self
    }

    /// Highest number of simultaneous `run` calls observed.
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }

    /// Input paths seen, in call order.
    pub fn calls(&self) -> Vec<PathBuf> {
        self.calls.lock().unwrap().clone()
    }

    fn file_name(job: &CompressJob) -> String {
        job.input_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

impl ToolRunner for MockToolRunner {
    fn run(&self, job: &CompressJob) -> CoreResult<()> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(now, Ordering::SeqCst);
        self.calls.lock().unwrap().push(job.input_path.clone());

        thread::sleep(self.delay);

        let name = Self::file_name(job);
        let should_fail = self.failing.lock().unwrap().contains(&name);
        let should_panic = self.panicking.lock().unwrap().contains(&name);

        let result = if should_fail {
            // Leave a partial file behind, as a crashed encoder would.
            let _ = fs::write(&job.output_path, b"partial");
            Err(CoreError::ToolExecution {
                input: job.input_path.clone(),
                code: Some(1),
                stderr: format!("mock failure for {name}"),
            })
        } else {
            fs::write(&job.output_path, b"compressed").map_err(CoreError::from)
        };

        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if should_panic {
            panic!("mock runner panicked on {name}");
        }
        result
    }
}
