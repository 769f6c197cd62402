//! Bounded-concurrency dispatch of compression jobs.
//!
//! Jobs are queued into a dedicated rayon thread pool with exactly
//! `max_workers` threads, so at most that many tool invocations are ever in
//! flight. Each worker reports back over an mpsc channel; the calling thread
//! drains the channel and is the only place outcomes are counted.
//!
//! Per-job errors never escape a worker. They are classified into the job's
//! [`JobOutcome`], and a panicking runner is caught and recorded the same
//! way, so the number of outcomes always equals the number of jobs.

use std::any::Any;
use std::fs;
use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc;
use std::time::Instant;

use log::{debug, warn};

use crate::config::CoreConfig;
use crate::discovery::find_video_files;
use crate::error::{CoreError, CoreResult};
use crate::events::{Event, EventDispatcher};
use crate::external::ToolRunner;
use crate::reporting::{BatchAggregator, BatchState, BatchSummary, JobFailure, JobOutcome};
use crate::util::jobs::{CompressJob, build_jobs};
use crate::utils::{display_name, format_elapsed, is_same_file};

/// Messages sent from workers to the aggregating thread.
#[derive(Debug)]
pub enum WorkerMessage {
    /// The worker picked the job up and is about to run it.
    Started {
        job_id: usize,
        relative_path: PathBuf,
        output_path: PathBuf,
    },
    Finished(JobOutcome),
}

/// Runs a single job to completion on the current thread.
///
/// Checks the input still exists, creates the output's parent directory,
/// invokes the runner and times the whole attempt. Never returns an error:
/// every failure ends up in the outcome.
pub fn run_job(job: &CompressJob, runner: &dyn ToolRunner) -> JobOutcome {
    let started = Instant::now();
    let result = execute(job, runner);
    let elapsed = started.elapsed();

    let failure = match result {
        Ok(()) => None,
        Err(err) => {
            if matches!(
                err,
                CoreError::ToolExecution { .. } | CoreError::WorkerPanic { .. }
            ) {
                remove_partial_output(job);
            }
            Some(JobFailure::from(&err))
        }
    };

    JobOutcome {
        job_id: job.id,
        input_path: job.input_path.clone(),
        output_path: job.output_path.clone(),
        relative_path: job.relative_path.clone(),
        elapsed,
        failure,
    }
}

fn execute(job: &CompressJob, runner: &dyn ToolRunner) -> CoreResult<()> {
    if !job.input_path.is_file() {
        return Err(CoreError::InputMissing(job.input_path.clone()));
    }

    job.ensure_output_parent()?;

    debug!("Started compressing: {}", display_name(&job.input_path));

    match panic::catch_unwind(AssertUnwindSafe(|| runner.run(job))) {
        Ok(result) => result,
        Err(payload) => Err(CoreError::WorkerPanic {
            input: job.input_path.clone(),
            message: panic_message(payload.as_ref()),
        }),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// A failed invocation must not leave a file that looks like a finished output.
///
/// Never touches the input: if the output path turns out to name the input
/// file, the tool failed because of that and there is nothing partial to
/// remove.
fn remove_partial_output(job: &CompressJob) {
    if is_same_file(&job.output_path, &job.input_path) {
        warn!(
            "Not removing {}: output path is the input file",
            job.output_path.display()
        );
        return;
    }
    if job.output_path.is_file() {
        match fs::remove_file(&job.output_path) {
            Ok(()) => debug!("Removed partial output {}", job.output_path.display()),
            Err(e) => warn!(
                "Could not remove partial output {}: {}",
                job.output_path.display(),
                e
            ),
        }
    }
}

/// Runs every job through a pool of `max_workers` threads.
///
/// `on_message` is called on the current thread, in completion order, for
/// each worker message. Returns once every job has reported `Finished`.
pub fn dispatch_jobs<F>(
    jobs: Vec<CompressJob>,
    max_workers: usize,
    runner: Arc<dyn ToolRunner>,
    mut on_message: F,
) -> CoreResult<()>
where
    F: FnMut(WorkerMessage),
{
    if max_workers == 0 {
        return Err(CoreError::Config(
            "max_workers must be at least 1".to_string(),
        ));
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(max_workers)
        .thread_name(|index| format!("batchpress-worker-{index}"))
        .build()
        .map_err(|e| CoreError::ThreadPool(e.to_string()))?;

    let submitted = jobs.len();
    let (tx, rx) = mpsc::channel();

    for job in jobs {
        let tx = tx.clone();
        let runner = Arc::clone(&runner);
        pool.spawn(move || {
            // The receiver outlives every worker; a send can only fail if
            // the caller's callback panicked, in which case nobody listens.
            let _ = tx.send(WorkerMessage::Started {
                job_id: job.id,
                relative_path: job.relative_path.clone(),
                output_path: job.output_path.clone(),
            });
            let outcome = run_job(&job, runner.as_ref());
            let _ = tx.send(WorkerMessage::Finished(outcome));
        });
    }
    drop(tx);

    let mut finished = 0;
    for message in rx {
        if matches!(message, WorkerMessage::Finished(_)) {
            finished += 1;
        }
        on_message(message);
    }

    debug_assert_eq!(finished, submitted, "every job reports exactly once");
    debug!("All {} job(s) reported back", finished);
    Ok(())
}

/// Tracks and announces the whole-batch state.
struct StateTracker<'a> {
    state: BatchState,
    events: &'a EventDispatcher,
}

impl<'a> StateTracker<'a> {
    fn new(events: &'a EventDispatcher) -> Self {
        Self {
            state: BatchState::Idle,
            events,
        }
    }

    fn advance(&mut self, to: BatchState) {
        if self.state == to {
            return;
        }
        debug!("Batch state: {:?} -> {:?}", self.state, to);
        self.events.emit(Event::StateChanged {
            from: self.state,
            to,
        });
        self.state = to;
    }
}

/// Compresses every video under `config.input_dir` into `config.output_dir`.
///
/// Returns `Err` only for setup failures: invalid configuration (including
/// an output root that resolves to, or lies inside, the input root), a
/// missing input directory, an output root that cannot be created, or a
/// worker pool that cannot be built. Individual job failures are reported through
/// `events` and counted in the returned summary.
///
/// ```rust,no_run
/// use batchpress_core::{CoreConfig, EventDispatcher, FfmpegRunner, process_videos};
/// use std::path::PathBuf;
/// use std::sync::Arc;
///
/// let config = CoreConfig::new(PathBuf::from("raw"), PathBuf::from("compressed"));
/// let runner = Arc::new(FfmpegRunner::new(&config.tool_path));
/// let summary = process_videos(&config, runner, &EventDispatcher::new()).unwrap();
/// println!("{} of {} succeeded", summary.succeeded, summary.total);
/// ```
pub fn process_videos(
    config: &CoreConfig,
    runner: Arc<dyn ToolRunner>,
    events: &EventDispatcher,
) -> CoreResult<BatchSummary> {
    config.validate()?;

    let batch_start = Instant::now();
    let mut state = StateTracker::new(events);

    state.advance(BatchState::Discovering);
    config.validate_roots()?;
    let videos = find_video_files(&config.input_dir)?;

    if videos.is_empty() {
        debug!("No video files found in {}", config.input_dir.display());
        events.emit(Event::NothingToDo {
            input_dir: config.input_dir.clone(),
        });
        state.advance(BatchState::Done);
        return Ok(BatchSummary::empty(batch_start.elapsed()));
    }

    fs::create_dir_all(&config.output_dir).map_err(|e| {
        CoreError::PathError(format!(
            "Failed to create output directory '{}': {}",
            config.output_dir.display(),
            e
        ))
    })?;

    let jobs = build_jobs(videos, &config.output_dir, &config.profile);
    let total = jobs.len();
    let max_workers = config.max_workers.min(total);

    debug!(
        "Starting parallel compression of {} video(s) with up to {} worker(s)",
        total, max_workers
    );
    events.emit(Event::BatchStarted {
        total,
        output_dir: config.output_dir.clone(),
        max_workers,
    });
    state.advance(BatchState::Dispatching);

    let mut aggregator = BatchAggregator::new(total, events);
    dispatch_jobs(jobs, max_workers, runner, |message| match message {
        WorkerMessage::Started {
            job_id,
            relative_path,
            output_path,
        } => events.emit(Event::JobStarted {
            job_id,
            relative_path,
            output_path,
        }),
        WorkerMessage::Finished(outcome) => {
            state.advance(BatchState::Aggregating);
            match &outcome.failure {
                None => debug!(
                    "Compressed {} in {}",
                    outcome.relative_path.display(),
                    format_elapsed(outcome.elapsed)
                ),
                Some(failure) => debug!(
                    "Failed to compress {}: {}",
                    outcome.relative_path.display(),
                    failure.message
                ),
            }
            aggregator.record(outcome);
        }
    })?;

    debug_assert!(aggregator.is_complete(), "every job reports exactly once");
    let summary = aggregator.finish();
    state.advance(BatchState::Done);

    debug!(
        "Batch finished: {} succeeded, {} failed, {} total in {}",
        summary.succeeded,
        summary.failed,
        summary.total,
        format_elapsed(summary.total_elapsed)
    );
    Ok(summary)
}
