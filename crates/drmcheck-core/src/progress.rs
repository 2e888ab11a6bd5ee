//! Progress tracking for audit runs
//!
//! Converts "one more unit completed" events into elapsed/ETA figures.

use crate::{Error, Result};
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Snapshot emitted after each completed unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressEvent {
    pub completed: usize,
    pub total: usize,
    pub elapsed: Duration,
    pub eta: Duration,
}

impl std::fmt::Display for ProgressEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}/{}] Elapsed: {} | ETA: {}",
            self.completed,
            self.total,
            format_clock(self.elapsed),
            format_clock(self.eta)
        )
    }
}

/// Receiver of progress events
pub trait ProgressSink: Send + Sync {
    fn on_progress(&self, event: &ProgressEvent);
}

impl<F> ProgressSink for F
where
    F: Fn(&ProgressEvent) + Send + Sync,
{
    fn on_progress(&self, event: &ProgressEvent) {
        self(event)
    }
}

/// Sink that discards events
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn on_progress(&self, _event: &ProgressEvent) {}
}

/// Thread-safe completion counter with ETA estimation
#[derive(Debug)]
pub struct ProgressTracker {
    total: usize,
    start_time: Instant,
    completed: Mutex<usize>,
}

impl ProgressTracker {
    pub fn new(total: usize) -> Self {
        Self::starting_at(total, Instant::now())
    }

    /// Tracker with an explicit start time
    pub fn starting_at(total: usize, start_time: Instant) -> Self {
        Self {
            total,
            start_time,
            completed: Mutex::new(0),
        }
    }

    pub fn completed(&self) -> usize {
        *self.completed.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Record one completed unit and return the updated estimate.
    ///
    /// Increment and read happen under one lock, so concurrent callers always
    /// observe distinct counts. Fails once `total` units have been recorded.
    pub fn report_completion(&self) -> Result<ProgressEvent> {
        let mut completed = self.completed.lock().unwrap_or_else(|e| e.into_inner());
        if *completed >= self.total {
            return Err(Error::ProgressOverflow { total: self.total });
        }
        *completed += 1;

        let elapsed = self.start_time.elapsed();
        let eta = estimate_remaining(elapsed, *completed, self.total - *completed);

        Ok(ProgressEvent {
            completed: *completed,
            total: self.total,
            elapsed,
            eta,
        })
    }
}

/// Average time per completed unit times the units left; saturates at `Duration::MAX`
fn estimate_remaining(elapsed: Duration, completed: usize, remaining: usize) -> Duration {
    if completed == 0 || remaining == 0 {
        return Duration::ZERO;
    }
    let secs = elapsed.as_secs_f64() * (remaining as f64 / completed as f64);
    Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX)
}

/// Format a duration as `MM:SS`; minutes are not wrapped at 60
pub fn format_clock(duration: Duration) -> String {
    let secs = duration.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
