//! Concurrent dispatcher - main orchestrator for audit runs
//!
//! Coordinates:
//! - Column validation of the input rows
//! - Fan-out of one classification task per non-empty URL
//! - Bounded concurrency through a fixed pool of worker permits
//! - Order-preserving result assembly
//! - Progress events

use crate::{
    input::ensure_columns,
    progress::{NoProgress, ProgressSink, ProgressTracker},
    AuditConfig, ColumnVerdict, Error, ManifestClassifier, Result, Row, RowResult, UrlSlot,
    Verdict,
};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, instrument};

/// One unit of work: a single URL cell
#[derive(Debug)]
struct Task {
    row: usize,
    slot: UrlSlot,
    url: String,
}

/// Runs classification over a batch of rows with a fixed-size worker pool
pub struct Dispatcher {
    classifier: ManifestClassifier,
    config: AuditConfig,
}

impl Dispatcher {
    /// Create a dispatcher. Fails if the configuration is invalid.
    pub fn new(classifier: ManifestClassifier, config: AuditConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { classifier, config })
    }

    /// Dispatcher backed by the HTTP fetcher
    pub fn http(config: AuditConfig) -> Result<Self> {
        config.validate()?;
        let classifier = ManifestClassifier::http(&config)?;
        Ok(Self { classifier, config })
    }

    /// Audit all rows without progress reporting
    pub async fn run(&self, rows: &[Row]) -> Result<Vec<RowResult>> {
        self.run_with_progress(rows, &NoProgress).await
    }

    /// Audit all rows, emitting one progress event per completed fetch.
    ///
    /// Results are returned in input order regardless of completion order.
    /// Rows missing a designated column fail the whole run before any
    /// request is sent.
    #[instrument(skip_all, fields(rows = rows.len()))]
    pub async fn run_with_progress(
        &self,
        rows: &[Row],
        progress: &dyn ProgressSink,
    ) -> Result<Vec<RowResult>> {
        let columns = self.config.columns();
        ensure_columns(rows, &columns)?;

        let mut slots: Vec<[Option<Verdict>; 2]> = vec![[None, None]; rows.len()];
        let mut tasks = Vec::new();

        // Row-major: row 0 both columns, then row 1, ...
        for (index, row) in rows.iter().enumerate() {
            for slot in UrlSlot::ALL {
                let url = row.get(self.config.column(slot)).unwrap_or_default().trim();
                if url.is_empty() {
                    slots[index][slot_index(slot)] = Some(Verdict::not_checked());
                } else {
                    tasks.push(Task {
                        row: index,
                        slot,
                        url: url.to_string(),
                    });
                }
            }
        }

        let tracker = ProgressTracker::new(tasks.len());
        info!(
            rows = rows.len(),
            tasks = tasks.len(),
            workers = self.config.max_workers,
            "Starting DRM audit"
        );

        let permits = Arc::new(Semaphore::new(self.config.max_workers));
        let mut set = JoinSet::new();

        for task in tasks {
            let permits = permits.clone();
            let classifier = self.classifier.clone();
            set.spawn(async move {
                let _permit = permits
                    .acquire_owned()
                    .await
                    .map_err(|e| Error::Internal(format!("worker pool closed: {e}")))?;
                let verdict = classifier.classify(&task.url).await;
                Ok::<_, Error>((task.row, task.slot, verdict))
            });
        }

        while let Some(joined) = set.join_next().await {
            let (row, slot, verdict) =
                joined.map_err(|e| Error::Internal(format!("classification task failed: {e}")))??;

            let cell = &mut slots[row][slot_index(slot)];
            if cell.is_some() {
                return Err(Error::Internal(format!(
                    "duplicate result for row {row} column {}",
                    self.config.column(slot)
                )));
            }
            debug!(row, column = self.config.column(slot), status = %verdict.status(), "Task completed");
            *cell = Some(verdict);

            let event = tracker.report_completion()?;
            progress.on_progress(&event);
        }

        info!(
            tasks = tracker.completed(),
            elapsed_ms = tracker.elapsed().as_millis() as u64,
            "DRM audit complete"
        );

        slots
            .into_iter()
            .enumerate()
            .map(|(index, [primary, timeshift])| {
                let missing = || Error::Internal(format!("row {index} has an unfinished column"));
                Ok(RowResult {
                    index,
                    primary: ColumnVerdict {
                        column: self.config.url_column.clone(),
                        verdict: primary.ok_or_else(missing)?,
                    },
                    timeshift: ColumnVerdict {
                        column: self.config.timeshift_column.clone(),
                        verdict: timeshift.ok_or_else(missing)?,
                    },
                })
            })
            .collect()
    }
}

fn slot_index(slot: UrlSlot) -> usize {
    match slot {
        UrlSlot::Primary => 0,
        UrlSlot::Timeshift => 1,
    }
}
