// crates/status-relay-server/src/pool.rs
// ============================================================================
// Module: Pipeline Pool
// Description: Bounded background execution of relay pipelines.
// Purpose: Run post-response work without blocking intake.
// Dependencies: status-relay-core, tokio, tracing
// ============================================================================

//! ## Overview
//! [`PipelinePool`] owns a bounded job queue drained by a dispatcher task.
//! The dispatcher spawns one task per job and caps concurrency with a
//! semaphore. Submission never waits: a full queue rejects the job.
//! Failures are logged at the task boundary and never reach the submitter.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use status_relay_core::PipelineError;
use status_relay_core::PipelineJob;
use status_relay_core::RelayContext;
use status_relay_core::StatusVerdict;
use thiserror::Error;
use tokio::sync::Semaphore;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::error;
use tracing::info;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Pool sizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolConfig {
    /// Jobs buffered before submissions are rejected.
    pub queue_capacity: usize,
    /// Pipelines allowed to run concurrently.
    pub max_in_flight: usize,
}

/// Result of one finished pipeline run.
#[derive(Debug)]
pub struct PipelineOutcome {
    /// Job that ran.
    pub job: PipelineJob,
    /// Published verdict or the failure.
    pub result: Result<StatusVerdict, PipelineError>,
}

/// Reasons a job was not accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// The job queue is at capacity.
    #[error("pipeline queue is full")]
    QueueFull,
    /// The dispatcher has stopped.
    #[error("pipeline pool is closed")]
    Closed,
}

// ============================================================================
// SECTION: Pool
// ============================================================================

/// Handle for submitting jobs to the background pool.
#[derive(Debug, Clone)]
pub struct PipelinePool {
    /// Job queue sender.
    sender: mpsc::Sender<PipelineJob>,
}

impl PipelinePool {
    /// Starts the dispatcher on the current tokio runtime.
    ///
    /// When `outcomes` is set, every finished job is reported on it.
    #[must_use]
    pub fn start(
        context: RelayContext,
        config: PoolConfig,
        outcomes: Option<mpsc::UnboundedSender<PipelineOutcome>>,
    ) -> Self {
        let (sender, receiver) = mpsc::channel(config.queue_capacity.max(1));
        let permits = Arc::new(Semaphore::new(config.max_in_flight.max(1)));
        tokio::spawn(dispatch(context, receiver, permits, outcomes));
        Self {
            sender,
        }
    }

    /// Queues `job` without waiting.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitError::QueueFull`] when the queue is at capacity and
    /// [`SubmitError::Closed`] when the dispatcher is gone.
    pub fn submit(&self, job: PipelineJob) -> Result<(), SubmitError> {
        self.sender.try_send(job).map_err(|err| match err {
            TrySendError::Full(_) => SubmitError::QueueFull,
            TrySendError::Closed(_) => SubmitError::Closed,
        })
    }
}

/// Drains the queue, spawning one task per job under the permit limit.
async fn dispatch(
    context: RelayContext,
    mut receiver: mpsc::Receiver<PipelineJob>,
    permits: Arc<Semaphore>,
    outcomes: Option<mpsc::UnboundedSender<PipelineOutcome>>,
) {
    while let Some(job) = receiver.recv().await {
        let Ok(permit) = Arc::clone(&permits).acquire_owned().await else {
            break;
        };
        let context = context.clone();
        let outcomes = outcomes.clone();
        tokio::spawn(async move {
            let result = context.run(&job).await;
            drop(permit);
            log_outcome(&job, &result);
            if let Some(outcomes) = outcomes {
                let _ = outcomes.send(PipelineOutcome {
                    job,
                    result,
                });
            }
        });
    }
}

/// Logs a finished run.
fn log_outcome(job: &PipelineJob, result: &Result<StatusVerdict, PipelineError>) {
    match result {
        Ok(verdict) => info!(
            kind = %job.kind,
            source_id = %job.source_id,
            resource_id = %verdict.resource_id(),
            status = %verdict.status(),
            "status published"
        ),
        Err(err) => error!(
            kind = %job.kind,
            source_id = %job.source_id,
            error = %err,
            "status pipeline failed"
        ),
    }
}
