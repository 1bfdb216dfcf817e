//! # Sliding-Window Scheduler
//!
//! Runs one [`Querier`] conversation per target with at most
//! `max_concurrency` in flight. Targets launch in input order; once the
//! window is full the oldest outstanding task is awaited before the next one
//! starts. Outcomes come back in input order no matter when each finished.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use a2scan_common::config::{ConfigError, ScanConfig};
use a2scan_common::network::target::Target;
use tokio::task::JoinHandle;
use tracing::{Instrument, debug, debug_span, error};

use crate::outcome::{FailureReason, QueryOutcome};
use crate::query::{Querier, QueryEngine};

/// Called from worker tasks with the number of targets finished so far.
pub type ProgressCallback = Arc<dyn Fn(usize) + Send + Sync>;

/// Queries every target with a [`QueryEngine`] built from `cfg`.
///
/// Fails only on invalid configuration, before anything is sent.
pub async fn run_all(
    targets: Vec<Target>,
    cfg: &ScanConfig,
    on_complete: Option<ProgressCallback>,
) -> Result<Vec<QueryOutcome>, ConfigError> {
    cfg.validate()?;
    let engine = Arc::new(QueryEngine::new(cfg.query));
    run_with(engine, targets, cfg.max_concurrency, on_complete).await
}

/// Same as [`run_all`] for any querier.
pub async fn run_with<Q>(
    querier: Arc<Q>,
    targets: Vec<Target>,
    max_concurrency: usize,
    on_complete: Option<ProgressCallback>,
) -> Result<Vec<QueryOutcome>, ConfigError>
where
    Q: Querier + 'static,
{
    if max_concurrency == 0 {
        return Err(ConfigError::NonPositiveConcurrency);
    }

    debug!(targets = targets.len(), max_concurrency, "starting batch");

    let completed = Arc::new(AtomicUsize::new(0));
    let mut in_flight: VecDeque<(Target, JoinHandle<QueryOutcome>)> =
        VecDeque::with_capacity(max_concurrency.min(targets.len()));
    let mut outcomes: Vec<QueryOutcome> = Vec::with_capacity(targets.len());

    for target in targets {
        if in_flight.len() >= max_concurrency {
            if let Some((oldest, handle)) = in_flight.pop_front() {
                outcomes.push(settle(oldest, handle).await);
            }
        }

        let querier = Arc::clone(&querier);
        let completed = Arc::clone(&completed);
        let on_complete = on_complete.clone();
        let task = async move {
            let outcome = querier.query(target).await;
            let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
            if let Some(callback) = on_complete {
                callback(done);
            }
            outcome
        };

        let handle = tokio::spawn(task.instrument(debug_span!("query", %target)));
        in_flight.push_back((target, handle));
    }

    while let Some((target, handle)) = in_flight.pop_front() {
        outcomes.push(settle(target, handle).await);
    }

    Ok(outcomes)
}

async fn settle(target: Target, handle: JoinHandle<QueryOutcome>) -> QueryOutcome {
    match handle.await {
        Ok(outcome) => outcome,
        Err(e) => {
            error!(%target, "query task did not finish: {e}");
            QueryOutcome::failure(target, 0, FailureReason::Aborted)
        }
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
