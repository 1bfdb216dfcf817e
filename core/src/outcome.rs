//! Terminal results of a target's query lifecycle.

use std::io;
use std::time::Duration;

use a2scan_common::network::target::Target;
use a2scan_common::server::ServerInfoRecord;
use a2scan_protocols::DecodeError;
use thiserror::Error;

/// Why a target produced no record.
#[derive(Debug, Error)]
pub enum FailureReason {
    #[error("no reply after {attempts} attempt(s)")]
    Timeout { attempts: u32 },
    #[error("socket limit reached")]
    ResourceExhausted,
    #[error("network error: {0}")]
    Network(#[source] io::Error),
    #[error("malformed reply: {0}")]
    Decode(#[from] DecodeError),
    /// The worker running this target panicked or was cancelled.
    #[error("query task aborted")]
    Aborted,
}

#[derive(Debug)]
pub enum QueryStatus {
    Success(ServerInfoRecord),
    Failure(FailureReason),
}

/// Created exactly once per target when its state machine terminates.
#[derive(Debug)]
pub struct QueryOutcome {
    pub target: Target,
    /// Attempts consumed from the retry budget.
    pub attempts: u32,
    /// Time between sending the info request and accepting its reply.
    /// Only set on success.
    pub latency: Option<Duration>,
    pub status: QueryStatus,
}

impl QueryOutcome {
    pub fn success(
        target: Target,
        attempts: u32,
        latency: Duration,
        record: ServerInfoRecord,
    ) -> Self {
        Self {
            target,
            attempts,
            latency: Some(latency),
            status: QueryStatus::Success(record),
        }
    }

    pub fn failure(target: Target, attempts: u32, reason: FailureReason) -> Self {
        Self {
            target,
            attempts,
            latency: None,
            status: QueryStatus::Failure(reason),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.status, QueryStatus::Success(_))
    }

    pub fn record(&self) -> Option<&ServerInfoRecord> {
        match &self.status {
            QueryStatus::Success(record) => Some(record),
            QueryStatus::Failure(_) => None,
        }
    }

    pub fn failure_reason(&self) -> Option<&FailureReason> {
        match &self.status {
            QueryStatus::Success(_) => None,
            QueryStatus::Failure(reason) => Some(reason),
        }
    }

    pub fn latency_ms(&self) -> Option<f64> {
        self.latency.map(|latency| latency.as_secs_f64() * 1000.0)
    }
}
