//! # Run Configuration
//!
//! Explicit values handed to the query engine and the scheduler. Nothing in
//! the workspace reads configuration from global state; a run is fully
//! described by a [`ScanConfig`].

use std::time::Duration;

use thiserror::Error;

/// Default wait for a single reply before an attempt is considered lost.
pub const DEFAULT_TIMEOUT_MS: u64 = 300;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(DEFAULT_TIMEOUT_MS);

/// Default number of attempts per target.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 1;

/// Default ceiling of simultaneous UDP conversations.
pub const DEFAULT_MAX_CONCURRENCY: usize = 32;

#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
pub enum ConfigError {
    #[error("timeout must be positive")]
    NonPositiveTimeout,
    #[error("retry count must be positive")]
    NonPositiveAttempts,
    #[error("concurrency ceiling must be positive")]
    NonPositiveConcurrency,
}

/// Per-target query policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryConfig {
    /// How long one attempt waits for each reply.
    pub timeout: Duration,
    /// Total attempts per target, including the first one.
    pub max_attempts: u32,
    /// Follow a populated info reply with the challenge and player exchange.
    pub fetch_players: bool,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            fetch_players: false,
        }
    }
}

impl QueryConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout.is_zero() {
            return Err(ConfigError::NonPositiveTimeout);
        }
        if self.max_attempts == 0 {
            return Err(ConfigError::NonPositiveAttempts);
        }
        Ok(())
    }

    /// Upper bound of time a single unreachable target can occupy a worker.
    pub fn worst_case_per_target(&self) -> Duration {
        self.timeout.saturating_mul(self.max_attempts)
    }
}

/// Everything a batch run needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanConfig {
    pub query: QueryConfig,
    pub max_concurrency: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            query: QueryConfig::default(),
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
        }
    }
}

impl ScanConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.query.validate()?;
        if self.max_concurrency == 0 {
            return Err(ConfigError::NonPositiveConcurrency);
        }
        Ok(())
    }

    /// Worst-case wall time for `target_count` targets that never answer:
    /// `ceil(N / concurrency) * timeout * attempts`.
    pub fn estimate(&self, target_count: usize) -> Duration {
        if self.max_concurrency == 0 {
            return Duration::ZERO;
        }
        let waves = target_count.div_ceil(self.max_concurrency);
        let waves = u32::try_from(waves).unwrap_or(u32::MAX);
        self.query.worst_case_per_target().saturating_mul(waves)
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
