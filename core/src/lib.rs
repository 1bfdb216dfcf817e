//! # a2scan core
//!
//! Drives A2S conversations against many game servers at once.
//!
//! * **[`query`]**: the per-target state machine (send, await, retry, challenge).
//! * **[`scheduler`]**: the sliding window that runs many of them under a ceiling.
//! * **[`outcome`]**: the terminal, immutable result of one target.

mod network;
pub mod outcome;
pub mod query;
pub mod scheduler;

pub use outcome::{FailureReason, QueryOutcome, QueryStatus};
pub use query::{Querier, QueryEngine};
