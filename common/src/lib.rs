//! Shared data model for `a2scan`.
//!
//! Everything in here is plain data: the addresses we query, the records we
//! decode from server replies, and the knobs that drive a run. No I/O.

pub mod config;
pub mod network;
pub mod server;
