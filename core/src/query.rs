//! # Query Engine
//!
//! Owns one target's A2S conversation from the first info request to a
//! terminal [`QueryOutcome`].
//!
//! ```text
//! Idle ─► AwaitingInfo ─┬─► (players wanted and present)
//!                       │     AwaitingChallenge ─► AwaitingPlayers ─┐
//!                       └───────────────────────────────────────────┴─► Success
//! any timeout ─► next attempt (fresh socket) ─► ... ─► Failure(Timeout)
//! ```
//!
//! Retry policy:
//! * A lost reply (in any phase) consumes one attempt; the next attempt
//!   starts over with the info request on a new socket.
//! * Replies from the wrong origin are discarded without consuming anything.
//! * Descriptor exhaustion and malformed replies end the target at once.

use std::io;
use std::time::Duration;

use a2scan_common::config::QueryConfig;
use a2scan_common::network::target::Target;
use a2scan_common::server::{PlayerRecord, ServerInfoRecord};
use a2scan_protocols::{self as a2s, ChallengeToken, DecodeError};
use async_trait::async_trait;
use tokio::time::Instant;
use tracing::{debug, trace, warn};

use crate::network::udp::{self, Conversation};
use crate::outcome::{FailureReason, QueryOutcome};

/// Anything that can turn a target into a terminal outcome.
///
/// The scheduler only depends on this seam, so it can run the real
/// [`QueryEngine`] or any stand-in.
#[async_trait]
pub trait Querier: Send + Sync {
    async fn query(&self, target: Target) -> QueryOutcome;
}

/// Where a single attempt currently waits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Between attempts, before the attempt's socket is open.
    Idle,
    AwaitingInfo,
    AwaitingChallenge,
    AwaitingPlayers,
}

#[derive(Debug)]
struct RetryState {
    attempt: u32,
    phase: Phase,
    challenge: Option<ChallengeToken>,
}

impl RetryState {
    fn new() -> Self {
        Self {
            attempt: 0,
            phase: Phase::Idle,
            challenge: None,
        }
    }

    fn begin_attempt(&mut self) {
        self.attempt += 1;
        self.phase = Phase::Idle;
        self.challenge = None;
    }
}

enum AttemptError {
    TimedOut(Phase),
    Network(io::Error),
    Fatal(FailureReason),
}

impl From<io::Error> for AttemptError {
    fn from(err: io::Error) -> Self {
        if udp::is_resource_exhausted(&err) {
            AttemptError::Fatal(FailureReason::ResourceExhausted)
        } else {
            AttemptError::Network(err)
        }
    }
}

impl From<DecodeError> for AttemptError {
    fn from(err: DecodeError) -> Self {
        AttemptError::Fatal(FailureReason::Decode(err))
    }
}

pub struct QueryEngine {
    cfg: QueryConfig,
}

#[async_trait]
impl Querier for QueryEngine {
    async fn query(&self, target: Target) -> QueryOutcome {
        self.run(target).await
    }
}

impl QueryEngine {
    pub fn new(cfg: QueryConfig) -> Self {
        Self { cfg }
    }

    /// Runs the full state machine for `target`. Never fails: every error
    /// ends up inside the returned outcome.
    pub async fn run(&self, target: Target) -> QueryOutcome {
        let mut state = RetryState::new();
        let mut last_network_error: Option<io::Error> = None;

        while state.attempt < self.cfg.max_attempts {
            state.begin_attempt();

            match self.attempt(target, &mut state).await {
                Ok((latency, record)) => {
                    debug!(%target, attempt = state.attempt, ?latency, "query succeeded");
                    return QueryOutcome::success(target, state.attempt, latency, record);
                }
                Err(AttemptError::TimedOut(phase)) => {
                    debug!(%target, attempt = state.attempt, ?phase, "no reply within timeout");
                    last_network_error = None;
                }
                Err(AttemptError::Network(e)) => {
                    debug!(%target, attempt = state.attempt, phase = ?state.phase, "network error: {e}");
                    last_network_error = Some(e);
                }
                Err(AttemptError::Fatal(reason)) => {
                    if matches!(reason, FailureReason::ResourceExhausted) {
                        warn!(%target, "out of sockets, lower the concurrency or raise the open file limit");
                    } else {
                        debug!(%target, ?state, "query failed: {reason}");
                    }
                    return QueryOutcome::failure(target, state.attempt, reason);
                }
            }
        }

        let reason = match last_network_error {
            Some(e) => FailureReason::Network(e),
            None => FailureReason::Timeout {
                attempts: state.attempt,
            },
        };
        QueryOutcome::failure(target, state.attempt, reason)
    }

    async fn attempt(
        &self,
        target: Target,
        state: &mut RetryState,
    ) -> Result<(Duration, ServerInfoRecord), AttemptError> {
        let conversation = Conversation::open(target).await?;

        state.phase = Phase::AwaitingInfo;
        let sent_at = Instant::now();
        let reply = self
            .exchange(&conversation, &a2s::encode_info_request(), state.phase)
            .await?;
        let latency = sent_at.elapsed();

        let mut record = a2s::decode_info_response(&reply)?;
        if self.cfg.fetch_players && record.players > 0 {
            record.player_list = self.fetch_players(&conversation, state).await?;
        }

        Ok((latency, record))
    }

    /// Challenge probe, then the real player request. Shares the attempt's
    /// socket and has no retry budget of its own.
    async fn fetch_players(
        &self,
        conversation: &Conversation,
        state: &mut RetryState,
    ) -> Result<Vec<PlayerRecord>, AttemptError> {
        state.phase = Phase::AwaitingChallenge;
        let reply = self
            .exchange(conversation, &a2s::encode_player_challenge_request(), state.phase)
            .await?;
        let token = ChallengeToken::from_reply(&reply)?;
        state.challenge = Some(token);
        trace!(challenge = ?state.challenge, "challenge accepted");

        state.phase = Phase::AwaitingPlayers;
        let reply = self
            .exchange(conversation, &a2s::encode_player_request(token), state.phase)
            .await?;

        Ok(a2s::decode_player_response(&reply)?)
    }

    async fn exchange(
        &self,
        conversation: &Conversation,
        packet: &[u8],
        phase: Phase,
    ) -> Result<Vec<u8>, AttemptError> {
        conversation.send(packet).await?;
        let deadline = Instant::now() + self.cfg.timeout;
        conversation
            .recv(deadline)
            .await?
            .ok_or(AttemptError::TimedOut(phase))
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
