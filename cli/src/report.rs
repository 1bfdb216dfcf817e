//! # Result Presentation Model
//!
//! Pure selection logic over finished outcomes: which servers are shown,
//! in which order, and the tallies for the closing summary. Nothing here
//! touches the terminal.

use std::cmp::Ordering;
use std::time::Duration;

use a2scan_common::server::ServerInfoRecord;
use a2scan_core::{FailureReason, QueryOutcome};
use clap::ValueEnum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortField {
    Name,
    Ip,
    Ping,
    Map,
    Player,
}

/// Display criteria. All set criteria must hold; repeated names or players
/// match if any of them matches.
#[derive(Debug, Clone, Default)]
pub struct ShowFilter {
    pub only_active: bool,
    pub only_empty: bool,
    pub min_players: Option<u8>,
    pub max_players: Option<u8>,
    pub names: Vec<String>,
    pub players: Vec<String>,
}

impl ShowFilter {
    pub fn accepts(&self, record: &ServerInfoRecord) -> bool {
        if self.only_active && record.is_empty() {
            return false;
        }
        if self.only_empty && !record.is_empty() {
            return false;
        }
        if self.min_players.is_some_and(|min| record.players < min) {
            return false;
        }
        if self.max_players.is_some_and(|max| record.players > max) {
            return false;
        }
        if !self.names.is_empty() && !contains_any(&record.name, &self.names) {
            return false;
        }
        if !self.players.is_empty() {
            if record.is_empty() {
                return false;
            }
            let found = record
                .player_list
                .iter()
                .any(|player| contains_any(&player.name, &self.players));
            if !found {
                return false;
            }
        }
        true
    }
}

/// Case-insensitive substring match against any needle.
fn contains_any(haystack: &str, needles: &[String]) -> bool {
    let haystack = haystack.to_lowercase();
    needles
        .iter()
        .any(|needle| haystack.contains(&needle.to_lowercase()))
}

/// Stable sort. Failed targets carry no record and sort as an empty name,
/// an empty map, no players and an infinite ping.
pub fn sort_outcomes(outcomes: &mut [QueryOutcome], field: SortField, reverse: bool) {
    outcomes.sort_by(|a, b| {
        let ord = compare(a, b, field);
        if reverse { ord.reverse() } else { ord }
    });
}

fn compare(a: &QueryOutcome, b: &QueryOutcome, field: SortField) -> Ordering {
    match field {
        SortField::Name => text_of(a, |r| &r.name).cmp(&text_of(b, |r| &r.name)),
        SortField::Map => text_of(a, |r| &r.map).cmp(&text_of(b, |r| &r.map)),
        SortField::Ip => a.target.cmp(&b.target),
        SortField::Ping => ping_of(a).cmp(&ping_of(b)),
        SortField::Player => players_of(a).cmp(&players_of(b)),
    }
}

fn text_of(outcome: &QueryOutcome, field: fn(&ServerInfoRecord) -> &String) -> String {
    outcome
        .record()
        .map(|record| field(record).to_lowercase())
        .unwrap_or_default()
}

fn ping_of(outcome: &QueryOutcome) -> Duration {
    outcome.latency.unwrap_or(Duration::MAX)
}

fn players_of(outcome: &QueryOutcome) -> i16 {
    outcome.record().map_or(-1, |record| i16::from(record.players))
}

/// Partition of a sorted batch.
#[derive(Debug)]
pub struct Report<'a> {
    pub shown: Vec<&'a QueryOutcome>,
    pub successful: Vec<&'a QueryOutcome>,
    pub failed: Vec<&'a QueryOutcome>,
    /// Sum of player counts over shown servers.
    pub total_players: u32,
    pub total: usize,
}

impl<'a> Report<'a> {
    pub fn build(outcomes: &'a [QueryOutcome], filter: &ShowFilter) -> Self {
        let mut report = Report {
            shown: Vec::new(),
            successful: Vec::new(),
            failed: Vec::new(),
            total_players: 0,
            total: outcomes.len(),
        };

        for outcome in outcomes {
            match outcome.record() {
                Some(record) => {
                    report.successful.push(outcome);
                    if filter.accepts(record) {
                        report.total_players += u32::from(record.players);
                        report.shown.push(outcome);
                    }
                }
                None => report.failed.push(outcome),
            }
        }
        report
    }

    /// True when at least one target failed because the process ran out of
    /// sockets.
    pub fn hit_socket_limit(&self) -> bool {
        self.failed
            .iter()
            .any(|o| matches!(o.failure_reason(), Some(FailureReason::ResourceExhausted)))
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
