use std::time::Duration;

use a2scan_common::server::ServerInfoRecord;
use a2scan_core::QueryOutcome;
use colored::*;
use unicode_width::UnicodeWidthStr;

use crate::terminal::colors;

const MIN_COLUMN_WIDTH: usize = 10;
const COLUMN_GAP: usize = 2;
const ADDRESS_WIDTH: usize = 23;
const PING_WIDTH: usize = 8;
const PLAYERS_WIDTH: usize = 3;

/// Left-aligns `text` to `width` terminal cells.
pub fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(UnicodeWidthStr::width(text));
    format!("{text}{}", " ".repeat(fill))
}

/// Column widths of the server table, sized to the widest shown value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Columns {
    pub name: usize,
    pub map: usize,
}

impl Columns {
    pub fn fit<'a>(records: impl IntoIterator<Item = &'a ServerInfoRecord>) -> Self {
        let mut columns = Columns {
            name: MIN_COLUMN_WIDTH,
            map: MIN_COLUMN_WIDTH,
        };
        for record in records {
            columns.name = columns.name.max(record.name.width() + COLUMN_GAP);
            columns.map = columns.map.max(record.map.width() + COLUMN_GAP);
        }
        columns
    }
}

pub fn ping_color(latency: Duration) -> Color {
    match latency.as_millis() {
        0..=80 => colors::GOOD,
        81..=180 => colors::MEDIOCRE,
        _ => colors::BAD,
    }
}

/// One table line: name, address, ping, map, player count.
pub fn server_row(outcome: &QueryOutcome, record: &ServerInfoRecord, columns: Columns) -> String {
    let latency = outcome.latency.unwrap_or_default();
    let ping = pad(&format!("{:>3} ms", latency.as_millis()), PING_WIDTH);
    let players = format!("{:>width$}", record.players, width = PLAYERS_WIDTH);
    let players = if record.is_empty() {
        players.color(colors::SEPARATOR)
    } else {
        players.color(colors::ACCENT).bold()
    };

    format!(
        "{}{}{}{}{}",
        pad(&record.name, columns.name).color(colors::PRIMARY),
        pad(&outcome.target.to_string(), ADDRESS_WIDTH).color(colors::TEXT_DEFAULT),
        ping.color(ping_color(latency)),
        pad(&record.map, columns.map).color(colors::TEXT_DEFAULT),
        players
    )
}

/// Key/value pairs shown with `--verbose`.
pub fn details(record: &ServerInfoRecord) -> Vec<(String, ColoredString)> {
    vec![
        ("Game".into(), record.game.as_str().normal()),
        ("Folder".into(), record.folder.as_str().normal()),
        ("ID".into(), record.app_id.to_string().normal()),
        ("Max Players".into(), record.max_players.to_string().normal()),
        ("Bots".into(), record.bots.to_string().normal()),
        ("Server type".into(), record.server_type.to_string().normal()),
        ("Environment".into(), record.environment.to_string().normal()),
        ("Visibility".into(), record.visibility.to_string().normal()),
        ("VAC".into(), record.anti_cheat.to_string().normal()),
    ]
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
