use std::time::Duration;

use colored::*;
use unicode_width::UnicodeWidthStr;

use crate::report::Report;
use crate::terminal::format::{self, Columns};
use crate::terminal::{colors, spinner};

pub const TOTAL_WIDTH: usize = 64;

/// What to print per shown server besides its table row.
#[derive(Debug, Clone, Copy, Default)]
pub struct Detail {
    pub verbose: bool,
    pub players: bool,
}

/// Colors stay on only when stdout is a terminal.
pub fn initialize() {
    if !console::Term::stdout().is_term() {
        colored::control::set_override(false);
    }
}

pub fn print(msg: &str) {
    spinner::get_spinner().suspend(|| println!("{msg}"));
}

pub fn estimate(target_count: usize, duration: Duration) {
    print(&format!(
        "Sending {} requests, it will take about {} seconds...",
        target_count.to_string().color(colors::ACCENT).bold(),
        format!("{:.2}", duration.as_secs_f64()).color(colors::ACCENT)
    ));
    print("");
}

pub fn as_tree_one_level(key_value_pair: &[(String, ColoredString)]) {
    let key_width: usize = key_value_pair
        .iter()
        .map(|(key, _)| key.width())
        .max()
        .unwrap_or(0);

    for (i, (key, value)) in key_value_pair.iter().enumerate() {
        let last: bool = i + 1 == key_value_pair.len();
        let branch: ColoredString = if !last {
            "├─".bright_black()
        } else {
            "└─".bright_black()
        };
        let output: String = format!(
            " {} {}{}{} {}",
            branch,
            key.color(colors::TEXT_DEFAULT),
            ".".repeat(key_width + 1 - key.width()).color(colors::SEPARATOR),
            ":".color(colors::SEPARATOR),
            value
        );
        print(&output);
    }
}

pub fn player_names(names: &[&str]) {
    let joined: Vec<String> = names
        .iter()
        .map(|name| format!("{}", name.color(colors::PRIMARY)))
        .collect();
    let comma: String = format!("{}", ", ".color(colors::SEPARATOR));
    print(&format!(
        " {} {}",
        "»".color(colors::SEPARATOR),
        joined.join(comma.as_str())
    ));
}

/// The table of shown servers, in report order.
pub fn servers(report: &Report<'_>, detail: Detail) {
    let records = report.shown.iter().filter_map(|outcome| outcome.record());
    let columns = Columns::fit(records);

    for outcome in &report.shown {
        let Some(record) = outcome.record() else {
            continue;
        };
        print(&format::server_row(outcome, record, columns));

        if detail.verbose {
            as_tree_one_level(&format::details(record));
        }
        if detail.players && !record.player_list.is_empty() {
            let names: Vec<&str> = record.player_list.iter().map(|p| p.name.as_str()).collect();
            player_names(&names);
        }
        if detail.verbose || detail.players {
            print("");
        }
    }
}

pub fn summary(report: &Report<'_>, elapsed: Duration) {
    let sep: ColoredString = "═".repeat(TOTAL_WIDTH).color(colors::SEPARATOR);
    print(&format!("{}", sep));
    print(&format!(
        "{} {} ({} showing, {} successful, {} failed, {} total) in {:.2} seconds",
        "Total Players:".color(colors::PRIMARY),
        report.total_players.to_string().color(colors::ACCENT).bold(),
        report.shown.len(),
        report.successful.len().to_string().color(colors::GOOD),
        report.failed.len().to_string().color(colors::BAD),
        report.total,
        elapsed.as_secs_f64()
    ));
}
