mod commands;
mod input;
mod output;
mod report;
mod terminal;

use std::io;
use std::sync::Arc;
use std::time::Instant;

use a2scan_core::scheduler::{self, ProgressCallback};
use anyhow::Context;
use commands::CommandLine;
use report::Report;
use terminal::print::{self, Detail};
use terminal::{logging, spinner};
use tracing::{debug, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init(commands.debug);
    print::initialize();

    let cfg = commands.scan_config();
    cfg.validate().context("invalid options")?;

    let targets = input::read_targets(io::stdin().lock())?;
    debug!("read {} targets", targets.len());

    if commands.print_estimate {
        print::estimate(targets.len(), cfg.estimate(targets.len()));
    }

    let started = Instant::now();
    spinner::start(targets.len());
    let progress: ProgressCallback = Arc::new(spinner::report_progress);
    let result = scheduler::run_all(targets, &cfg, Some(progress)).await;
    spinner::finish();
    let mut outcomes = result?;

    report::sort_outcomes(&mut outcomes, commands.sort, commands.sort_reverse);
    let report = Report::build(&outcomes, &commands.show_filter());

    if report.hit_socket_limit() {
        warn!(
            "Too many open sockets, reduce --threadcount or raise the open file limit (ulimit -n). Current threadcount is {}.",
            cfg.max_concurrency
        );
    }

    print::servers(
        &report,
        Detail {
            verbose: commands.verbose,
            players: commands.show_players,
        },
    );
    output::write_all(&report, &commands)?;
    print::summary(&report, started.elapsed());

    Ok(())
}
