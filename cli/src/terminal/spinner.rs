use std::io::{self, Write};
use std::sync::OnceLock;
use std::time::Duration;

use colored::*;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

const TICK_INTERVAL: Duration = Duration::from_millis(100);

pub(crate) static SPINNER: OnceLock<ProgressBar> = OnceLock::new();

/// Hidden until [`start`] is called so logs emitted before the run print
/// plainly.
pub fn get_spinner() -> &'static ProgressBar {
    SPINNER.get_or_init(ProgressBar::hidden)
}

fn style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.blue} {msg} {pos}/{len} {elapsed:.dim}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_strings(&[
            "▁▁▁▁▁",
            "▁▂▂▂▁",
            "▁▄▂▄▁",
            "▂▄▆▄▂",
            "▄▆█▆▄",
            "▂▄▆▄▂",
            "▁▄▂▄▁",
            "▁▂▂▂▁",
        ])
}

pub fn start(total: usize) {
    let pb = get_spinner();
    pb.set_style(style());
    pb.set_length(total as u64);
    pb.set_position(0);
    pb.set_message(format!("{}", "Querying servers".italic()));
    pb.set_draw_target(ProgressDrawTarget::stderr());
    pb.enable_steady_tick(TICK_INTERVAL);
}

/// Progress callback handed to the scheduler.
pub fn report_progress(completed: usize) {
    get_spinner().set_position(completed as u64);
}

pub fn finish() {
    get_spinner().finish_and_clear();
}

/// Routes log lines around the spinner so neither tears the other.
pub struct SpinnerWriter;

impl Write for SpinnerWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        get_spinner().suspend(|| io::stderr().write_all(buf))?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()
    }
}
