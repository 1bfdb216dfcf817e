use std::path::PathBuf;
use std::time::Duration;

use a2scan_common::config::{
    DEFAULT_MAX_ATTEMPTS, DEFAULT_MAX_CONCURRENCY, DEFAULT_TIMEOUT_MS, QueryConfig, ScanConfig,
};
use clap::Parser;

use crate::report::{ShowFilter, SortField};

#[derive(Parser)]
#[command(name = "a2scan", version)]
#[command(about = "Make A2S_INFO and A2S_PLAYER requests to Source engine game servers.")]
#[command(long_about = "Make A2S_INFO and A2S_PLAYER requests to Source engine game servers. \
The ip:port list is read from stdin, one server per line.")]
pub struct CommandLine {
    /// Only show active servers
    #[arg(short = 'a', long, conflicts_with = "empty")]
    pub active: bool,

    /// Only show empty servers
    #[arg(short = 'e', long)]
    pub empty: bool,

    /// Verbose server information
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Show players
    #[arg(short = 's', long = "showplayers")]
    pub show_players: bool,

    /// Search for server name, repeat for more values (disjunction)
    #[arg(short = 'n', long = "name", value_name = "NAME")]
    pub names: Vec<String>,

    /// Search for player, repeat for more values (disjunction)
    #[arg(short = 'p', long = "player", value_name = "PLAYER")]
    pub players: Vec<String>,

    /// Minimum player count (inclusive)
    #[arg(short = 'm', long = "minplayer")]
    pub min_players: Option<u8>,

    /// Maximum player count (inclusive)
    #[arg(short = 'x', long = "maxplayer")]
    pub max_players: Option<u8>,

    /// Timeout before retry (ms)
    #[arg(short = 't', long, default_value_t = DEFAULT_TIMEOUT_MS)]
    pub timeout: u64,

    /// Request attempts per server
    #[arg(short = 'r', long, default_value_t = DEFAULT_MAX_ATTEMPTS)]
    pub retry: u32,

    /// Max requests in flight at once
    #[arg(short = 'c', long = "threadcount", default_value_t = DEFAULT_MAX_CONCURRENCY)]
    pub thread_count: usize,

    /// Output destination file for successful connections
    #[arg(short = 'o', long = "outputfilesuccess")]
    pub output_success: Option<PathBuf>,

    /// Output destination file for failed connections
    #[arg(short = 'f', long = "outputfilefailed")]
    pub output_failed: Option<PathBuf>,

    /// Output destination file for shown connections
    #[arg(short = 'w', long = "outputfileshow")]
    pub output_shown: Option<PathBuf>,

    /// Sort by field
    #[arg(long, value_enum, default_value_t = SortField::Ping)]
    pub sort: SortField,

    /// Reverse sort
    #[arg(long = "sortreverse")]
    pub sort_reverse: bool,

    /// Print an estimate of how long the run will take
    #[arg(long = "printestimate")]
    pub print_estimate: bool,

    /// Emit debug logs (RUST_LOG takes precedence)
    #[arg(short = 'd', long)]
    pub debug: bool,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Player names are needed to print them or to search them.
    pub fn wants_players(&self) -> bool {
        self.show_players || !self.players.is_empty()
    }

    pub fn scan_config(&self) -> ScanConfig {
        ScanConfig {
            query: QueryConfig {
                timeout: Duration::from_millis(self.timeout),
                max_attempts: self.retry,
                fetch_players: self.wants_players(),
            },
            max_concurrency: self.thread_count,
        }
    }

    pub fn show_filter(&self) -> ShowFilter {
        ShowFilter {
            only_active: self.active,
            only_empty: self.empty,
            min_players: self.min_players,
            max_players: self.max_players,
            names: self.names.clone(),
            players: self.players.clone(),
        }
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
