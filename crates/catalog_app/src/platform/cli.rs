use std::path::PathBuf;

use catalog_core::StatusFilter;
use clap::{Parser, Subcommand, ValueEnum};
use engine_logging::LogDestination;

#[derive(Parser, Debug)]
#[command(name = "comic_catalog")]
#[command(about = "Browse, search, and filter the comic catalog", long_about = None)]
#[command(version)]
pub struct Cli {
    /// RON config file. Defaults to ./comic_catalog.ron when present.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// API base URL; overrides the config file.
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    #[arg(long, value_enum, default_value = "file", global = true)]
    pub log: LogTarget,

    #[arg(long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Interactive session (default).
    Browse,

    /// Print one page of the catalog.
    List {
        /// Case-insensitive title search.
        #[arg(long, default_value = "")]
        search: String,

        /// all, free_ongoing, free_completed, or paid.
        #[arg(long, default_value = "all")]
        status: StatusFilter,

        /// 1-based page number.
        #[arg(long, default_value_t = 1)]
        page: usize,
    },

    /// Print the detail view for one comic.
    Show { id: String },

    /// Print category counts over the whole catalog.
    Stats,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    File,
    Terminal,
    Both,
}

impl From<LogTarget> for LogDestination {
    fn from(target: LogTarget) -> Self {
        match target {
            LogTarget::File => LogDestination::File,
            LogTarget::Terminal => LogDestination::Terminal,
            LogTarget::Both => LogDestination::Both,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_core::StatusCategory;

    #[test]
    fn list_parses_filters() {
        let cli = Cli::parse_from([
            "comic_catalog",
            "list",
            "--search",
            "alp",
            "--status",
            "paid",
            "--page",
            "2",
        ]);
        assert_eq!(
            cli.command,
            Some(Command::List {
                search: "alp".to_string(),
                status: StatusFilter::Only(StatusCategory::Paid),
                page: 2,
            })
        );
    }

    #[test]
    fn unknown_status_is_rejected() {
        let result = Cli::try_parse_from(["comic_catalog", "list", "--status", "free"]);
        assert!(result.is_err());
    }

    #[test]
    fn global_flags_follow_subcommand() {
        let cli = Cli::parse_from(["comic_catalog", "show", "7", "--base-url", "http://h:1"]);
        assert_eq!(cli.base_url.as_deref(), Some("http://h:1"));
        assert_eq!(cli.command, Some(Command::Show { id: "7".into() }));
        assert_eq!(cli.log, LogTarget::File);
    }
}
