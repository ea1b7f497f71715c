//! CLI definitions for untick.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// untick CLI.
#[derive(Parser, Debug)]
#[command(name = "untick")]
#[command(about = "Uncheck every checked box on a live web page over the Chrome DevTools Protocol")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path (defaults apply when it does not exist)
    #[arg(short, long, default_value = "untick.toml", global = true)]
    pub config: PathBuf,

    /// Also write daily rolling log files to this directory
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(flatten)]
    pub browser: BrowserArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Browser and page selection overrides.
#[derive(Args, Debug, Default)]
pub(crate) struct BrowserArgs {
    /// CDP HTTP endpoint
    #[arg(long, env = "UNTICK_ENDPOINT", global = true)]
    pub endpoint: Option<String>,

    /// Launch Chrome if nothing answers on the endpoint
    #[arg(long, global = true)]
    pub launch: bool,

    /// Run a launched Chrome headless
    #[arg(long, global = true)]
    pub headless: bool,

    /// Attach to the first page whose URL contains this text
    #[arg(long, global = true, conflicts_with = "open")]
    pub url_contains: Option<String>,

    /// Open this URL in a new tab and sweep it
    #[arg(long, global = true)]
    pub open: Option<String>,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Uncheck everything on the page (default)
    Run {
        /// Override the pass ceiling
        #[arg(long)]
        max_passes: Option<u32>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Count checked boxes without clicking anything
    Count {
        /// Print the counts as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the pages the endpoint exposes
    Pages {
        /// Print the list as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Default for Commands {
    fn default() -> Self {
        Commands::Run {
            max_passes: None,
            json: false,
        }
    }
}
