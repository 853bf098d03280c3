use clap::{Parser, Subcommand, ValueHint};
use clap_complete::Shell;

use crate::config::FinderConfig;

#[derive(Parser)]
#[command(name = "ghfind")]
#[command(about = "Look up a GitHub profile and its latest repositories", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Base URL of the GitHub API (overrides config and GHFIND_API_URL)
    #[arg(long, global = true, value_hint = ValueHint::Url)]
    pub api_url: Option<String>,
    /// Profile request timeout in seconds (at least 1)
    #[arg(long, global = true, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Look up one user and print the result
    #[command(short_flag = 'l', visible_alias = "get")]
    Lookup {
        /// GitHub username (e.g., torvalds)
        username: String,
        /// Print the rendered page as JSON
        #[arg(long)]
        json: bool,
    },
    /// Prompt for usernames until EOF or `quit` (the default)
    #[command(short_flag = 'i')]
    Interactive {
        /// Skip the startup demo lookup
        #[arg(long)]
        no_demo: bool,
    },
    /// Show the config file location and effective settings
    Config {
        /// Write the current settings to the config file
        #[arg(long)]
        init: bool,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl Cli {
    /// Flags win over the environment, which wins over the config file.
    pub fn apply_overrides(&self, config: &mut FinderConfig) {
        if let Some(url) = &self.api_url {
            config.api_base_url = url.clone();
        }
        if let Some(secs) = self.timeout {
            config.request_timeout_secs = secs;
        }
    }
}
