pub mod cli;
pub mod client;
pub mod commands;
pub mod config;
pub mod controller;
pub mod error;
pub mod logging;
pub mod render;
pub mod types;

pub use cli::{Cli, Commands};
pub use client::{GitHubClient, ProfileApi};
pub use config::FinderConfig;
pub use controller::{LookupController, LookupOutcome, Snapshot, ViewState};
pub use error::LookupError;
pub use render::{project, Page};
pub use types::{RepositorySummary, UserProfile};
