use anyhow::{Context, Result};
use std::sync::Arc;

use crate::client::GitHubClient;
use crate::config::FinderConfig;
use crate::controller::{LookupController, LookupOutcome};
use crate::render;

/// Runs a single lookup and prints the page. Returns whether a profile was shown.
pub async fn lookup_command(config: &FinderConfig, username: &str, json: bool) -> Result<bool> {
    let client = GitHubClient::from_config(config)?;
    let controller = LookupController::new(Arc::new(client));

    let outcome = controller.lookup(username).await;
    let page = render::project(&controller.snapshot().state);

    if json {
        let body = serde_json::to_string_pretty(&page).context("Failed to serialize page")?;
        println!("{}", body);
    } else {
        print!("{}", page);
    }

    Ok(outcome == LookupOutcome::Displayed)
}
