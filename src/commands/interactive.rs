use anyhow::{Context, Result};
use std::io::{self, IsTerminal, Write};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::client::GitHubClient;
use crate::config::FinderConfig;
use crate::controller::{LookupController, LookupOutcome, Snapshot};
use crate::render;

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

fn prompt() {
    print!("> ");
    let _ = io::stdout().flush();
}

/// Prompt loop: every submitted line is its own lookup task, so a new search
/// can start while an older one is still waiting on the network.
pub async fn interactive_session(config: &FinderConfig, demo: bool) -> Result<()> {
    let client = GitHubClient::from_config(config)?;
    let controller = Arc::new(LookupController::new(Arc::new(client)));
    let presenter = tokio::spawn(present_changes(
        controller.subscribe(),
        io::stdout().is_terminal(),
    ));

    println!("Enter a GitHub username (\"quit\" to leave).");

    let _demo = start_demo(config, demo, controller.clone());

    prompt();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        if matches!(line.trim(), "quit" | "exit") {
            break;
        }
        let controller = controller.clone();
        tokio::spawn(async move {
            controller.lookup(&line).await;
        });
    }

    presenter.abort();
    Ok(())
}

/// Pre-fills the prompt with the demo username and looks it up once after the
/// configured delay. Returns `None` when the demo is switched off.
pub fn start_demo(
    config: &FinderConfig,
    enabled: bool,
    controller: Arc<LookupController>,
) -> Option<JoinHandle<LookupOutcome>> {
    if !enabled {
        return None;
    }
    let username = config.demo_username.clone();
    let delay = config.demo_delay();
    Some(tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        println!("{}", username);
        controller.lookup(&username).await
    }))
}

async fn present_changes(mut rx: watch::Receiver<Snapshot>, clear_on_success: bool) {
    while rx.changed().await.is_ok() {
        let page = {
            let snapshot = rx.borrow_and_update();
            debug!(seq = snapshot.seq, "rendering state change");
            render::project(&snapshot.state)
        };
        if page.scroll_to_top && clear_on_success {
            print!("{}", CLEAR_SCREEN);
        }
        print!("{}", page);
        if !page.loading {
            prompt();
        }
    }
}
