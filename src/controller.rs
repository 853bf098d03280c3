//! Lookup orchestration and the view state it publishes.
//!
//! Every call to [`LookupController::lookup`] takes the next sequence number.
//! Only the newest invocation may publish its result; older ones that settle
//! later are dropped, so two overlapping lookups never interleave their output.

use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::client::ProfileApi;
use crate::error::LookupError;
use crate::types::{RepositorySummary, UserProfile};

#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    Idle,
    Loading {
        username: String,
    },
    Loaded {
        profile: UserProfile,
        repos: Vec<RepositorySummary>,
    },
    Failed {
        error: LookupError,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub seq: u64,
    pub state: ViewState,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LookupOutcome {
    Displayed,
    Failed(LookupError),
    /// A newer lookup started before this one settled.
    Superseded,
}

pub struct LookupController {
    api: Arc<dyn ProfileApi>,
    state_tx: watch::Sender<Snapshot>,
}

impl LookupController {
    pub fn new(api: Arc<dyn ProfileApi>) -> Self {
        let (state_tx, _) = watch::channel(Snapshot {
            seq: 0,
            state: ViewState::Idle,
        });
        Self { api, state_tx }
    }

    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.state_tx.subscribe()
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state_tx.borrow().clone()
    }

    pub async fn lookup(&self, input: &str) -> LookupOutcome {
        let username = input.trim();

        if username.is_empty() {
            let seq = self.begin(ViewState::Failed {
                error: LookupError::EmptyInput,
            });
            warn!(seq, error = %LookupError::EmptyInput, "lookup rejected");
            return LookupOutcome::Failed(LookupError::EmptyInput);
        }

        let seq = self.begin(ViewState::Loading {
            username: username.to_string(),
        });
        info!(seq, username, "starting lookup");

        let result = self.fetch(username).await;

        let state = match &result {
            Ok((profile, repos)) => ViewState::Loaded {
                profile: profile.clone(),
                repos: repos.clone(),
            },
            Err(error) => ViewState::Failed {
                error: error.clone(),
            },
        };

        if !self.finish(seq, state) {
            match &result {
                Err(error) => warn!(seq, username, %error, "superseded lookup failed"),
                Ok(_) => debug!(seq, username, "discarding result of superseded lookup"),
            }
            return LookupOutcome::Superseded;
        }

        match result {
            Ok((_, repos)) => {
                info!(seq, username, repos = repos.len(), "lookup complete");
                LookupOutcome::Displayed
            }
            Err(error) => {
                warn!(seq, username, %error, "lookup failed");
                LookupOutcome::Failed(error)
            }
        }
    }

    async fn fetch(
        &self,
        username: &str,
    ) -> Result<(UserProfile, Vec<RepositorySummary>), LookupError> {
        let profile = self.api.fetch_profile(username).await?;
        let repos = self.api.fetch_repositories(username).await?;
        Ok((profile, repos))
    }

    fn begin(&self, state: ViewState) -> u64 {
        let mut seq = 0;
        self.state_tx.send_modify(|snapshot| {
            snapshot.seq += 1;
            snapshot.state = state;
            seq = snapshot.seq;
        });
        seq
    }

    /// Publishes `state` if `seq` is still the newest lookup.
    fn finish(&self, seq: u64, state: ViewState) -> bool {
        self.state_tx.send_if_modified(|snapshot| {
            if snapshot.seq != seq {
                return false;
            }
            snapshot.state = state;
            true
        })
    }
}
