use serde::{Deserialize, Serialize};

/// A GitHub user as returned by `GET /users/{username}`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UserProfile {
    pub login: String,
    pub name: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub html_url: String,
    #[serde(default)]
    pub public_repos: u64,
    #[serde(default)]
    pub followers: u64,
    #[serde(default)]
    pub following: u64,
    pub location: Option<String>,
    pub blog: Option<String>,
    pub created_at: Option<String>,
}

/// One entry of `GET /users/{username}/repos`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RepositorySummary {
    pub name: String,
    pub html_url: String,
    pub description: Option<String>,
    pub language: Option<String>,
}

/// GitHub sends `""` for several unset fields, treat those like `null`.
pub fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
