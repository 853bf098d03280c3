//! Pure projection from [`ViewState`] to what is shown on screen.

use chrono::DateTime;
use serde::Serialize;
use std::fmt;

use crate::client::REPOSITORY_PAGE_SIZE;
use crate::controller::ViewState;
use crate::error::{LookupError, ERROR_HINT};
use crate::types::{present, RepositorySummary, UserProfile};

pub const AVATAR_PLACEHOLDER: &str = "https://via.placeholder.com/120?text=No+Avatar";
pub const NO_BIO: &str = "No bio available";
pub const NOT_SPECIFIED: &str = "Not specified";
pub const UNKNOWN_DATE: &str = "Unknown";
pub const NO_DESCRIPTION: &str = "No description";
pub const NO_REPOSITORIES: &str = "No public repositories";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Link {
    pub href: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Blog {
    Link(Link),
    Text { text: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RepoEntry {
    Repository {
        name: Link,
        description: String,
        language: Option<String>,
    },
    Placeholder {
        text: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileView {
    pub avatar_url: String,
    pub avatar_alt: String,
    pub name: String,
    pub profile_link: Link,
    pub bio: String,
    pub public_repos: String,
    pub followers: String,
    pub following: String,
    pub location: String,
    pub blog: Blog,
    pub joined: String,
    pub repositories: Vec<RepoEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorView {
    pub message: String,
    pub hint: String,
}

/// Exactly one of `profile` and `error` is set once a lookup has settled.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    pub loading: bool,
    pub profile: Option<ProfileView>,
    pub error: Option<ErrorView>,
    pub scroll_to_top: bool,
}

pub fn project(state: &ViewState) -> Page {
    match state {
        ViewState::Idle => Page {
            loading: false,
            profile: None,
            error: None,
            scroll_to_top: false,
        },
        ViewState::Loading { .. } => Page {
            loading: true,
            profile: None,
            error: None,
            scroll_to_top: false,
        },
        ViewState::Loaded { profile, repos } => Page {
            loading: false,
            profile: Some(profile_view(profile, repos)),
            error: None,
            scroll_to_top: true,
        },
        ViewState::Failed { error } => Page {
            loading: false,
            profile: None,
            error: Some(error_view(error)),
            scroll_to_top: false,
        },
    }
}

pub fn profile_view(user: &UserProfile, repos: &[RepositorySummary]) -> ProfileView {
    ProfileView {
        avatar_url: present(&user.avatar_url)
            .unwrap_or(AVATAR_PLACEHOLDER)
            .to_string(),
        avatar_alt: user.login.clone(),
        name: present(&user.name).unwrap_or(user.login.as_str()).to_string(),
        profile_link: Link {
            href: user.html_url.clone(),
            text: format!("@{}", user.login),
        },
        bio: present(&user.bio).unwrap_or(NO_BIO).to_string(),
        public_repos: group_thousands(user.public_repos),
        followers: group_thousands(user.followers),
        following: group_thousands(user.following),
        location: present(&user.location).unwrap_or(NOT_SPECIFIED).to_string(),
        blog: match (present(&user.blog), &user.blog) {
            (Some(trimmed), Some(raw)) => Blog::Link(Link {
                href: normalize_blog_url(trimmed),
                text: raw.clone(),
            }),
            _ => Blog::Text {
                text: NOT_SPECIFIED.to_string(),
            },
        },
        joined: month_year(user.created_at.as_deref()),
        repositories: repo_entries(repos),
    }
}

pub fn error_view(error: &LookupError) -> ErrorView {
    ErrorView {
        message: error.user_message(),
        hint: ERROR_HINT.to_string(),
    }
}

pub fn repo_entries(repos: &[RepositorySummary]) -> Vec<RepoEntry> {
    if repos.is_empty() {
        return vec![RepoEntry::Placeholder {
            text: NO_REPOSITORIES.to_string(),
        }];
    }

    repos
        .iter()
        .take(REPOSITORY_PAGE_SIZE)
        .map(|repo| RepoEntry::Repository {
            name: Link {
                href: repo.html_url.clone(),
                text: repo.name.clone(),
            },
            description: present(&repo.description)
                .unwrap_or(NO_DESCRIPTION)
                .to_string(),
            language: present(&repo.language).map(str::to_string),
        })
        .collect()
}

/// Prefixes `https://` unless the value already carries an http(s) scheme.
pub fn normalize_blog_url(blog: &str) -> String {
    let lower = blog.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        blog.to_string()
    } else {
        format!("https://{}", blog)
    }
}

/// `2011-09-03T15:26:22Z` becomes `September 2011`.
pub fn month_year(timestamp: Option<&str>) -> String {
    timestamp
        .and_then(|raw| DateTime::parse_from_rfc3339(raw.trim()).ok())
        .map(|date| date.format("%B %Y").to_string())
        .unwrap_or_else(|| UNKNOWN_DATE.to_string())
}

pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.loading {
            writeln!(f, "Loading...")?;
        }
        if let Some(error) = &self.error {
            writeln!(f, "⚠  {}", error.message)?;
            writeln!(f, "   {}", error.hint)?;
        }
        if let Some(profile) = &self.profile {
            write!(f, "{}", profile)?;
        }
        Ok(())
    }
}

impl fmt::Display for ProfileView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", "=".repeat(60))?;
        writeln!(f, "{}  {}", self.name, self.profile_link.text)?;
        writeln!(f, "{}", "=".repeat(60))?;
        writeln!(f, "{}", self.bio)?;
        writeln!(f)?;
        writeln!(
            f,
            "  Repos: {} | Followers: {} | Following: {}",
            self.public_repos, self.followers, self.following
        )?;
        writeln!(f)?;
        writeln!(f, "  Location: {}", self.location)?;
        match &self.blog {
            Blog::Link(link) => writeln!(f, "  Blog:     {} <{}>", link.text, link.href)?,
            Blog::Text { text } => writeln!(f, "  Blog:     {}", text)?,
        }
        writeln!(f, "  Joined:   {}", self.joined)?;
        writeln!(f, "  Profile:  {}", self.profile_link.href)?;
        writeln!(f, "  Avatar:   {}", self.avatar_url)?;
        writeln!(f)?;
        writeln!(f, "Latest repositories:")?;
        for entry in &self.repositories {
            match entry {
                RepoEntry::Repository {
                    name,
                    description,
                    language,
                } => {
                    match language {
                        Some(lang) => writeln!(f, "  {} [{}]", name.text, lang)?,
                        None => writeln!(f, "  {}", name.text)?,
                    }
                    writeln!(f, "    {}", description)?;
                    writeln!(f, "    {}", name.href)?;
                }
                RepoEntry::Placeholder { text } => writeln!(f, "  {}", text)?,
            }
        }
        Ok(())
    }
}
