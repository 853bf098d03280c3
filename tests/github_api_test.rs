//! Lookups against an in-process stand-in for the GitHub REST API.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use ghfind::client::ACCEPT_GITHUB_V3;
use ghfind::commands;
use ghfind::render::{RepoEntry, NO_BIO, NO_REPOSITORIES};
use ghfind::{
    project, FinderConfig, GitHubClient, LookupController, LookupError, LookupOutcome, ViewState,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;

#[derive(Clone, Default)]
struct StubState {
    requests: Arc<Mutex<Vec<String>>>,
}

impl StubState {
    fn record(&self, entry: String) {
        self.requests.lock().expect("requests lock").push(entry);
    }

    fn requests(&self) -> Vec<String> {
        self.requests.lock().expect("requests lock").clone()
    }
}

fn has_required_headers(headers: &HeaderMap) -> bool {
    let accept = headers.get("accept").and_then(|v| v.to_str().ok());
    let agent = headers.get("user-agent").and_then(|v| v.to_str().ok());
    accept == Some(ACCEPT_GITHUB_V3) && agent == Some("GitHubProfileFinder/1.0")
}

fn user_body(login: &str) -> Value {
    json!({
        "login": login,
        "id": 1024025,
        "name": "Linus Torvalds",
        "bio": null,
        "avatar_url": "https://avatars.githubusercontent.com/u/1024025?v=4",
        "html_url": format!("https://github.com/{login}"),
        "public_repos": 8,
        "followers": 234567,
        "following": 0,
        "location": "Portland, OR",
        "blog": "",
        "created_at": "2011-09-03T15:26:22Z"
    })
}

fn repo_body(n: usize) -> Value {
    Value::Array(
        (0..n)
            .map(|i| {
                let description = if i == 0 { Value::Null } else { json!("Some code") };
                let language = if i % 2 == 0 { json!("C") } else { Value::Null };
                json!({
                    "name": format!("project-{i}"),
                    "html_url": format!("https://github.com/torvalds/project-{i}"),
                    "description": description,
                    "language": language
                })
            })
            .collect(),
    )
}

async fn user_handler(
    State(state): State<StubState>,
    Path(username): Path<String>,
    headers: HeaderMap,
) -> Response {
    state.record(format!("user:{username}"));
    if !has_required_headers(&headers) {
        return StatusCode::BAD_REQUEST.into_response();
    }
    match username.as_str() {
        "this-user-should-not-exist-xyz" => StatusCode::NOT_FOUND.into_response(),
        "limited" => StatusCode::FORBIDDEN.into_response(),
        "broken" => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        "garbled" => (StatusCode::OK, "<html>not json</html>").into_response(),
        "slow" => {
            tokio::time::sleep(Duration::from_secs(3)).await;
            Json(user_body(&username)).into_response()
        }
        _ => Json(user_body(&username)).into_response(),
    }
}

async fn repos_handler(
    State(state): State<StubState>,
    Path(username): Path<String>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    state.record(format!("repos:{username}"));
    if !has_required_headers(&headers)
        || params.get("per_page").map(String::as_str) != Some("6")
        || params.get("sort").map(String::as_str) != Some("updated")
    {
        return StatusCode::BAD_REQUEST.into_response();
    }
    match username.as_str() {
        "loner" => Json(repo_body(0)).into_response(),
        "norepos" => StatusCode::SERVICE_UNAVAILABLE.into_response(),
        // The real API caps at per_page, this stub ignores it on purpose.
        _ => Json(repo_body(9)).into_response(),
    }
}

async fn spawn_stub() -> (String, StubState) {
    let state = StubState::default();
    let app = Router::new()
        .route("/users/:username", get(user_handler))
        .route("/users/:username/repos", get(repos_handler))
        .with_state(state.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind stub");
    let addr = listener.local_addr().expect("stub addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve stub");
    });
    (format!("http://{addr}"), state)
}

fn controller_for(base_url: &str, timeout: Duration) -> LookupController {
    let config = FinderConfig {
        api_base_url: base_url.to_string(),
        ..FinderConfig::default()
    };
    let client = GitHubClient::from_config(&config)
        .expect("client")
        .with_timeout(timeout);
    LookupController::new(Arc::new(client))
}

#[tokio::test]
async fn successful_lookup_renders_profile_and_six_repositories() {
    let (base, stub) = spawn_stub().await;
    let controller = controller_for(&base, Duration::from_secs(10));

    let outcome = controller.lookup("torvalds").await;
    assert_eq!(outcome, LookupOutcome::Displayed);
    assert_eq!(stub.requests(), vec!["user:torvalds", "repos:torvalds"]);

    let page = project(&controller.snapshot().state);
    assert!(page.error.is_none());
    assert!(!page.loading);
    let profile = page.profile.expect("profile view");
    assert_eq!(profile.name, "Linus Torvalds");
    assert_eq!(profile.bio, NO_BIO);
    assert_eq!(profile.followers, "234,567");
    assert_eq!(profile.joined, "September 2011");
    assert_eq!(profile.repositories.len(), 6);
    assert!(matches!(
        &profile.repositories[0],
        RepoEntry::Repository { description, language: Some(lang), .. }
            if description == "No description" && lang == "C"
    ));
}

#[tokio::test]
async fn unknown_user_reports_not_found_with_the_username() {
    let (base, stub) = spawn_stub().await;
    let controller = controller_for(&base, Duration::from_secs(10));

    let outcome = controller.lookup("this-user-should-not-exist-xyz").await;
    assert_eq!(
        outcome,
        LookupOutcome::Failed(LookupError::NotFound(
            "this-user-should-not-exist-xyz".to_string()
        ))
    );
    assert_eq!(stub.requests(), vec!["user:this-user-should-not-exist-xyz"]);

    let page = project(&controller.snapshot().state);
    assert!(page.profile.is_none());
    let error = page.error.expect("error view");
    assert_eq!(
        error.message,
        "User \"this-user-should-not-exist-xyz\" not found"
    );
}

#[tokio::test]
async fn forbidden_and_server_errors_are_classified() {
    let (base, _stub) = spawn_stub().await;
    let controller = controller_for(&base, Duration::from_secs(10));

    assert_eq!(
        controller.lookup("limited").await,
        LookupOutcome::Failed(LookupError::RateLimited)
    );
    assert_eq!(
        controller.lookup("broken").await,
        LookupOutcome::Failed(LookupError::Http(500))
    );
}

#[tokio::test]
async fn malformed_profile_body_is_a_decode_failure() {
    let (base, _stub) = spawn_stub().await;
    let controller = controller_for(&base, Duration::from_secs(10));

    let outcome = controller.lookup("garbled").await;
    assert!(matches!(
        outcome,
        LookupOutcome::Failed(LookupError::Decode(_))
    ));
    let page = project(&controller.snapshot().state);
    assert_eq!(
        page.error.map(|e| e.message),
        Some("Something went wrong!".to_string())
    );
}

#[tokio::test]
async fn slow_profile_request_times_out() {
    let (base, stub) = spawn_stub().await;
    let controller = controller_for(&base, Duration::from_millis(200));

    let outcome = controller.lookup("slow").await;
    assert_eq!(outcome, LookupOutcome::Failed(LookupError::Timeout));
    assert_eq!(stub.requests(), vec!["user:slow"]);
    assert_eq!(
        controller.snapshot().state,
        ViewState::Failed {
            error: LookupError::Timeout
        }
    );
}

#[tokio::test]
async fn empty_repository_list_renders_placeholder() {
    let (base, _stub) = spawn_stub().await;
    let controller = controller_for(&base, Duration::from_secs(10));

    assert_eq!(controller.lookup("loner").await, LookupOutcome::Displayed);
    let profile = project(&controller.snapshot().state)
        .profile
        .expect("profile view");
    assert_eq!(
        profile.repositories,
        vec![RepoEntry::Placeholder {
            text: NO_REPOSITORIES.to_string()
        }]
    );
}

#[tokio::test]
async fn failed_repository_listing_fails_the_lookup() {
    let (base, stub) = spawn_stub().await;
    let controller = controller_for(&base, Duration::from_secs(10));

    let outcome = controller.lookup("norepos").await;
    assert!(matches!(
        outcome,
        LookupOutcome::Failed(LookupError::Transport(_))
    ));
    assert_eq!(stub.requests(), vec!["user:norepos", "repos:norepos"]);
    assert!(project(&controller.snapshot().state).profile.is_none());
}

#[tokio::test]
async fn unreachable_api_is_a_transport_failure() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let controller = controller_for(&format!("http://{addr}"), Duration::from_secs(10));
    let outcome = controller.lookup("torvalds").await;
    assert!(matches!(
        outcome,
        LookupOutcome::Failed(LookupError::Transport(_))
    ));
}

fn config_for(base_url: &str) -> FinderConfig {
    FinderConfig {
        api_base_url: base_url.to_string(),
        demo_delay_ms: 20,
        ..FinderConfig::default()
    }
}

#[tokio::test]
async fn lookup_command_reports_success_and_failure() {
    let (base, stub) = spawn_stub().await;
    let config = config_for(&base);

    let shown = commands::lookup_command(&config, "torvalds", true)
        .await
        .expect("lookup torvalds");
    assert!(shown);

    let shown = commands::lookup_command(&config, "this-user-should-not-exist-xyz", false)
        .await
        .expect("lookup missing user");
    assert!(!shown);

    assert_eq!(
        stub.requests(),
        vec![
            "user:torvalds",
            "repos:torvalds",
            "user:this-user-should-not-exist-xyz"
        ]
    );
}

#[tokio::test]
async fn demo_looks_up_the_configured_user_once() {
    let (base, stub) = spawn_stub().await;
    let config = FinderConfig {
        demo_username: "octocat".to_string(),
        ..config_for(&base)
    };
    let controller = Arc::new(controller_for(&base, Duration::from_secs(10)));

    let demo = commands::start_demo(&config, true, controller.clone()).expect("demo enabled");
    assert_eq!(demo.await.expect("demo task"), LookupOutcome::Displayed);

    assert_eq!(stub.requests(), vec!["user:octocat", "repos:octocat"]);
    assert_eq!(controller.snapshot().seq, 1);
}

#[tokio::test]
async fn demo_is_skipped_when_disabled() {
    let (base, stub) = spawn_stub().await;
    let controller = Arc::new(controller_for(&base, Duration::from_secs(10)));

    assert!(commands::start_demo(&config_for(&base), false, controller.clone()).is_none());

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(stub.requests().is_empty());
    assert_eq!(controller.snapshot().state, ViewState::Idle);
}
