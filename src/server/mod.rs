//! HTTP webhook endpoints
//!
//! - `POST /merge/` - build notification (form `payload` field or JSON body)
//! - `GET /merge/?repo=owner/name&pr=N` - manual re-check
//! - `GET /health` - liveness

mod payload;

pub use payload::{BuildNotification, BuildRepository, ManualCheck, parse_build_notification};

use crate::config::ServerConfig;
use crate::error::{Error, Result};
use crate::merge::{CheckOptions, CheckReport, check_pull_request};
use crate::platform::{PlatformFactory, parse_repo_name};
use axum::Router;
use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// State shared with the handlers
#[derive(Clone)]
pub struct AppState {
    /// Creates repository clients per delivery
    pub platforms: Arc<dyn PlatformFactory>,
    /// Options applied to every check
    pub options: CheckOptions,
}

/// Build the axum router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/merge/", get(handle_manual).post(handle_build))
        .route("/health", get(|| async { "ok" }))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Handle a build notification
///
/// Branch builds (no PR number) are acknowledged and ignored.
async fn handle_build(State(state): State<AppState>, headers: HeaderMap, body: Bytes) -> Response {
    let is_json = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json"));

    let build = match parse_build_notification(&body, is_json) {
        Ok(build) => build,
        Err(e) => return error_response(&e),
    };

    info!(build = %build.number, "processing build");
    let Some(pr_number) = build.pull_request_number else {
        info!(build = %build.number, "not a PR build; quitting");
        return (StatusCode::OK, "Not a PR build").into_response();
    };

    run_check(&state, &build.repository.full_name(), pr_number).await
}

/// Handle a manual check request
async fn handle_manual(State(state): State<AppState>, Query(check): Query<ManualCheck>) -> Response {
    run_check(&state, &check.repo, check.pr).await
}

async fn check_repo_pr(state: &AppState, repo: &str, pr_number: u64) -> Result<CheckReport> {
    let repo = parse_repo_name(repo)?;
    let platform = state.platforms.for_repo(&repo)?;
    check_pull_request(platform.as_ref(), pr_number, state.options).await
}

async fn run_check(state: &AppState, repo: &str, pr_number: u64) -> Response {
    match check_repo_pr(state, repo, pr_number).await {
        Ok(report) => (StatusCode::OK, report.to_string()).into_response(),
        Err(e) => {
            error!(repo, pr_number, error = %e, "PR check failed");
            error_response(&e)
        }
    }
}

fn error_response(e: &Error) -> Response {
    let status = match e {
        Error::InvalidRepo(_) | Error::Config(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::BAD_GATEWAY,
    };
    (status, e.to_string()).into_response()
}

/// Serve the router until the process is stopped
pub async fn serve(config: &ServerConfig, platforms: Arc<dyn PlatformFactory>) -> Result<()> {
    let state = AppState {
        platforms,
        options: CheckOptions {
            dry_run: config.dry_run,
        },
    };

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    info!(bind = %config.bind, dry_run = config.dry_run, "listening");
    axum::serve(listener, router(state)).await?;
    Ok(())
}
