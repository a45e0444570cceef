use crate::{
    config::RootRegistry,
    errors::AppResult,
    fs::{gate, list},
};
use axum::{
    extract::{Query, Request, State},
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tower::ServiceExt;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::info;

pub const STATIC_DIR: &str = "static";

const INDEX_HTML: &str = include_str!("../static/index.html");

#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<RootRegistry>,
}

pub async fn serve(registry: RootRegistry, port: u16) -> anyhow::Result<()> {
    let state = AppState {
        registry: Arc::new(registry),
    };
    let app = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %addr, "vitrine ready");
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .nest_service("/static", ServeDir::new(STATIC_DIR))
        .route("/api/config", get(api_config))
        .route("/api/list", get(api_list))
        .route("/api/file", get(api_file))
        .route("/api/text_preview", get(api_text_preview))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

#[derive(Debug, Serialize)]
struct ConfigView {
    allowed_roots: Vec<PathBuf>,
}

async fn api_config(State(state): State<AppState>) -> Json<ConfigView> {
    Json(ConfigView {
        allowed_roots: state.registry.allowed_roots(),
    })
}

#[derive(Debug, Deserialize)]
struct BrowseParams {
    root: Option<String>,
    path: Option<String>,
}

async fn api_list(State(state): State<AppState>, Query(params): Query<BrowseParams>) -> Response {
    let started = Instant::now();
    let request_id = uuid::Uuid::new_v4().to_string();
    match list_inner(&state, &params) {
        Ok(listing) => {
            audit(&request_id, "list", "allow", "OK", ms(started));
            Json(listing).into_response()
        }
        Err(err) => {
            audit(&request_id, "list", "deny", err.code(), ms(started));
            err.into_response()
        }
    }
}

fn list_inner(state: &AppState, params: &BrowseParams) -> AppResult<list::Listing> {
    let root = chosen_root(params.root.as_deref(), &state.registry);
    let requested = params.path.as_deref().unwrap_or("");
    let target = gate::validate_target(&root, requested)?;
    let entries = list::list_directory(&target)?;
    let parent = list::parent_within(&target, &root);
    Ok(list::Listing {
        path: target,
        entries,
        parent,
    })
}

async fn api_file(
    State(state): State<AppState>,
    Query(params): Query<BrowseParams>,
    req: Request,
) -> Response {
    let started = Instant::now();
    let request_id = uuid::Uuid::new_v4().to_string();
    let target = match file_target(&state, &params) {
        Ok(target) => target,
        Err(err) => {
            audit(&request_id, "file", "deny", err.code(), ms(started));
            return err.into_response();
        }
    };
    // ServeFile handles range and conditional requests; the MIME type comes
    // from the file name with an octet-stream fallback.
    match ServeFile::new(&target).oneshot(req).await {
        Ok(res) => {
            audit(&request_id, "file", "allow", "OK", ms(started));
            res.into_response()
        }
        Err(err) => match err {},
    }
}

async fn api_text_preview(
    State(state): State<AppState>,
    Query(params): Query<BrowseParams>,
) -> Response {
    let started = Instant::now();
    let request_id = uuid::Uuid::new_v4().to_string();
    match preview_inner(&state, &params) {
        Ok(preview) => {
            audit(&request_id, "text_preview", "allow", "OK", ms(started));
            Json(preview).into_response()
        }
        Err(err) => {
            audit(&request_id, "text_preview", "deny", err.code(), ms(started));
            err.into_response()
        }
    }
}

fn preview_inner(state: &AppState, params: &BrowseParams) -> AppResult<gate::Preview> {
    let target = file_target(state, params)?;
    gate::read_preview(&target)
}

/// Shared validation chain for the file endpoints: require a path, resolve
/// and contain it, then re-verify at access time.
fn file_target(state: &AppState, params: &BrowseParams) -> AppResult<PathBuf> {
    let root = chosen_root(params.root.as_deref(), &state.registry);
    let target = gate::validate_file_target(&root, params.path.as_deref())?;
    gate::open_file_target(&target, &root)
}

fn chosen_root(param: Option<&str>, registry: &RootRegistry) -> PathBuf {
    match param.filter(|r| !r.is_empty()) {
        Some(root) => PathBuf::from(root),
        None => registry.default_root(),
    }
}

fn ms(started: Instant) -> u64 {
    started.elapsed().as_millis() as u64
}

fn audit(request_id: &str, endpoint: &str, decision: &str, code: &str, duration_ms: u64) {
    tracing::info!(
        request_id = request_id,
        endpoint = endpoint,
        decision = decision,
        code = code,
        duration_ms = duration_ms,
        "audit"
    );
}
