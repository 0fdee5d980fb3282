use std::path::Path;
use std::sync::Arc;

use axum::Router;
use axum::extract::{Path as UrlPath, Query, State};
use axum::response::{Html, IntoResponse as _, Json, Response};
use axum::routing::get;
use serde::Deserialize;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::app::api_error::ApiError;
use crate::app::raw_cache::RawDataCache;
use crate::dashboard::Dashboard;
use crate::formats::{BookRecord, ScoredBook};
use crate::popular::TOP_N;
use crate::raw_data::RawTableKind;

#[derive(Debug, Clone)]
pub struct AppState {
    pub dashboard: Arc<Dashboard>,
    pub raw_data: Arc<RawDataCache>,
}

impl AppState {
    pub fn new(dashboard: Dashboard, raw_data: RawDataCache) -> Self {
        Self {
            dashboard: Arc::new(dashboard),
            raw_data: Arc::new(raw_data),
        }
    }
}

/// API routes plus the web bundle in `web_dir` when it has an
/// `index.html`, otherwise a placeholder page.
pub fn router(state: AppState, web_dir: &Path) -> Router {
    let app = Router::new()
        .route("/healthz", get(|| async { "ok\n" }))
        .route("/api/popular", get(popular_handler))
        .route("/api/titles", get(titles_handler))
        .route("/api/recommend", get(recommend_handler))
        .route("/api/raw/:table", get(raw_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let web_index = web_dir.join("index.html");
    if web_index.exists() {
        let static_files = ServeDir::new(web_dir).not_found_service(ServeFile::new(web_index));
        app.fallback_service(static_files)
    } else {
        app.fallback(|| async { Html(PLACEHOLDER_PAGE) })
    }
}

const PLACEHOLDER_PAGE: &str = r#"<!doctype html>
<html>
  <head><meta charset="utf-8"><title>Book Recommender System</title></head>
  <body>
    <h1>Book Recommender System</h1>
    <p>web assets not found. The data is available from the JSON API:</p>
    <ul>
      <li><a href="/api/popular">/api/popular?n=50</a></li>
      <li><a href="/api/titles">/api/titles</a></li>
      <li><code>/api/recommend?title=...</code></li>
      <li><code>/api/raw/{books,ratings,users}?limit=...</code></li>
    </ul>
  </body>
</html>
"#;

#[derive(Debug, Deserialize)]
struct PopularQuery {
    n: Option<usize>,
}

async fn popular_handler(
    State(state): State<AppState>,
    Query(q): Query<PopularQuery>,
) -> Json<Vec<BookRecord>> {
    Json(state.dashboard.top_n(q.n.unwrap_or(TOP_N)))
}

async fn titles_handler(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.dashboard.titles().to_vec())
}

#[derive(Debug, Deserialize)]
struct RecommendQuery {
    #[serde(default)]
    title: String,
}

async fn recommend_handler(
    State(state): State<AppState>,
    Query(q): Query<RecommendQuery>,
) -> Result<Json<Vec<ScoredBook>>, ApiError> {
    if q.title.trim().is_empty() {
        return Err(ApiError::bad_request("title is required"));
    }

    let scored = state.dashboard.recommend_scored(&q.title)?;
    tracing::debug!(title = %q.title, results = scored.len(), "recommended");
    Ok(Json(scored))
}

#[derive(Debug, Deserialize)]
struct RawQuery {
    limit: Option<usize>,
}

async fn raw_handler(
    State(state): State<AppState>,
    UrlPath(table): UrlPath<String>,
    Query(q): Query<RawQuery>,
) -> Result<Response, ApiError> {
    let kind: RawTableKind = table.parse().map_err(ApiError::bad_request)?;
    let cached = state.raw_data.get(kind).await?;

    // Serialized here, while the view still borrows from the cached table.
    Ok(Json(cached.view(q.limit)).into_response())
}
