use anyhow::Result;
use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use sift_core::{SearchSegmenter, Searcher, SegmenterConfig};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub searcher: Arc<Searcher>,
}

/// Build the router: index the corpus once at startup, then serve `/searcher`
/// from the immutable index and static assets from the web root.
pub fn build_app(
    corpus_path: &Path,
    wwwroot: &Path,
    segmenter_config: &SegmenterConfig,
) -> Result<Router> {
    let segmenter = Arc::new(SearchSegmenter::new(segmenter_config)?);
    let searcher = Searcher::init(corpus_path, segmenter)?;
    tracing::info!(
        corpus = %corpus_path.display(),
        num_docs = searcher.index().doc_count(),
        "searcher ready"
    );
    let state = AppState { searcher: Arc::new(searcher) };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/searcher", get(search_handler))
        .fallback_service(ServeDir::new(wwwroot))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());
    Ok(app)
}

/// `GET /searcher?query=...` — forwards the query to the core verbatim. The
/// response body is exactly `Searcher::search` output.
pub async fn search_handler(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let Some(query) = params.get("query") else {
        return (StatusCode::BAD_REQUEST, "missing required parameter: query").into_response();
    };
    match state.searcher.search(query) {
        Ok(body) => (
            [(header::CONTENT_TYPE, "application/json; charset=utf-8")],
            body,
        )
            .into_response(),
        Err(err) => {
            tracing::error!(%err, "search failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "search failed").into_response()
        }
    }
}
