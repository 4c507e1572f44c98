use std::path::Path;

use axum::{routing::get, Extension, Router};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::endpoints::tickers::{
    fetch_data::index::handler as fetch_data_handler,
    get_data::index::handler as get_data_handler,
};
use crate::state::AppState;

/// API routes, with everything else served from `static_dir` (`/` maps to
/// its `index.html`).
pub fn create_router(state: AppState, static_dir: &Path) -> Router {
    Router::new()
        .route("/fetch-data", get(fetch_data_handler))
        .route("/get-data", get(get_data_handler))
        .fallback_service(ServeDir::new(static_dir))
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
}
