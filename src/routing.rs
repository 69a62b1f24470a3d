//! Application router configuration.

use std::path::Path;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower_http::services::{ServeDir, ServeFile};

use crate::{
    AppState, endpoints,
    not_found::get_404_not_found,
    offline_cache::offline_cache_middleware,
    transaction::{
        cancel_draft_endpoint, create_transaction_endpoint, get_tracker_page,
        reset_ledger_endpoint, select_type_endpoint, update_draft_fields_endpoint,
    },
};

/// Return a router with all the app's routes.
///
/// `GET` requests for assets in the offline cache are answered from the cache.
pub fn build_router(state: AppState) -> Router {
    let offline_cache = state.offline_cache.clone();

    Router::new()
        .route(endpoints::ROOT, get(get_tracker_page))
        .route(endpoints::DRAFT_TYPE_API, post(select_type_endpoint))
        .route(endpoints::DRAFT_FIELDS_API, post(update_draft_fields_endpoint))
        .route(endpoints::DRAFT_CANCEL_API, post(cancel_draft_endpoint))
        .route(
            endpoints::TRANSACTIONS_API,
            post(create_transaction_endpoint),
        )
        .route(endpoints::RESET_API, post(reset_ledger_endpoint))
        .merge(build_asset_router(&state.asset_dir))
        .fallback(get_404_not_found)
        .layer(middleware::from_fn_with_state(
            offline_cache,
            offline_cache_middleware,
        ))
        .with_state(state)
}

/// Return a router that serves the web app manifest and the files in `asset_dir`.
///
/// This router is also used to fill the offline cache at startup.
pub fn build_asset_router<S>(asset_dir: &Path) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route_service(
            endpoints::MANIFEST,
            ServeFile::new(asset_dir.join("manifest.json")),
        )
        .nest_service(endpoints::STATIC, ServeDir::new(asset_dir))
}
