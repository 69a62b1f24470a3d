//! A named, in-memory cache of static assets that is filled once at startup
//! and then answers matching `GET` requests before they reach the router.

use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

use axum::{
    Router,
    body::{Body, Bytes},
    extract::{Request, State},
    http::{HeaderMap, Method, StatusCode, Uri},
    middleware::Next,
    response::Response,
};
use tower::ServiceExt;

use crate::{Error, endpoints};

/// The name of the cache when none is configured.
pub const DEFAULT_CACHE_NAME: &str = "expense-tracker-cache-v1";

/// The assets installed into the cache when none are configured.
///
/// The tracker page itself changes with every transaction so it is not cached.
pub const DEFAULT_PRECACHE_PATHS: [&str; 3] = [
    endpoints::MANIFEST,
    "/static/icons/icon-192x192.svg",
    "/static/icons/icon-512x512.svg",
];

#[derive(Debug, Clone)]
struct CachedResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

impl CachedResponse {
    fn to_response(&self) -> Response {
        let mut response = Response::new(Body::from(self.body.clone()));
        *response.status_mut() = self.status;
        *response.headers_mut() = self.headers.clone();

        response
    }
}

/// Responses to `GET` requests keyed by request path.
///
/// Entries are only added by [OfflineCache::install] and are never evicted.
#[derive(Debug, Clone)]
pub struct OfflineCache {
    name: String,
    entries: Arc<RwLock<HashMap<String, CachedResponse>>>,
}

impl OfflineCache {
    /// Create an empty cache called `name`.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            entries: Arc::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fetch each of `paths` from `network` and store the responses.
    ///
    /// Either every path is cached or none are. Returns the number of cached
    /// responses.
    ///
    /// # Errors
    /// Returns an [Error::AssetFetchFailed] for the first path that is not a
    /// valid URI, does not respond with a success status code, or whose body
    /// cannot be read. Returns an [Error::StateLockError] if the cache lock is
    /// poisoned.
    pub async fn install(&self, network: Router, paths: &[String]) -> Result<usize, Error> {
        let mut fetched = HashMap::with_capacity(paths.len());

        for path in paths {
            let response = fetch(network.clone(), path).await?;
            tracing::debug!("Fetched {path} for cache {}", self.name);
            fetched.insert(path.clone(), response);
        }

        let mut entries = self.entries.write().map_err(|error| {
            tracing::error!("could not acquire offline cache lock: {error}");
            Error::StateLockError
        })?;
        entries.extend(fetched);

        tracing::info!("Installed {} assets in cache {}", entries.len(), self.name);

        Ok(entries.len())
    }

    /// The cached response for `key`, if there is one.
    fn match_request(&self, key: &str) -> Option<Response> {
        match self.entries.read() {
            Ok(entries) => entries.get(key).map(CachedResponse::to_response),
            Err(error) => {
                tracing::error!("could not acquire offline cache lock: {error}");
                None
            }
        }
    }

    /// The number of cached responses.
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .map(|entries| entries.len())
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

async fn fetch(network: Router, path: &str) -> Result<CachedResponse, Error> {
    let fetch_failed = |reason: String| Error::AssetFetchFailed {
        path: path.to_owned(),
        reason,
    };

    let request = Request::builder()
        .method(Method::GET)
        .uri(path)
        .body(Body::empty())
        .map_err(|error| fetch_failed(error.to_string()))?;

    let response = match network.oneshot(request).await {
        Ok(response) => response,
        Err(infallible) => match infallible {},
    };

    let status = response.status();
    if !status.is_success() {
        return Err(fetch_failed(format!("the server responded with {status}")));
    }

    let (parts, body) = response.into_parts();
    let body = axum::body::to_bytes(body, usize::MAX)
        .await
        .map_err(|error| fetch_failed(error.to_string()))?;

    Ok(CachedResponse {
        status: parts.status,
        headers: parts.headers,
        body,
    })
}

fn cache_key(uri: &Uri) -> &str {
    uri.path_and_query()
        .map(|path_and_query| path_and_query.as_str())
        .unwrap_or_else(|| uri.path())
}

/// Answer `GET` requests from the cache, falling back to the network.
///
/// Network responses are passed through as is and are not added to the cache.
pub async fn offline_cache_middleware(
    State(cache): State<OfflineCache>,
    request: Request,
    next: Next,
) -> Response {
    if request.method() == Method::GET {
        let key = cache_key(request.uri());

        if let Some(response) = cache.match_request(key) {
            tracing::debug!("Serving {key} from cache {}", cache.name());
            return response;
        }
    }

    next.run(request).await
}

#[cfg(test)]
mod tests {
    use std::fs;

    use axum::{Router, middleware, routing::get};
    use axum_test::TestServer;
    use tempfile::TempDir;

    use crate::{Error, routing::build_asset_router};

    use super::{DEFAULT_CACHE_NAME, OfflineCache, offline_cache_middleware};

    fn get_asset_dir() -> TempDir {
        let dir = tempfile::tempdir().expect("Could not create temp dir");
        fs::write(dir.path().join("manifest.json"), r#"{"name":"Cashbook"}"#)
            .expect("Could not write manifest");
        fs::write(dir.path().join("main.css"), "body { margin: 0; }")
            .expect("Could not write stylesheet");

        dir
    }

    fn get_test_server(cache: OfflineCache, asset_dir: &TempDir) -> TestServer {
        let app: Router = build_asset_router(asset_dir.path())
            .layer(middleware::from_fn_with_state(cache, offline_cache_middleware));

        TestServer::new(app).expect("Could not create test server")
    }

    fn paths(paths: &[&str]) -> Vec<String> {
        paths.iter().map(|path| path.to_string()).collect()
    }

    #[tokio::test]
    async fn install_caches_every_path() {
        let asset_dir = get_asset_dir();
        let cache = OfflineCache::new(DEFAULT_CACHE_NAME);

        let count = cache
            .install(
                build_asset_router(asset_dir.path()),
                &paths(&["/manifest.json", "/static/main.css"]),
            )
            .await;

        assert_eq!(count, Ok(2));
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.name(), "expense-tracker-cache-v1");
    }

    #[tokio::test]
    async fn install_is_all_or_nothing() {
        let asset_dir = get_asset_dir();
        let cache = OfflineCache::new(DEFAULT_CACHE_NAME);

        let result = cache
            .install(
                build_asset_router(asset_dir.path()),
                &paths(&["/manifest.json", "/static/missing.png"]),
            )
            .await;

        assert!(
            matches!(
                &result,
                Err(Error::AssetFetchFailed { path, .. }) if path == "/static/missing.png"
            ),
            "want fetch failure for missing asset, got {result:?}"
        );
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn cached_assets_are_served_without_the_network() {
        let asset_dir = get_asset_dir();
        let cache = OfflineCache::new(DEFAULT_CACHE_NAME);
        cache
            .install(
                build_asset_router(asset_dir.path()),
                &paths(&["/manifest.json"]),
            )
            .await
            .unwrap();
        fs::remove_file(asset_dir.path().join("manifest.json")).unwrap();
        let server = get_test_server(cache, &asset_dir);

        let response = server.get("/manifest.json").await;

        response.assert_status_ok();
        response.assert_text(r#"{"name":"Cashbook"}"#);
    }

    #[tokio::test]
    async fn uncached_requests_fall_through_to_the_network() {
        let asset_dir = get_asset_dir();
        let server = get_test_server(OfflineCache::new(DEFAULT_CACHE_NAME), &asset_dir);

        let response = server.get("/static/main.css").await;

        response.assert_status_ok();
        response.assert_text("body { margin: 0; }");
    }

    #[tokio::test]
    async fn only_get_requests_are_answered_from_cache() {
        let network = Router::new().route(
            "/data",
            get(|| async { "from network" }).post(|| async { "posted" }),
        );
        let cache = OfflineCache::new(DEFAULT_CACHE_NAME);
        cache
            .install(network.clone(), &paths(&["/data"]))
            .await
            .unwrap();
        let app = network.layer(middleware::from_fn_with_state(
            cache,
            offline_cache_middleware,
        ));
        let server = TestServer::new(app).expect("Could not create test server");

        let response = server.post("/data").await;

        response.assert_status_ok();
        response.assert_text("posted");
    }
}
