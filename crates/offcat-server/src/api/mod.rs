mod categories;
mod products;

use std::time::Duration;

use axum::{
    http::{header, HeaderName, Method},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use offcat_client::OffClient;
use offcat_core::AppConfig;

use crate::middleware::{enforce_rate_limit, request_id, RateLimitState};

/// Cache hint for single products and listings (1 hour).
pub(crate) const CACHE_ONE_HOUR: &str = "public, max-age=3600";
/// Cache hint for the slow-moving category enumeration (24 hours).
pub(crate) const CACHE_ONE_DAY: &str = "public, max-age=86400";

#[derive(Clone)]
pub struct AppState {
    pub client: OffClient,
    pub default_page_size: u32,
    pub max_page_size: u32,
    pub categories_limit: usize,
}

impl AppState {
    #[must_use]
    pub fn new(client: OffClient, config: &AppConfig) -> Self {
        Self {
            client,
            default_page_size: config.default_page_size,
            max_page_size: config.max_page_size,
            categories_limit: config.categories_limit,
        }
    }

    /// Applies the default and clamps a client-requested page size.
    pub(crate) fn normalize_page_size(&self, requested: Option<u32>) -> u32 {
        requested
            .unwrap_or(self.default_page_size)
            .clamp(1, self.max_page_size)
    }
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static("x-request-id"),
        ])
}

/// Assembles the full router: the upstream-mirroring product surface plus
/// health, behind CORS, request-id, and rate-limit layers.
pub fn build_app(state: AppState, rate_limit: RateLimitState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/categories", get(categories::list_categories))
        .route("/api/products/search", get(products::search_products))
        .route("/api/products/barcode", get(products::product_by_barcode))
        .route("/api/products/category", get(products::products_by_category))
        .route("/api/products/popular", get(products::popular_products))
        .layer(
            ServiceBuilder::new()
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id))
                .layer(axum::middleware::from_fn_with_state(
                    rate_limit,
                    enforce_rate_limit,
                )),
        )
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    Json(HealthData { status: "ok" })
}

pub fn default_rate_limit_state() -> RateLimitState {
    RateLimitState::new(120, Duration::from_secs(60))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> AppState {
        let client = OffClient::with_base_url("offcat-test/0.1", 30, "http://localhost:9")
            .expect("client construction should not fail");
        AppState {
            client,
            default_page_size: 24,
            max_page_size: 100,
            categories_limit: 50,
        }
    }

    #[test]
    fn normalize_page_size_applies_default_and_bounds() {
        let s = state();
        assert_eq!(s.normalize_page_size(None), 24);
        assert_eq!(s.normalize_page_size(Some(0)), 1);
        assert_eq!(s.normalize_page_size(Some(10)), 10);
        assert_eq!(s.normalize_page_size(Some(10_000)), 100);
    }

    #[test]
    fn health_data_is_serializable() {
        let json = serde_json::to_string(&HealthData { status: "ok" }).expect("serialize");
        assert_eq!(json, r#"{"status":"ok"}"#);
    }
}
