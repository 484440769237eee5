//! Product listing and lookup handlers.
//!
//! Policy per the error-handling design: listing endpoints (`search`,
//! `category`, `popular`) never surface 5xx — any upstream failure degrades
//! to a well-formed empty envelope with 200, keeping the UI unbroken. Only
//! the barcode lookup (404/500) and malformed requests (400) surface
//! non-200 statuses. Every swallowed failure is logged here, at the
//! boundary where it is caught.

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde::Deserialize;

use offcat_core::PageEnvelope;

use crate::middleware::RequestId;

use super::{AppState, CACHE_ONE_HOUR};

#[derive(Debug, Deserialize)]
pub(super) struct SearchQuery {
    q: Option<String>,
    page: Option<u32>,
    #[serde(rename = "pageSize")]
    page_size: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub(super) struct CategoryQuery {
    category: Option<String>,
    page: Option<u32>,
    #[serde(rename = "pageSize")]
    page_size: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub(super) struct PageQuery {
    page: Option<u32>,
    #[serde(rename = "pageSize")]
    page_size: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub(super) struct BarcodeQuery {
    code: Option<String>,
}

pub(super) async fn search_products(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<SearchQuery>,
) -> Response {
    let page = query.page.unwrap_or(1).max(1);
    let page_size = state.normalize_page_size(query.page_size);

    let Some(q) = query.q.as_deref().map(str::trim).filter(|q| !q.is_empty()) else {
        // Upstream is never called for a blank query.
        return (
            StatusCode::BAD_REQUEST,
            Json(PageEnvelope::empty(1, page_size)),
        )
            .into_response();
    };

    match state.client.search_products(q, page, page_size).await {
        Ok(env) => (
            [(header::CACHE_CONTROL, CACHE_ONE_HOUR)],
            Json(env),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, request_id = %req_id.0, query = q, "product search failed");
            Json(PageEnvelope::empty(page, page_size)).into_response()
        }
    }
}

pub(super) async fn product_by_barcode(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<BarcodeQuery>,
) -> Response {
    let Some(code) = query
        .code
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
    else {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": "code query parameter is required" })),
        )
            .into_response();
    };

    match state.client.product_by_barcode(code).await {
        Ok(Some(product)) => (
            [(header::CACHE_CONTROL, CACHE_ONE_HOUR)],
            Json(product),
        )
            .into_response(),
        Ok(None) => (StatusCode::NOT_FOUND, Json(serde_json::Value::Null)).into_response(),
        Err(e) => {
            tracing::error!(error = %e, request_id = %req_id.0, code, "barcode lookup failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::Value::Null),
            )
                .into_response()
        }
    }
}

pub(super) async fn products_by_category(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<CategoryQuery>,
) -> Response {
    let page = query.page.unwrap_or(1).max(1);
    let page_size = state.normalize_page_size(query.page_size);

    let Some(category) = query
        .category
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
    else {
        return (
            StatusCode::BAD_REQUEST,
            Json(PageEnvelope::empty(1, page_size)),
        )
            .into_response();
    };

    // The two-phase lookup (dedicated listing, then tag search) happens in
    // the client; only the fallback path can fail.
    match state
        .client
        .products_by_category(category, page, page_size)
        .await
    {
        Ok(env) => (
            [(header::CACHE_CONTROL, CACHE_ONE_HOUR)],
            Json(env),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, request_id = %req_id.0, category, "category lookup failed");
            Json(PageEnvelope::empty(page, page_size)).into_response()
        }
    }
}

pub(super) async fn popular_products(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<PageQuery>,
) -> Response {
    let page = query.page.unwrap_or(1).max(1);
    let page_size = state.normalize_page_size(query.page_size);

    match state.client.popular_products(page, page_size).await {
        Ok(env) => (
            [(header::CACHE_CONTROL, CACHE_ONE_HOUR)],
            Json(env),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, request_id = %req_id.0, "popular listing failed");
            Json(PageEnvelope::empty(page, page_size)).into_response()
        }
    }
}
