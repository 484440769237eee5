use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Extension, Json,
};

use crate::middleware::RequestId;

use super::{AppState, CACHE_ONE_DAY};

/// Display names of the top categories, cacheable for a day.
///
/// On upstream failure the body stays a valid (empty) array so clients can
/// render, but the status reports the error.
pub(super) async fn list_categories(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Response {
    match state.client.top_categories(state.categories_limit).await {
        Ok(names) => ([(header::CACHE_CONTROL, CACHE_ONE_DAY)], Json(names)).into_response(),
        Err(e) => {
            tracing::error!(error = %e, request_id = %req_id.0, "category enumeration failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(Vec::<String>::new()),
            )
                .into_response()
        }
    }
}
