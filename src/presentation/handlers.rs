// HTTP request handlers - KPI catalog
use crate::application::catalog_service::AccessRequestStatus;
use crate::domain::kpi::KpiId;
use crate::infrastructure::http_response::{accepts_brotli, json_response};
use crate::presentation::api_error::ApiError;
use crate::presentation::app_state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Deserialize)]
pub struct KpiQuery {
    pub category: Option<String>,
    pub search: Option<String>,
}

#[derive(Deserialize, Default)]
pub struct AccessRequestBody {
    #[serde(default)]
    pub reason: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AccessRequestResponse {
    kpi_id: KpiId,
    status: AccessRequestStatus,
}

/// Serializes `body`, compressing it when the client accepts Brotli.
pub(crate) async fn respond<T: Serialize>(headers: &HeaderMap, status: StatusCode, body: &T) -> Response {
    match json_response(status, body, accepts_brotli(headers)).await {
        Ok(response) => response.into_response(),
        Err(status) => status.into_response(),
    }
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// List catalog entries, optionally filtered by category and search text
pub async fn list_kpis(
    headers: HeaderMap,
    Query(query): Query<KpiQuery>,
    State(state): State<Arc<AppState>>,
) -> Response {
    let kpis = state
        .catalog_service
        .list_kpis(query.category.as_deref(), query.search.as_deref());
    respond(&headers, StatusCode::OK, &kpis).await
}

pub async fn list_categories(headers: HeaderMap, State(state): State<Arc<AppState>>) -> Response {
    respond(&headers, StatusCode::OK, &state.catalog_service.categories()).await
}

pub async fn get_kpi(
    Path(kpi_id): Path<String>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Result<Response, ApiError> {
    let kpi = state.catalog_service.get_kpi(&KpiId::from(kpi_id))?;
    Ok(respond(&headers, StatusCode::OK, &kpi).await)
}

/// Request access to a restricted KPI; approval arrives later.
pub async fn request_access(
    Path(kpi_id): Path<String>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
    body: Option<Json<AccessRequestBody>>,
) -> Result<Response, ApiError> {
    let Json(body) = body.unwrap_or_default();
    let kpi_id = KpiId::from(kpi_id);
    let status = state.catalog_service.request_access(&kpi_id, &body.reason)?;

    let code = match status {
        AccessRequestStatus::AlreadyGranted => StatusCode::OK,
        AccessRequestStatus::Pending => StatusCode::ACCEPTED,
    };
    Ok(respond(&headers, code, &AccessRequestResponse { kpi_id, status }).await)
}
