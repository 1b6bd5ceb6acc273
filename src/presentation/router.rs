// Route table for the dashboard service
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{get_kpi, health_check, list_categories, list_kpis, request_access};
use crate::presentation::session_handlers::{
    add_item, begin_gesture, cancel_gesture, cancel_pending, confirm_pending, delete_layout,
    end_gesture, get_draft, list_layouts, load_layout, move_item, new_draft, remove_item,
    rename_draft, resize_item, save_draft, update_comment, update_gesture, update_title,
};
use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

// Compression is applied by the response builders, so no CompressionLayer here.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/kpis", get(list_kpis))
        .route("/kpis/categories", get(list_categories))
        .route("/kpis/:kpi_id", get(get_kpi))
        .route("/kpis/:kpi_id/access-requests", post(request_access))
        .route("/sessions/:sid/draft", get(get_draft))
        .route("/sessions/:sid/draft/name", put(rename_draft))
        .route("/sessions/:sid/draft/items", post(add_item))
        .route("/sessions/:sid/draft/items/:item_id", delete(remove_item))
        .route("/sessions/:sid/draft/items/:item_id/position", put(move_item))
        .route("/sessions/:sid/draft/items/:item_id/size", put(resize_item))
        .route("/sessions/:sid/draft/items/:item_id/title", put(update_title))
        .route("/sessions/:sid/draft/items/:item_id/comment", put(update_comment))
        .route("/sessions/:sid/draft/new", post(new_draft))
        .route("/sessions/:sid/draft/save", post(save_draft))
        .route("/sessions/:sid/pending/confirm", post(confirm_pending))
        .route("/sessions/:sid/pending/cancel", post(cancel_pending))
        .route("/sessions/:sid/layouts", get(list_layouts))
        .route("/sessions/:sid/layouts/:layout_id", delete(delete_layout))
        .route("/sessions/:sid/layouts/:layout_id/load", post(load_layout))
        .route(
            "/sessions/:sid/gesture",
            post(begin_gesture).put(update_gesture).delete(cancel_gesture),
        )
        .route("/sessions/:sid/gesture/end", post(end_gesture))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
