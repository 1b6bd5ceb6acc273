// HTTP request handlers - Per-session draft, layouts and gestures
use crate::application::errors::SessionError;
use crate::application::gesture::{GestureCommit, GestureKind};
use crate::application::layout_session::{DraftView, LayoutSession, PendingAction, Transition};
use crate::domain::chart::{ChartItem, ChartKind, ItemId};
use crate::domain::geometry::{PointerPosition, Position, Size};
use crate::domain::kpi::KpiId;
use crate::domain::layout::LayoutId;
use crate::presentation::api_error::ApiError;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::respond;
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::Response,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Deserialize)]
pub struct RenameRequest {
    pub name: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemRequest {
    pub kind: ChartKind,
    pub kpi_id: KpiId,
    pub position: Option<Position>,
}

#[derive(Deserialize)]
pub struct TitleRequest {
    pub title: String,
}

#[derive(Deserialize)]
pub struct CommentRequest {
    pub comment: Option<String>,
}

#[derive(Deserialize, Default)]
pub struct SaveRequest {
    pub name: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeginGestureRequest {
    pub gesture: GestureKind,
    pub pointer: PointerPosition,
    pub grid_origin: PointerPosition,
}

#[derive(Deserialize)]
pub struct PointerRequest {
    pub pointer: PointerPosition,
}

#[derive(Serialize)]
struct AddItemResponse {
    item: ChartItem,
    draft: DraftView,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TransitionResponse {
    confirmation_required: bool,
    pending: Option<PendingAction>,
    draft: DraftView,
}

#[derive(Serialize)]
struct PendingResponse {
    action: PendingAction,
    draft: DraftView,
}

#[derive(Serialize)]
struct GestureEndResponse {
    commit: GestureCommit,
    draft: DraftView,
}

/// Completed transitions answer 200, parked ones 202.
fn transition_response(session: &LayoutSession, transition: Transition) -> (StatusCode, TransitionResponse) {
    let (status, pending) = match transition {
        Transition::Completed => (StatusCode::OK, None),
        Transition::NeedsConfirmation(action) => (StatusCode::ACCEPTED, Some(action)),
    };
    let body = TransitionResponse {
        confirmation_required: pending.is_some(),
        pending,
        draft: session.view(),
    };
    (status, body)
}

pub async fn get_draft(
    Path(sid): Path<String>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response {
    let draft = state.sessions.read_session(&sid, |session| session.view());
    respond(&headers, StatusCode::OK, &draft).await
}

pub async fn rename_draft(
    Path(sid): Path<String>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
    Json(body): Json<RenameRequest>,
) -> Response {
    let draft = state.sessions.with_session(&sid, |session| {
        session.editor_mut().rename(body.name);
        session.view()
    });
    respond(&headers, StatusCode::OK, &draft).await
}

pub async fn add_item(
    Path(sid): Path<String>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
    Json(body): Json<AddItemRequest>,
) -> Result<Response, ApiError> {
    let added = state.sessions.with_session(&sid, |session| {
        let item = session
            .editor_mut()
            .add_item(body.kind, &body.kpi_id, body.position)?;
        Ok::<_, SessionError>(AddItemResponse {
            item,
            draft: session.view(),
        })
    })?;
    Ok(respond(&headers, StatusCode::CREATED, &added).await)
}

pub async fn move_item(
    Path((sid, item_id)): Path<(String, String)>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
    Json(position): Json<Position>,
) -> Result<Response, ApiError> {
    let item_id = ItemId::from(item_id);
    let draft = state.sessions.with_session(&sid, |session| {
        session.editor_mut().move_item(&item_id, position)?;
        Ok::<_, SessionError>(session.view())
    })?;
    Ok(respond(&headers, StatusCode::OK, &draft).await)
}

pub async fn resize_item(
    Path((sid, item_id)): Path<(String, String)>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
    Json(size): Json<Size>,
) -> Result<Response, ApiError> {
    let item_id = ItemId::from(item_id);
    let draft = state.sessions.with_session(&sid, |session| {
        session.editor_mut().resize_item(&item_id, size)?;
        Ok::<_, SessionError>(session.view())
    })?;
    Ok(respond(&headers, StatusCode::OK, &draft).await)
}

pub async fn update_title(
    Path((sid, item_id)): Path<(String, String)>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
    Json(body): Json<TitleRequest>,
) -> Result<Response, ApiError> {
    let item_id = ItemId::from(item_id);
    let draft = state.sessions.with_session(&sid, |session| {
        session.editor_mut().update_title(&item_id, body.title)?;
        Ok::<_, SessionError>(session.view())
    })?;
    Ok(respond(&headers, StatusCode::OK, &draft).await)
}

pub async fn update_comment(
    Path((sid, item_id)): Path<(String, String)>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
    Json(body): Json<CommentRequest>,
) -> Result<Response, ApiError> {
    let item_id = ItemId::from(item_id);
    let draft = state.sessions.with_session(&sid, |session| {
        session.editor_mut().update_comment(&item_id, body.comment)?;
        Ok::<_, SessionError>(session.view())
    })?;
    Ok(respond(&headers, StatusCode::OK, &draft).await)
}

/// Unknown ids answer 404 and leave the draft untouched.
pub async fn remove_item(
    Path((sid, item_id)): Path<(String, String)>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Result<Response, ApiError> {
    let item_id = ItemId::from(item_id);
    let draft = state
        .sessions
        .with_session(&sid, |session| {
            session
                .editor_mut()
                .remove_item(&item_id)
                .then(|| session.view())
        })
        .ok_or_else(|| ApiError::not_found(format!("Chart item not found: {}", item_id)))?;
    Ok(respond(&headers, StatusCode::OK, &draft).await)
}

pub async fn new_draft(
    Path(sid): Path<String>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response {
    let (status, body) = state.sessions.with_session(&sid, |session| {
        let transition = session.request_new();
        transition_response(session, transition)
    });
    respond(&headers, status, &body).await
}

/// Saves under the given name, or the draft's current name when omitted.
pub async fn save_draft(
    Path(sid): Path<String>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
    body: Option<Json<SaveRequest>>,
) -> Result<Response, ApiError> {
    let Json(body) = body.unwrap_or_default();
    let layout = state.sessions.with_session(&sid, |session| {
        let name = body
            .name
            .unwrap_or_else(|| session.editor().name().to_string());
        session.save(&name)
    })?;
    Ok(respond(&headers, StatusCode::OK, &layout).await)
}

pub async fn confirm_pending(
    Path(sid): Path<String>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Result<Response, ApiError> {
    let body = state.sessions.with_session(&sid, |session| {
        let action = session.confirm()?;
        Ok::<_, SessionError>(PendingResponse {
            action,
            draft: session.view(),
        })
    })?;
    Ok(respond(&headers, StatusCode::OK, &body).await)
}

pub async fn cancel_pending(
    Path(sid): Path<String>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Result<Response, ApiError> {
    let body = state.sessions.with_session(&sid, |session| {
        let action = session.cancel().ok_or(SessionError::NothingPending)?;
        Ok::<_, SessionError>(PendingResponse {
            action,
            draft: session.view(),
        })
    })?;
    Ok(respond(&headers, StatusCode::OK, &body).await)
}

pub async fn list_layouts(
    Path(sid): Path<String>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response {
    let layouts = state.sessions.read_session(&sid, |session| session.list());
    respond(&headers, StatusCode::OK, &layouts).await
}

pub async fn load_layout(
    Path((sid, layout_id)): Path<(String, String)>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Result<Response, ApiError> {
    let layout_id = LayoutId::from(layout_id);
    let (status, body) = state.sessions.with_session(&sid, |session| {
        let transition = session.request_load(&layout_id)?;
        Ok::<_, SessionError>(transition_response(session, transition))
    })?;
    Ok(respond(&headers, status, &body).await)
}

pub async fn delete_layout(
    Path((sid, layout_id)): Path<(String, String)>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Result<Response, ApiError> {
    let layout_id = LayoutId::from(layout_id);
    let draft = state.sessions.with_session(&sid, |session| {
        session.delete(&layout_id)?;
        Ok::<_, SessionError>(session.view())
    })?;
    Ok(respond(&headers, StatusCode::OK, &draft).await)
}

pub async fn begin_gesture(
    Path(sid): Path<String>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
    Json(body): Json<BeginGestureRequest>,
) -> Result<Response, ApiError> {
    let draft = state.sessions.with_session(&sid, |session| {
        session.begin_gesture(body.gesture, body.pointer, body.grid_origin)?;
        Ok::<_, SessionError>(session.view())
    })?;
    Ok(respond(&headers, StatusCode::OK, &draft).await)
}

/// Live preview; never changes the draft.
pub async fn update_gesture(
    Path(sid): Path<String>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
    Json(body): Json<PointerRequest>,
) -> Result<Response, ApiError> {
    let preview = state
        .sessions
        .with_session(&sid, |session| session.update_gesture(body.pointer))?;
    Ok(respond(&headers, StatusCode::OK, &preview).await)
}

pub async fn end_gesture(
    Path(sid): Path<String>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Result<Response, ApiError> {
    let body = state.sessions.with_session(&sid, |session| {
        let commit = session.end_gesture()?;
        Ok::<_, SessionError>(GestureEndResponse {
            commit,
            draft: session.view(),
        })
    })?;
    Ok(respond(&headers, StatusCode::OK, &body).await)
}

pub async fn cancel_gesture(
    Path(sid): Path<String>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Result<Response, ApiError> {
    let draft = state.sessions.with_session(&sid, |session| {
        if !session.cancel_gesture() {
            return Err(SessionError::NoActiveGesture);
        }
        Ok(session.view())
    })?;
    Ok(respond(&headers, StatusCode::OK, &draft).await)
}
