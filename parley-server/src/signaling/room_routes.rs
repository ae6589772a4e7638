use crate::error::RegistryError;
use crate::signaling::{AppState, ws_handler};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Deserialize)]
pub struct CreateRoomRequest {
    pub client_key: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateRoomResponse {
    pub room_id: String,
}

#[derive(Debug, Deserialize)]
pub struct DeleteRoomRequest {
    pub room_id: String,
    pub management_key: String,
}

/// Routes of the hub, relative to wherever the caller nests them.
///
/// `GET` upgrades to a WebSocket, `POST` creates a room, `DELETE` tears one
/// down.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(ws_handler).post(create_room).delete(delete_room))
        .with_state(state)
}

pub async fn create_room(
    State(state): State<AppState>,
    Json(request): Json<CreateRoomRequest>,
) -> Result<Json<CreateRoomResponse>, ApiError> {
    let room_id = state.registry.create_room(&request.client_key).await?;
    info!(%room_id, "room created");

    Ok(Json(CreateRoomResponse { room_id }))
}

pub async fn delete_room(
    State(state): State<AppState>,
    Json(request): Json<DeleteRoomRequest>,
) -> StatusCode {
    state.registry.delete_room(&request.room_id, &request.management_key);
    StatusCode::NO_CONTENT
}

/// Error body returned by the HTTP routes: `{"error": "..."}`.
#[derive(Debug)]
pub struct ApiError(RegistryError);

impl From<RegistryError> for ApiError {
    fn from(err: RegistryError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            RegistryError::InvalidManagementKey => StatusCode::BAD_REQUEST,
            RegistryError::Unavailable => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = serde_json::json!({ "error": self.0.to_string() });

        (status, Json(body)).into_response()
    }
}
