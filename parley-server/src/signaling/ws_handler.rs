use crate::signaling::AppState;
use crate::transport::WsConnection;
use axum::extract::ws::WebSocket;
use axum::extract::{State, WebSocketUpgrade};
use axum::response::IntoResponse;
use tracing::{debug, info};

/// Upgrades the request and hands the socket to the registry's admission
/// flow. Join failures are reported to the peer in-band.
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    let limit = state.registry.config().max_message_size;

    ws.max_message_size(limit)
        .on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: AppState) {
    match state.registry.join(WsConnection::split(socket)).await {
        Ok(()) => debug!("websocket session started"),
        Err(e) => info!(error = %e, "websocket join refused"),
    }
}
