use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use brightpath_store::Subscription;

use crate::api::contents::content_filters;
use crate::api::ApiError;
use crate::state::AppState;

// ── WebSocket Messages ──────────────────────────────────────────

#[derive(Serialize)]
struct WsMessage<T: Serialize> {
    #[serde(rename = "type")]
    msg_type: &'static str,
    data: T,
}

fn ws_json<T: Serialize>(msg_type: &'static str, data: T) -> String {
    serde_json::to_string(&WsMessage { msg_type, data }).unwrap_or_default()
}

#[derive(Debug, Default, Deserialize)]
pub struct WatchParams {
    #[serde(rename = "type")]
    pub content_type: Option<String>,
    pub category: Option<String>,
    pub created_by: Option<String>,
}

// ── WebSocket Handler ───────────────────────────────────────────

/// Live change feed for the contents collection.
///
/// The subscription is opened before the upgrade completes so no change
/// made after the request arrives is missed.
pub async fn contents_ws(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Query(params): Query<WatchParams>,
) -> Result<impl IntoResponse, ApiError> {
    let filters = content_filters(
        params.content_type.as_deref(),
        params.category.as_deref(),
        params.created_by.as_deref(),
        None,
    )?;
    let subscription = state.store.subscribe(state.contents(), filters);
    Ok(ws.on_upgrade(move |socket| handle_ws(socket, subscription)))
}

async fn handle_ws(socket: WebSocket, mut subscription: Subscription) {
    let (mut sender, mut receiver) = socket.split();
    info!("Contents subscriber connected");

    // Forward matching change events to this client.
    let send_task = tokio::spawn(async move {
        while let Some(event) = subscription.next().await {
            debug!(id = %event.id, kind = ?event.kind, "Pushing change event");
            if sender
                .send(Message::Text(ws_json("change", &event).into()))
                .await
                .is_err()
            {
                break;
            }
        }
    });

    // Consume incoming messages (pings, close frames) but ignore content.
    let recv_task = tokio::spawn(async move {
        while let Some(Ok(msg)) = receiver.next().await {
            if matches!(msg, Message::Close(_)) {
                break;
            }
        }
    });

    tokio::select! {
        _ = send_task => {},
        _ = recv_task => {},
    }
    info!("Contents subscriber disconnected");
}
