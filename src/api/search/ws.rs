use axum::{
    extract::{
        ws::{close_code, CloseFrame, Message, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use futures::{Sink, SinkExt, Stream, StreamExt};
use std::fmt::Display;
use std::sync::Arc;

use company_search::error::SearchError;
use company_search::search::SearchResponse;

use super::respond;
use crate::state::AppState;

/// GET /ws/search/ - upgrade to the search socket
pub async fn ws_search(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> Response {
    ws.on_upgrade(move |socket| async move {
        let (sender, receiver) = socket.split();
        serve_connection(state, receiver, sender).await;
    })
}

/// Drive one connection until the client leaves or the store fails
pub async fn serve_connection<R, W, E>(state: Arc<AppState>, mut receiver: R, mut sender: W)
where
    R: Stream<Item = Result<Message, E>> + Unpin,
    E: Display,
    W: Sink<Message> + Unpin,
    W::Error: Display,
{
    tracing::info!("Handshaked with WebSocket successfully");

    while let Some(frame) = receiver.next().await {
        let outcome = match frame {
            Ok(Message::Text(text)) => respond(&state, &text).await,
            Ok(Message::Binary(bytes)) => match String::from_utf8(bytes) {
                Ok(text) => respond(&state, &text).await,
                Err(_) => Ok(SearchResponse::error(SearchError::MalformedPayload.to_string())),
            },
            // Pongs are answered by the transport
            Ok(Message::Ping(_)) | Ok(Message::Pong(_)) => continue,
            Ok(Message::Close(frame)) => {
                match frame {
                    Some(frame) => tracing::info!("WebSocket connection closed with code: {}", frame.code),
                    None => tracing::info!("WebSocket connection closed without code"),
                }
                return;
            }
            Err(e) => {
                tracing::warn!("WebSocket receive failed: {}", e);
                break;
            }
        };

        let response = match outcome {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("Company search failed, closing connection: {}", e);
                let close = Message::Close(Some(CloseFrame {
                    code: close_code::ERROR,
                    reason: "search failed".into(),
                }));
                if let Err(e) = sender.send(close).await {
                    tracing::warn!("Failed to send close frame: {}", e);
                }
                break;
            }
        };

        if let Err(e) = send_response(&mut sender, &response).await {
            tracing::warn!("Failed to send search response: {}", e);
            break;
        }
    }

    tracing::info!("WebSocket connection closed");
}

async fn send_response<W>(sender: &mut W, response: &SearchResponse) -> Result<(), String>
where
    W: Sink<Message> + Unpin,
    W::Error: Display,
{
    let text = serde_json::to_string(response).map_err(|e| e.to_string())?;
    sender.send(Message::Text(text)).await.map_err(|e| e.to_string())
}
