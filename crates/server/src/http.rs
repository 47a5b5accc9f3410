//! Transporte HTTP: `POST /command/` com corpo `{"command": "..."}`.

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Response as HttpResponse},
    routing::post,
};
use serde::Deserialize;
use serde_json::{Map, Value as JsonValue};
use tower::limit::GlobalConcurrencyLimitLayer;
use tower_http::trace::TraceLayer;
use tracing::debug;

use quiverdb_common::COMMAND_PATH;
use quiverdb_protocol::Reply;

use crate::Dispatcher;

#[derive(Debug, Default, Deserialize)]
struct CommandRequest {
    // Campo ausente equivale a comando vazio
    #[serde(default)]
    command: String,
}

/// Monta o router HTTP. `max_connections` limita requisições simultâneas,
/// incluindo BQPOPs pendentes, com um único semáforo para o processo todo.
pub fn router(dispatcher: Dispatcher, max_connections: usize) -> Router {
    Router::new()
        .route(COMMAND_PATH, post(handle_command))
        .layer(GlobalConcurrencyLimitLayer::new(max_connections.max(1)))
        .layer(TraceLayer::new_for_http())
        .with_state(dispatcher)
}

async fn handle_command(
    State(dispatcher): State<Dispatcher>,
    headers: HeaderMap,
    body: Bytes,
) -> HttpResponse {
    let is_json = headers
        .get(CONTENT_TYPE)
        .is_some_and(|v| v.as_bytes() == b"application/json");
    if !is_json {
        return StatusCode::BAD_REQUEST.into_response();
    }

    let Some(request) = decode_request(&body) else {
        return StatusCode::BAD_REQUEST.into_response();
    };

    let response = dispatcher.execute(&request.command).await;
    let status = StatusCode::from_u16(response.status.code())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    (status, Json(reply_to_json(response.reply))).into_response()
}

/// Lê só o primeiro valor JSON do corpo. Bytes depois dele são ignorados e
/// `null` vale como comando vazio.
fn decode_request(body: &[u8]) -> Option<CommandRequest> {
    let first = serde_json::Deserializer::from_slice(body)
        .into_iter::<Option<CommandRequest>>()
        .next();

    match first {
        Some(Ok(request)) => Some(request.unwrap_or_default()),
        Some(Err(e)) => {
            debug!("corpo JSON inválido: {e}");
            None
        }
        None => {
            debug!("corpo vazio");
            None
        }
    }
}

/// Scalar vira string JSON, Fields vira objeto e Empty vira `null`.
pub fn reply_to_json(reply: Reply) -> JsonValue {
    match reply {
        Reply::Scalar(s) => JsonValue::String(s),
        Reply::Fields(fields) => JsonValue::Object(
            fields
                .into_iter()
                .map(|(k, v)| (k, JsonValue::String(v)))
                .collect::<Map<_, _>>(),
        ),
        Reply::Empty => JsonValue::Null,
    }
}
