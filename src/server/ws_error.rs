/// Centralized helpers for WebSocket and HTTP error responses.
///
/// Use these helpers to ensure all error messages are consistent, explicit, and include a code and context.
use actix_web::{HttpResponse, http::StatusCode};
use serde_json::Value;

use crate::server::game_session::messages::ServerWsMessage;

/// Formats a WebSocket error message as a JSON string.
///
/// # Arguments
/// - `code`: Unique error code (e.g. "INVALID_COMMAND").
/// - `message`: Human-readable error message (in English).
/// - `context`: Optional context (e.g. player id, game id).
pub fn ws_error_message(code: &str, message: &str, context: Option<Value>) -> String {
    let msg = ServerWsMessage::error(code, message, context);
    serde_json::to_string(&msg).unwrap_or_else(|_| {
        format!(r#"{{"action":"Error","data":{{"code":"{}","message":"","context":null}}}}"#, code)
    })
}

/// Returns an HTTP error response with a JSON body.
///
/// # Arguments
/// - `code`: Unique error code.
/// - `message`: Human-readable error message.
/// - `context`: Optional context value.
/// - `status`: HTTP status code.
pub fn http_error_response(
    code: &str,
    message: &str,
    context: Option<Value>,
    status: StatusCode,
) -> HttpResponse {
    let body = serde_json::json!({
        "error": {
            "code": code,
            "message": message,
            "context": context,
        }
    });
    HttpResponse::build(status).json(body)
}
