use crate::errors::ServerError;
use astra::{Body, Response, ResponseBuilder};
use serde_json::json;

pub type ResultResp = Result<Response, ServerError>;

/// Convert a ServerError into a JSON error response
pub fn error_to_response(err: ServerError) -> Response {
    let status = err.status_code();
    let detail = match &err {
        // Never leak driver messages to clients.
        ServerError::DbError(_) | ServerError::InternalError => "Internal Server Error".to_string(),
        other => other.to_string(),
    };

    let body = json!({ "detail": detail }).to_string();

    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", "application/json")
        .body(Body::from(body))
        .unwrap_or_else(|_| Response::new(Body::from("Internal Server Error")))
}
