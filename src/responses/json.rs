use crate::errors::ServerError;
use crate::responses::ResultResp;
use astra::{Body, ResponseBuilder};
use serde::Serialize;

pub fn json_response<T: Serialize + ?Sized>(status: u16, payload: &T) -> ResultResp {
    let body = serde_json::to_vec(payload).map_err(|e| {
        tracing::error!(error = %e, "failed to encode response body");
        ServerError::InternalError
    })?;

    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", "application/json")
        .body(Body::from(body))
        .map_err(|_| ServerError::InternalError)
}
