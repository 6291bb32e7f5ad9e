// errors.rs

/// Errors originating from either the server logic
/// (routing, missing resources, bad records) or downstream layers (DB).
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Not Found")]
    NotFound,
    #[error("Method Not Allowed")]
    MethodNotAllowed,
    #[error("Bad Request: {0}")]
    BadRequest(String),
    /// A record handed to the domain layer could not be interpreted,
    /// e.g. a stored timestamp without an offset.
    #[error("Invalid Input: {0}")]
    InvalidInput(String),
    #[error("Database Error: {0}")]
    DbError(String),
    #[error("Internal Server Error")]
    InternalError,
}

impl From<rusqlite::Error> for ServerError {
    fn from(e: rusqlite::Error) -> Self {
        ServerError::DbError(e.to_string())
    }
}

impl ServerError {
    pub fn status_code(&self) -> u16 {
        match self {
            ServerError::NotFound => 404,
            ServerError::MethodNotAllowed => 405,
            ServerError::BadRequest(_) => 400,
            ServerError::InvalidInput(_) => 422,
            ServerError::DbError(_) | ServerError::InternalError => 500,
        }
    }
}
