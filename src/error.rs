use thiserror::Error;

pub type Result<T> = std::result::Result<T, FrodoError>;

#[derive(Debug, Error)]
pub enum FrodoError {
    #[error("Next was called without a request as its first argument")]
    MissingRequest,

    #[error("Attribute `{key}` could not be decoded: {source}")]
    AttributeDecode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Attribute `{key}` could not be encoded: {source}")]
    AttributeEncode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to read request body: {0}")]
    Body(String),

    #[error("Request body is too large: {0}")]
    PayloadTooLarge(String),

    #[error("Request body is not valid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),
}

impl axum::response::IntoResponse for FrodoError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            FrodoError::Body(_) | FrodoError::InvalidJson(_) => axum::http::StatusCode::BAD_REQUEST,
            FrodoError::PayloadTooLarge(_) => axum::http::StatusCode::PAYLOAD_TOO_LARGE,
            FrodoError::MissingRequest
            | FrodoError::AttributeDecode { .. }
            | FrodoError::AttributeEncode { .. } => axum::http::StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, self.to_string()).into_response()
    }
}
