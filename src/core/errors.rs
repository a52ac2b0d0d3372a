use http::StatusCode;
use spin_sdk::http::Response;
use thiserror::Error;

/// Failure raised while normalizing request parameters.
///
/// Construction of a parser either fully succeeds or fails with this error;
/// a failed parser is never handed out.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParameterError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

impl ParameterError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        ParameterError::InvalidParameter(msg.into())
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad Request: {0}")]
    BadRequest(String),
    #[error("Internal Error: {0}")]
    InternalError(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg) | ApiError::InternalError(msg) => msg,
        }
    }
}

impl From<ParameterError> for ApiError {
    fn from(err: ParameterError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

// Implement conversion from anyhow::Error to ApiError for internal errors
impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::InternalError(err.to_string())
    }
}

impl From<ApiError> for Response {
    fn from(err: ApiError) -> Self {
        let body = serde_json::json!({ "error": err.message() });
        Response::builder()
            .status(err.status().as_u16())
            .header("Content-Type", "application/json")
            .body(body.to_string().into_bytes())
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_parameter_message() {
        let err = ParameterError::invalid("malformed json payload");
        assert_eq!(err.to_string(), "Invalid parameter: malformed json payload");
    }

    #[test]
    fn parameter_error_maps_to_bad_request() {
        let err: ApiError = ParameterError::invalid("bad").into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Bad Request: Invalid parameter: bad");
    }

    #[test]
    fn api_error_renders_json_body() {
        let resp: Response = ApiError::InternalError("boom".into()).into();
        assert_eq!(*resp.status(), 500);
        let body: serde_json::Value = serde_json::from_slice(resp.body()).unwrap();
        assert_eq!(body["error"], "boom");
    }
}
