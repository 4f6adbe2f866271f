use crate::error::{ApiError, DisplayError};

/// Helper functions for standardizing error conversions across the codebase.
/// Convert a reqwest send failure (DNS, refused connection, timeout) to ApiError
pub fn convert_request_error(error: reqwest::Error, endpoint: &str) -> ApiError {
    ApiError::Network {
        endpoint: endpoint.to_string(),
        message: error.to_string(),
    }
}

/// Convert a failure while reading the response body to ApiError
pub fn convert_body_error(error: reqwest::Error, endpoint: &str) -> ApiError {
    ApiError::Body {
        endpoint: endpoint.to_string(),
        message: error.to_string(),
    }
}

/// Convert JSON deserialization errors to ApiError with endpoint context
pub fn convert_json_error(error: serde_json::Error, endpoint: &str) -> ApiError {
    ApiError::Decode {
        endpoint: endpoint.to_string(),
        message: error.to_string(),
    }
}

/// Convert URL parse errors to ApiError before any request is sent
pub fn convert_url_error(error: impl std::fmt::Display, url: &str) -> ApiError {
    ApiError::InvalidUrl {
        url: url.to_string(),
        message: error.to_string(),
    }
}

/// Convert serde_json serialization errors raised while printing
pub fn convert_output_error(error: serde_json::Error) -> DisplayError {
    DisplayError::Json(error.to_string())
}
