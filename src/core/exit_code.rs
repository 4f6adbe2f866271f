//! Process exit codes. The numeric values are a stable contract for scripts.

use crate::error::{ApiError, AppError};
use std::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    Ok = 0,
    General = 1,
    Config = 2,
    Api = 3,
    Network = 4,
}

impl ExitCode {
    pub fn code(self) -> i32 {
        self as i32
    }
}

/// Map an error to its exit code. The first matching rule wins:
/// missing configuration or flags, then a server rejection carried as a typed value,
/// then message text for network and API failures.
pub fn classify(error: Option<&(dyn Error + 'static)>) -> ExitCode {
    let Some(error) = error else {
        return ExitCode::Ok;
    };

    let message = error.to_string();

    if message.contains("API token is required") || message.contains("is required") {
        return ExitCode::Config;
    }
    if is_http_error(error) {
        return ExitCode::Api;
    }
    if message.contains("network error") {
        return ExitCode::Network;
    }
    if message.contains("API error") {
        return ExitCode::Api;
    }
    ExitCode::General
}

fn is_http_error(error: &(dyn Error + 'static)) -> bool {
    let mut current = Some(error);
    while let Some(err) = current {
        if let Some(ApiError::Http { .. }) = err.downcast_ref::<ApiError>() {
            return true;
        }
        if let Some(AppError::Api(ApiError::Http { .. })) = err.downcast_ref::<AppError>() {
            return true;
        }
        current = err.source();
    }
    false
}
