use std::collections::HashMap;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Cli(#[from] CliError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Display(#[from] DisplayError),
}

#[derive(Error, Debug)]
pub enum CliError {
    #[error("{flag} is required")]
    MissingFlag { flag: String },
    #[error("{message}")]
    Usage { message: String },
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("network error: {message}")]
    Network { endpoint: String, message: String },
    #[error("{}", describe_http_error(.status, .message))]
    Http {
        status: u16,
        endpoint: String,
        message: String,
        errors: Vec<HashMap<String, String>>,
    },
    #[error("decoding response: {message}")]
    Decode { endpoint: String, message: String },
    #[error("reading response: {message}")]
    Body { endpoint: String, message: String },
    #[error("invalid URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },
    #[error("pagination stopped after {max_pages} pages: server kept returning a next link for {endpoint}")]
    PageLimitExceeded { endpoint: String, max_pages: usize },
}

fn describe_http_error(status: &u16, message: &str) -> String {
    if message.is_empty() {
        format!("API error ({})", status)
    } else {
        format!("API error ({}): {}", status, message)
    }
}

impl ApiError {
    /// HTTP status of a server rejection, `None` for every other kind.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(
        "API token is required. Set via --api-token, BUGSNAG_API_TOKEN env var, or config file"
    )]
    MissingApiToken,
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("File I/O error at {path}: {source}")]
    FileIo {
        path: String,
        source: std::io::Error,
    },
    #[error("Configuration parse error in {path}: {message}")]
    ConfigParse { path: String, message: String },
    #[error("Configuration serialize error: {message}")]
    ConfigSerialize { message: String },
    #[error("Configuration directory not found")]
    ConfigDirNotFound,
}

#[derive(Error, Debug)]
pub enum DisplayError {
    #[error("JSON output failed: {0}")]
    Json(String),
}

impl AppError {
    pub fn troubleshooting_hint(&self) -> Option<String> {
        match self {
            AppError::Config(ConfigError::MissingApiToken) => Some(
                "'bugsnag-cli configure --api-token <token>' to save a token".to_string(),
            ),
            AppError::Api(ApiError::Http { status: 401, .. }) => {
                Some("Check that your API token is valid and not revoked".to_string())
            }
            AppError::Api(ApiError::Http { status: 403, .. }) => {
                Some("Your token does not have access to this resource".to_string())
            }
            AppError::Api(ApiError::Network { .. }) => {
                Some("Check your internet connection or the --base-url value".to_string())
            }
            AppError::Api(ApiError::PageLimitExceeded { .. }) => {
                Some("Raise --max-pages or drop --all-pages to fetch a single page".to_string())
            }
            AppError::Storage(StorageError::ConfigParse { .. }) => {
                Some("Fix or re-create the file with 'bugsnag-cli configure'".to_string())
            }
            _ => None,
        }
    }
}
