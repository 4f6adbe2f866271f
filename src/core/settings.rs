//! Effective settings for one invocation.
//!
//! Precedence per key: command-line flag, then `BUGSNAG_*` environment variable (both arrive
//! through clap), then the config file, then the built-in default.

use crate::api::client::{ClientConfig, DEFAULT_BASE_URL};
use crate::cli::main_types::GlobalArgs;
use crate::display::OutputFormat;
use crate::error::ConfigError;
use crate::storage::Config;
use std::path::PathBuf;

pub const DEFAULT_PER_PAGE: u32 = 30;
pub const MAX_PER_PAGE: u32 = 100;

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub api_token: Option<String>,
    pub format: OutputFormat,
    /// `json` gives JSON error objects; any other configured value gives `Error:` lines
    pub error_format: OutputFormat,
    pub base_url: String,
    pub per_page: u32,
    pub all_pages: bool,
    pub max_pages: Option<usize>,
    pub verbose: bool,
    pub config_path: Option<PathBuf>,
}

impl Settings {
    pub fn resolve(args: &GlobalArgs, config: &Config) -> Self {
        let api_token = first_non_empty(args.api_token.as_deref(), config.api_token.as_deref());

        let format_name = first_non_empty(args.format.as_deref(), config.format.as_deref());
        let format = format_name
            .as_deref()
            .map(OutputFormat::from_str_lossy)
            .unwrap_or_default();
        let error_format = format_name
            .as_deref()
            .map(OutputFormat::error_format_from_str)
            .unwrap_or_default();

        let base_url = first_non_empty(args.base_url.as_deref(), config.base_url.as_deref())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let per_page = args
            .per_page
            .or(config.per_page)
            .filter(|n| (1..=MAX_PER_PAGE).contains(n))
            .unwrap_or(DEFAULT_PER_PAGE);

        Self {
            api_token,
            format,
            error_format,
            base_url,
            per_page,
            all_pages: args.all_pages,
            max_pages: args.max_pages.filter(|&n| n > 0),
            verbose: args.verbose,
            config_path: args.config.clone(),
        }
    }

    pub fn require_token(&self) -> Result<&str, ConfigError> {
        self.api_token
            .as_deref()
            .ok_or(ConfigError::MissingApiToken)
    }

    pub fn client_config(&self) -> Result<ClientConfig, ConfigError> {
        let token = self.require_token()?;
        Ok(ClientConfig::new(self.base_url.as_str(), token)
            .with_per_page(self.per_page)
            .with_max_pages(self.max_pages))
    }
}

fn first_non_empty(primary: Option<&str>, fallback: Option<&str>) -> Option<String> {
    primary
        .filter(|v| !v.is_empty())
        .or(fallback.filter(|v| !v.is_empty()))
        .map(str::to_string)
}
