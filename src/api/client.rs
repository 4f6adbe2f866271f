use crate::error::ApiError;
use crate::utils::error_helpers::*;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde::Deserialize;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::{BTreeMap, HashMap};
use std::time::Duration;
use tracing::{debug, trace};

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_BASE_URL: &str = "https://api.bugsnag.com";
const USER_AGENT: &str = concat!("bugsnag-cli/", env!("CARGO_PKG_VERSION"));
const JSON_MIME: &str = "application/json";

/// Query parameters keyed by name; empty values are never sent.
pub type QueryParams = BTreeMap<String, String>;

/// Connection settings shared by every request of one invocation.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub api_token: String,
    /// Injected as `per_page` unless the caller already supplies one
    pub per_page: Option<u32>,
    pub timeout: Duration,
    /// Upper bound on pages followed by `collect_all_pages`; `None` follows every cursor
    pub max_pages: Option<usize>,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>, api_token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_token: api_token.into(),
            per_page: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_pages: None,
        }
    }

    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = (per_page > 0).then_some(per_page);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_pages(mut self, max_pages: Option<usize>) -> Self {
        self.max_pages = max_pages;
        self
    }
}

#[derive(Debug, Clone)]
pub struct BugsnagClient {
    client: Client,
    config: ClientConfig,
}

impl BugsnagClient {
    // Create client with the configured timeout and user agent
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| convert_request_error(e, "client_init"))?;

        Ok(BugsnagClient {
            client,
            config: ClientConfig {
                base_url: config.base_url.trim_end_matches('/').to_string(),
                ..config
            },
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn resolve_url(&self, path: &str) -> Result<Url, ApiError> {
        let raw = format!("{}{}", self.config.base_url, path);
        Url::parse(&raw).map_err(|e| convert_url_error(e, &raw))
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header(AUTHORIZATION, format!("token {}", self.config.api_token))
            .header(ACCEPT, JSON_MIME)
    }

    /// Build a request for `path` with query parameters and the default page size.
    pub fn build_request(
        &self,
        method: Method,
        path: &str,
        params: &QueryParams,
    ) -> Result<RequestBuilder, ApiError> {
        let mut url = self.resolve_url(path)?;
        let mut query = non_empty_params(params);

        if let Some(per_page) = self.config.per_page {
            if !query.contains_key("per_page") {
                trace!(per_page, "injecting default page size");
                query.insert("per_page".to_string(), per_page.to_string());
            }
        }

        if query.is_empty() {
            url.set_query(None);
        } else {
            let mut pairs = url.query_pairs_mut();
            pairs.clear();
            for (key, value) in &query {
                pairs.append_pair(key, value);
            }
        }

        debug!(%method, %url, "building request");
        Ok(self
            .authorize(self.client.request(method, url))
            .header(CONTENT_TYPE, JSON_MIME))
    }

    /// Build a request carrying a JSON body. No page size is injected.
    pub fn build_request_with_body<B>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<RequestBuilder, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let url = self.resolve_url(path)?;
        debug!(%method, %url, "building request with body");
        Ok(self
            .authorize(self.client.request(method, url))
            .header(CONTENT_TYPE, JSON_MIME)
            .json(body))
    }

    /// Build a GET against a server-issued cursor URL, sent as-is.
    pub fn build_cursor_request(&self, next_url: &str) -> Result<RequestBuilder, ApiError> {
        let url = Url::parse(next_url).map_err(|e| convert_url_error(e, next_url))?;
        debug!(%url, "following next link");
        Ok(self.authorize(self.client.get(url)))
    }

    /// Execute a request. Status >= 400 becomes `ApiError::Http`.
    pub async fn send(&self, request: RequestBuilder, endpoint: &str) -> Result<Response, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|e| convert_request_error(e, endpoint))?;

        let status = response.status().as_u16();
        debug!(endpoint, status, "received response");

        if status >= 400 {
            let body = response.text().await.unwrap_or_default();
            return Err(api_error_from_body(status, endpoint, &body));
        }

        Ok(response)
    }

    pub async fn decode<T>(response: Response, endpoint: &str) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let body = response
            .bytes()
            .await
            .map_err(|e| convert_body_error(e, endpoint))?;
        serde_json::from_slice(&body).map_err(|e| convert_json_error(e, endpoint))
    }

    /// GET `path` and decode the body as a single `T`.
    pub async fn get_json<T>(&self, path: &str, params: &QueryParams) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let request = self.build_request(Method::GET, path, params)?;
        let response = self.send(request, path).await?;
        Self::decode(response, path).await
    }

    /// POST a JSON body to `path` and decode the created object.
    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.build_request_with_body(Method::POST, path, body)?;
        let response = self.send(request, path).await?;
        Self::decode(response, path).await
    }
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    errors: Vec<HashMap<String, String>>,
}

/// Turn a failed response body into `ApiError::Http`.
///
/// A body of the form `{"errors": [{"message": ...}]}` yields the first message and keeps
/// the full list; any other body becomes the message verbatim.
pub fn api_error_from_body(status: u16, endpoint: &str, body: &str) -> ApiError {
    let (message, errors) = match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) if !envelope.errors.is_empty() => {
            let message = envelope.errors[0]
                .get("message")
                .cloned()
                .unwrap_or_default();
            (message, envelope.errors)
        }
        _ => (body.to_string(), Vec::new()),
    };

    ApiError::Http {
        status,
        endpoint: endpoint.to_string(),
        message,
        errors,
    }
}

pub(crate) fn non_empty_params(params: &QueryParams) -> QueryParams {
    params
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}
