//! Cursor pagination over the `Link` response header.
//!
//! List endpoints return a bare JSON array. When more results exist the response carries
//! `Link: <https://...>; rel="next"`, and that URL is requested verbatim for the next page.

use super::client::{BugsnagClient, QueryParams};
use crate::error::ApiError;
use reqwest::header::LINK;
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::debug;

/// One page of a paginated listing.
#[derive(Debug, Clone)]
pub struct PageResult<T> {
    pub items: Vec<T>,
    pub next_url: Option<String>,
}

impl<T> PageResult<T> {
    pub fn has_more(&self) -> bool {
        self.next_url.as_deref().is_some_and(|url| !url.is_empty())
    }
}

/// Extract the `rel="next"` target from a `Link` header value.
///
/// Returns the URL of the first entry whose `rel` is `next`; entries such as `last` or
/// `prev` are skipped. An empty or malformed header yields `None`.
pub fn parse_link_header(header: &str) -> Option<String> {
    let mut rest = header;

    while let Some(start) = rest.find('<') {
        let after_start = &rest[start + 1..];
        let end = after_start.find('>')?;
        let url = after_start[..end].trim();
        let attributes = &after_start[end + 1..];

        // Attributes run until the next entry opens
        let attributes_end = attributes.find('<').unwrap_or(attributes.len());
        let (entry_attributes, remaining) = attributes.split_at(attributes_end);

        if !url.is_empty() && rel_is_next(entry_attributes) {
            return Some(url.to_string());
        }
        rest = remaining;
    }

    None
}

fn rel_is_next(attributes: &str) -> bool {
    attributes
        .split(';')
        .map(|segment| segment.trim().trim_end_matches(',').trim())
        .filter_map(|segment| segment.split_once('='))
        .filter(|(key, _)| key.trim().eq_ignore_ascii_case("rel"))
        .any(|(_, value)| {
            value
                .trim()
                .trim_matches('"')
                .split_whitespace()
                .any(|rel| rel.eq_ignore_ascii_case("next"))
        })
}

impl BugsnagClient {
    async fn fetch_page<T>(
        &self,
        request: RequestBuilder,
        endpoint: &str,
    ) -> Result<PageResult<T>, ApiError>
    where
        T: DeserializeOwned,
    {
        let response = self.send(request, endpoint).await?;

        let next_url = response
            .headers()
            .get(LINK)
            .and_then(|value| parse_link_header(&String::from_utf8_lossy(value.as_bytes())));

        let items: Vec<T> = Self::decode(response, endpoint).await?;
        debug!(
            endpoint,
            items = items.len(),
            has_next = next_url.is_some(),
            "fetched page"
        );

        Ok(PageResult { items, next_url })
    }

    /// Fetch the first page of `path`. Returns the items and whether more pages exist.
    pub async fn fetch_single_page<T>(
        &self,
        path: &str,
        params: &QueryParams,
    ) -> Result<(Vec<T>, bool), ApiError>
    where
        T: DeserializeOwned,
    {
        let request = self.build_request(Method::GET, path, params)?;
        let page = self.fetch_page::<T>(request, path).await?;
        let has_more = page.has_more();
        Ok((page.items, has_more))
    }

    /// Follow next links from the first page of `path` until the server stops sending one.
    ///
    /// Pages are requested one after another. A failure on any page discards everything
    /// collected so far and returns only the error.
    pub async fn collect_all_pages<T>(
        &self,
        path: &str,
        params: &QueryParams,
    ) -> Result<Vec<T>, ApiError>
    where
        T: DeserializeOwned,
    {
        let mut all = Vec::new();
        let mut request = self.build_request(Method::GET, path, params)?;
        let mut endpoint = path.to_string();
        let mut pages = 0usize;

        loop {
            let page = self.fetch_page::<T>(request, &endpoint).await?;
            pages += 1;
            all.extend(page.items);

            let next_url = match page.next_url {
                Some(url) if !url.is_empty() => url,
                _ => break,
            };

            if let Some(max_pages) = self.config().max_pages {
                if pages >= max_pages {
                    return Err(ApiError::PageLimitExceeded {
                        endpoint: path.to_string(),
                        max_pages,
                    });
                }
            }

            request = self.build_cursor_request(&next_url)?;
            endpoint = next_url;
        }

        debug!(path, pages, items = all.len(), "collected all pages");
        Ok(all)
    }
}
