//! HTTP gateway to the OpenFoodFacts API.
//!
//! Wraps `reqwest` with a fixed timeout, typed errors, and response
//! normalization. Requests are never retried: the upstream is a public,
//! rate-limited API, so retry policy belongs to callers.

use std::time::Duration;

use reqwest::{Client, Url};
use serde_json::Value;

use offcat_core::{paginate, AppConfig, PageEnvelope, Product, DEFAULT_UPSTREAM_BASE_URL};

use crate::error::UpstreamError;
use crate::normalize::{extract_items, normalize_page};

/// Outcome of the dedicated category-listing endpoint.
///
/// Anything other than a usable, non-empty product list — transport failure,
/// timeout, empty body — collapses into `Empty`, which tells the caller to
/// take the search-based fallback path. This keeps the fallback an explicit
/// branch rather than exception-driven control flow.
#[derive(Debug)]
pub enum CategoryListing {
    /// The complete listing for the category, to be paginated locally.
    Full(Vec<Product>),
    Empty,
}

/// Client for the OpenFoodFacts REST API.
///
/// Cheap to clone; use [`OffClient::with_base_url`] to point at a mock
/// server in tests.
#[derive(Debug, Clone)]
pub struct OffClient {
    client: Client,
    base_url: Url,
}

impl OffClient {
    /// Creates a client pointed at the production OpenFoodFacts API.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError::Unavailable`] if the underlying
    /// `reqwest::Client` cannot be constructed.
    pub fn new(user_agent: &str, timeout_secs: u64) -> Result<Self, UpstreamError> {
        Self::with_base_url(user_agent, timeout_secs, DEFAULT_UPSTREAM_BASE_URL)
    }

    /// Creates a client from the application configuration.
    ///
    /// # Errors
    ///
    /// Same as [`OffClient::with_base_url`].
    pub fn from_config(config: &AppConfig) -> Result<Self, UpstreamError> {
        Self::with_base_url(
            &config.user_agent,
            config.request_timeout_secs,
            &config.upstream_base_url,
        )
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError::Unavailable`] if the underlying
    /// `reqwest::Client` cannot be constructed, or
    /// [`UpstreamError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        user_agent: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, UpstreamError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Normalise: ensure the base URL ends with exactly one slash so that
        // Url::join appends path segments instead of replacing the last one.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|e| UpstreamError::InvalidBaseUrl(format!("{base_url}: {e}")))?;

        Ok(Self { client, base_url })
    }

    /// Full-text name search, server-side paginated.
    ///
    /// # Errors
    ///
    /// - [`UpstreamError::Timeout`] when the 30s ceiling is hit.
    /// - [`UpstreamError::Unavailable`] on network failure or non-2xx status.
    /// - [`UpstreamError::Deserialize`] if the body is not JSON.
    pub async fn search_products(
        &self,
        query: &str,
        page: u32,
        page_size: u32,
    ) -> Result<PageEnvelope, UpstreamError> {
        let url = self.search_url(&[
            ("search_terms", query),
            ("page_size", &page_size.to_string()),
            ("page", &page.to_string()),
            ("json", "true"),
        ])?;
        let raw = self.request_json(&url).await?;
        Ok(normalize_page(&raw, page, page_size))
    }

    /// The popularity-sorted listing shown when no filter is active.
    ///
    /// # Errors
    ///
    /// Same as [`OffClient::search_products`].
    pub async fn popular_products(
        &self,
        page: u32,
        page_size: u32,
    ) -> Result<PageEnvelope, UpstreamError> {
        let url = self.search_url(&[
            ("action", "process"),
            ("sort_by", "popularity"),
            ("page_size", &page_size.to_string()),
            ("page", &page.to_string()),
            ("json", "true"),
        ])?;
        let raw = self.request_json(&url).await?;
        Ok(normalize_page(&raw, page, page_size))
    }

    /// Single-item lookup by barcode.
    ///
    /// A hit requires both `"status": 1` and a product payload; any other
    /// combination is `Ok(None)`, never an error.
    ///
    /// # Errors
    ///
    /// Transport and HTTP failures as in [`OffClient::search_products`];
    /// [`UpstreamError::Deserialize`] if a present product payload does not
    /// match the expected shape.
    pub async fn product_by_barcode(&self, code: &str) -> Result<Option<Product>, UpstreamError> {
        let url = self.url_with_segments(&["api", "v0", "product", &format!("{code}.json")])?;
        let raw = self.request_json(&url).await?;

        let found = raw
            .get("status")
            .and_then(Value::as_u64)
            .is_some_and(|s| s == 1);
        let Some(payload) = raw.get("product").filter(|p| !p.is_null()) else {
            return Ok(None);
        };
        if !found {
            return Ok(None);
        }

        let product =
            serde_json::from_value(payload.clone()).map_err(|e| UpstreamError::Deserialize {
                context: format!("product(code={code})"),
                source: e,
            })?;
        Ok(Some(product))
    }

    /// Category listing: dedicated endpoint first, tag-filtered search as the
    /// silent fallback.
    ///
    /// When the dedicated endpoint yields the full listing, pagination is
    /// applied locally; otherwise the search endpoint paginates server-side.
    /// Callers only ever see a well-formed envelope, never which path served
    /// it.
    ///
    /// # Errors
    ///
    /// Only the fallback path can fail (phase one swallows its own errors);
    /// failures as in [`OffClient::search_products`].
    pub async fn products_by_category(
        &self,
        category: &str,
        page: u32,
        page_size: u32,
    ) -> Result<PageEnvelope, UpstreamError> {
        match self.fetch_category_listing(&offcat_core::slug(category)).await {
            CategoryListing::Full(items) => Ok(paginate(&items, page, page_size)),
            CategoryListing::Empty => {
                self.search_by_category_tag(category, page, page_size).await
            }
        }
    }

    /// Phase one of the category lookup: `category/{slug}.json`.
    ///
    /// Errors and empty results both collapse to [`CategoryListing::Empty`];
    /// the failure is logged here and never propagated.
    pub async fn fetch_category_listing(&self, slug: &str) -> CategoryListing {
        if slug.is_empty() {
            return CategoryListing::Empty;
        }
        let url = match self.url_with_segments(&["category", &format!("{slug}.json")]) {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!(error = %e, slug, "could not build category listing URL");
                return CategoryListing::Empty;
            }
        };

        match self.request_json(&url).await {
            Ok(raw) => {
                let items = extract_items(&raw);
                if items.is_empty() {
                    CategoryListing::Empty
                } else {
                    CategoryListing::Full(items)
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, slug, "category listing unavailable, using tag search");
                CategoryListing::Empty
            }
        }
    }

    /// Phase two: the generic search endpoint filtered by category tag.
    ///
    /// Sends the raw category label; the query serializer percent-encodes it.
    async fn search_by_category_tag(
        &self,
        category: &str,
        page: u32,
        page_size: u32,
    ) -> Result<PageEnvelope, UpstreamError> {
        let url = self.search_url(&[
            ("tagtype_0", "categories"),
            ("tag_contains_0", "contains"),
            ("tag_0", category),
            ("page_size", &page_size.to_string()),
            ("page", &page.to_string()),
            ("json", "true"),
        ])?;
        let raw = self.request_json(&url).await?;
        Ok(normalize_page(&raw, page, page_size))
    }

    /// The category enumeration: display names of the most populated
    /// categories, truncated to `limit`.
    ///
    /// # Errors
    ///
    /// Same as [`OffClient::search_products`].
    pub async fn top_categories(&self, limit: usize) -> Result<Vec<String>, UpstreamError> {
        let url = self.url_with_segments(&["categories.json"])?;
        let raw = self.request_json(&url).await?;

        let names = raw
            .get("tags")
            .and_then(Value::as_array)
            .map(|tags| {
                tags.iter()
                    .filter_map(|tag| {
                        tag.get("name")
                            .and_then(Value::as_str)
                            .or_else(|| tag.get("id").and_then(Value::as_str))
                            .map(ToOwned::to_owned)
                    })
                    .take(limit)
                    .collect()
            })
            .unwrap_or_default();
        Ok(names)
    }

    /// Builds a `cgi/search.pl` URL with the given query parameters.
    fn search_url(&self, params: &[(&str, &str)]) -> Result<Url, UpstreamError> {
        let mut url = self.url_with_segments(&["cgi", "search.pl"])?;
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }

    /// Appends percent-encoded path segments to the base URL.
    fn url_with_segments(&self, segments: &[&str]) -> Result<Url, UpstreamError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| UpstreamError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Sends a GET request, asserts a 2xx status, and parses the body as JSON.
    async fn request_json(&self, url: &Url) -> Result<Value, UpstreamError> {
        let response = self.client.get(url.clone()).send().await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| UpstreamError::Deserialize {
            context: url.to_string(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(base_url: &str) -> OffClient {
        OffClient::with_base_url("offcat-test/0.1", 30, base_url)
            .expect("client construction should not fail")
    }

    #[test]
    fn search_url_encodes_query_parameters() {
        let client = test_client("https://world.openfoodfacts.org");
        let url = client
            .search_url(&[("search_terms", "dark chocolate & nuts"), ("json", "true")])
            .expect("url");
        let s = url.as_str();
        assert!(s.starts_with("https://world.openfoodfacts.org/cgi/search.pl?"));
        assert!(
            s.contains("dark+chocolate+%26+nuts") || s.contains("dark%20chocolate%20%26%20nuts"),
            "query should be percent-encoded: {s}"
        );
    }

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let with = test_client("http://localhost:9999/");
        let without = test_client("http://localhost:9999");
        let a = with.url_with_segments(&["categories.json"]).expect("url");
        let b = without.url_with_segments(&["categories.json"]).expect("url");
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "http://localhost:9999/categories.json");
    }

    #[test]
    fn barcode_url_uses_v0_product_path() {
        let client = test_client("https://world.openfoodfacts.org");
        let url = client
            .url_with_segments(&["api", "v0", "product", "3017620422003.json"])
            .expect("url");
        assert_eq!(
            url.as_str(),
            "https://world.openfoodfacts.org/api/v0/product/3017620422003.json"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let result = OffClient::with_base_url("ua", 30, "not a url");
        assert!(matches!(result, Err(UpstreamError::InvalidBaseUrl(_))));
    }
}
