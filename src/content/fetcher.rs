//! CMS client
//!
//! Every public method performs its requests, normalizes the response and
//! degrades to an empty list or a placeholder intro on failure. Errors are
//! logged, never returned: callers read an empty result as "no content".

use serde_json::Value;
use thiserror::Error;

use super::normalize::{normalize_collection, normalize_intro, normalize_slugs};
use super::{ContentItem, ContentType};
use crate::config::SiteConfig;

const USER_AGENT: &str = concat!("folio-rs/", env!("CARGO_PKG_VERSION"));

/// Why a CMS request failed
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection, DNS or timeout failure
    #[error("Network error: {0}")]
    Network(String),

    /// The CMS answered with a non-success status
    #[error("API error {0}: {1}")]
    Status(u16, String),

    /// The response body was not valid JSON
    #[error("Decode error: {0}")]
    Decode(String),
}

/// One content type's intro plus its articles, in CMS order
#[derive(Debug, Clone)]
pub struct Section {
    pub content_type: ContentType,
    pub intro: ContentItem,
    pub items: Vec<ContentItem>,
}

impl Section {
    pub fn new(content_type: ContentType, intro: ContentItem, items: Vec<ContentItem>) -> Self {
        Self {
            content_type,
            intro,
            items,
        }
    }

    /// Distinct categories in first-seen order
    pub fn categories(&self) -> Vec<String> {
        let mut categories: Vec<String> = Vec::new();
        for category in self.items.iter().filter_map(ContentItem::category) {
            if !categories.iter().any(|c| c == category) {
                categories.push(category.to_string());
            }
        }
        categories
    }
}

/// Article lists for every section, as used by the home page
#[derive(Debug, Clone, Default)]
pub struct HomeContent {
    pub writing: Vec<ContentItem>,
    pub photography: Vec<ContentItem>,
    pub design: Vec<ContentItem>,
    pub about: Vec<ContentItem>,
}

impl HomeContent {
    /// Reuse already fetched sections instead of fetching again
    pub fn from_sections(sections: &[Section]) -> Self {
        let items = |ct: ContentType| {
            sections
                .iter()
                .find(|s| s.content_type == ct)
                .map(|s| s.items.clone())
                .unwrap_or_default()
        };
        HomeContent {
            writing: items(ContentType::Writing),
            photography: items(ContentType::Photography),
            design: items(ContentType::Design),
            about: items(ContentType::About),
        }
    }
}

/// HTTP client for the headless CMS
#[derive(Debug, Clone)]
pub struct ContentFetcher {
    http_client: reqwest::Client,
    api_url: String,
    page_size: usize,
}

impl ContentFetcher {
    /// Create a client for the CMS configured in `config`
    pub fn new(config: &SiteConfig) -> anyhow::Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build()?;

        Ok(Self {
            http_client,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            page_size: config.page_size.max(1),
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// All articles of a content type
    pub async fn fetch(&self, content_type: ContentType) -> Vec<ContentItem> {
        let query = [
            ("populate", "*".to_string()),
            ("pagination[pageSize]", self.page_size.to_string()),
        ];
        match self
            .get_json(content_type.collection_endpoint(), &query)
            .await
        {
            Ok(json) => {
                let items = normalize_collection(content_type, &json, &self.api_url);
                tracing::debug!("Fetched {} {} items", items.len(), content_type);
                items
            }
            Err(e) => {
                tracing::error!("Error fetching {} articles: {}", content_type, e);
                Vec::new()
            }
        }
    }

    /// The intro of a content type, or a placeholder when unavailable
    pub async fn fetch_intro(&self, content_type: ContentType) -> ContentItem {
        let query = [("populate", "*".to_string())];
        match self.get_json(content_type.intro_endpoint(), &query).await {
            Ok(json) => normalize_intro(content_type, &json, &self.api_url),
            Err(e) => {
                tracing::error!("Error fetching {} intro: {}", content_type, e);
                ContentItem::placeholder_intro(content_type)
            }
        }
    }

    /// Only the slugs of a content type
    pub async fn fetch_slugs(&self, content_type: ContentType) -> Vec<String> {
        let query = [
            ("fields[0]", "slug".to_string()),
            ("pagination[pageSize]", self.page_size.to_string()),
        ];
        match self
            .get_json(content_type.collection_endpoint(), &query)
            .await
        {
            Ok(json) => normalize_slugs(&json),
            Err(e) => {
                tracing::error!("Error fetching {} slugs: {}", content_type, e);
                Vec::new()
            }
        }
    }

    /// Intro and articles of one content type, fetched concurrently
    pub async fn fetch_section(&self, content_type: ContentType) -> Section {
        let (items, intro) = tokio::join!(self.fetch(content_type), self.fetch_intro(content_type));
        Section::new(content_type, intro, items)
    }

    /// Article lists of all four content types, fetched concurrently
    pub async fn fetch_home(&self) -> HomeContent {
        let (writing, photography, design, about) = tokio::join!(
            self.fetch(ContentType::Writing),
            self.fetch(ContentType::Photography),
            self.fetch(ContentType::Design),
            self.fetch(ContentType::About),
        );
        HomeContent {
            writing,
            photography,
            design,
            about,
        }
    }

    async fn get_json(&self, endpoint: &str, query: &[(&str, String)]) -> Result<Value, FetchError> {
        let url = format!("{}/api/{}", self.api_url, endpoint);
        tracing::debug!(url = %url, "Querying CMS");

        let response = self
            .http_client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(FetchError::Status(status.as_u16(), error_text));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))
    }
}
