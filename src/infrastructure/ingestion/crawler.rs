use std::collections::BTreeSet;
use std::time::Duration;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use reqwest::Client;
use scraper::{Html, Selector};
use url::Url;

use crate::domain::{ports::PageSource, DocumentPage, DomainError};

use super::extract::extract_page;

static TOC_LINKS: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a.reference.internal").expect("static selector"));

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Fetches pages from a documentation site rooted at a base URL. Page
/// discovery reads the site's table of contents (`contents.html`).
pub struct HttpPageSource {
    client: Client,
    base: Url,
}

impl HttpPageSource {
    pub fn new(base_url: &str) -> Result<Self, DomainError> {
        let base = Url::parse(base_url)
            .map_err(|e| DomainError::validation(format!("invalid base url `{base_url}`: {e}")))?;
        let client = Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .map_err(|e| DomainError::internal(e.to_string()))?;

        Ok(Self { client, base })
    }

    async fn get(&self, url: &str) -> Result<String, DomainError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| DomainError::connectivity(e.to_string()))?;

        if !response.status().is_success() {
            return Err(DomainError::connectivity(format!(
                "GET {url} returned {}",
                response.status()
            )));
        }

        response
            .text()
            .await
            .map_err(|e| DomainError::connectivity(e.to_string()))
    }
}

/// Extracts internal reference links from a table-of-contents page:
/// absolutized against `base`, fragment stripped, deduplicated, sorted.
pub fn parse_toc_links(html: &str, base: &Url) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut links = BTreeSet::new();

    for anchor in document.select(&TOC_LINKS) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        let Ok(mut absolute) = base.join(href) else {
            continue;
        };
        absolute.set_fragment(None);
        links.insert(absolute.to_string());
    }

    links.into_iter().collect()
}

#[async_trait]
impl PageSource for HttpPageSource {
    async fn list_pages(&self, limit: Option<usize>) -> Result<Vec<String>, DomainError> {
        let toc_url = self
            .base
            .join("contents.html")
            .map_err(|e| DomainError::internal(e.to_string()))?;

        let html = self.get(toc_url.as_str()).await?;
        let mut pages = parse_toc_links(&html, &self.base);
        if let Some(limit) = limit {
            pages.truncate(limit);
        }
        Ok(pages)
    }

    async fn fetch(&self, url: &str) -> Result<DocumentPage, DomainError> {
        let html = self.get(url).await?;
        Ok(extract_page(&html))
    }
}
