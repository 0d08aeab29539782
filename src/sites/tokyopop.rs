//! Adapter for the Tokyopop shop
//!
//! Listing pages live under `/buecher/?p={page}`. Detail pages expose most
//! fields through Open Graph meta tags; ISBN and release date come from
//! `itemprop` meta tags, the latter in ISO form.

use crate::catalog::{clean_franchise_title, format_release_date, is_valid_isbn, ProductRecord};
use crate::crawler::{CrawlSession, ExtractError, FetchClient, SiteAdapter};
use crate::sites::{absolutize, meta_itemprop, meta_property, product_kind_from_base_info};
use async_trait::async_trait;
use scraper::{Html, Selector};
use std::sync::Arc;

pub const BASE_URL: &str = "https://www.tokyopop.de";

pub struct Tokyopop {
    fetch: Arc<FetchClient>,
    base_url: String,
}

impl Tokyopop {
    pub fn new(fetch: Arc<FetchClient>) -> Self {
        Self::with_base(fetch, BASE_URL)
    }

    /// Creates an adapter against a different base URL (mirror or test server)
    pub fn with_base(fetch: Arc<FetchClient>, base_url: &str) -> Self {
        Self {
            fetch,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn listing_url(&self, page: u32) -> String {
        format!("{}/buecher/?p={}", self.base_url, page)
    }
}

#[async_trait]
impl SiteAdapter for Tokyopop {
    fn name(&self) -> &'static str {
        "tokyopop"
    }

    async fn listing_links(&self, page: u32) -> Vec<String> {
        let url = self.listing_url(page);
        match self.fetch.fetch(&url).await {
            Ok(body) => parse_listing(&body, &self.base_url),
            Err(error) => {
                tracing::warn!("Listing page {} unavailable: {}", url, error);
                Vec::new()
            }
        }
    }

    async fn extract_detail(
        &self,
        url: &str,
        session: &CrawlSession,
    ) -> Result<ProductRecord, ExtractError> {
        let body = self.fetch.fetch(url).await?;
        parse_detail(&body, url, session)
    }
}

fn parse_listing(body: &str, base_url: &str) -> Vec<String> {
    let doc = Html::parse_document(body);
    let mut links = Vec::new();

    if let Ok(sel) = Selector::parse("div.product--info a.product--title[href]") {
        for el in doc.select(&sel) {
            if let Some(href) = el.value().attr("href") {
                links.push(absolutize(base_url, href));
            }
        }
    }

    links
}

fn parse_detail(
    body: &str,
    url: &str,
    session: &CrawlSession,
) -> Result<ProductRecord, ExtractError> {
    let doc = Html::parse_document(body);

    let isbn = meta_itemprop(&doc, "isbn").ok_or(ExtractError::MissingField("isbn"))?;
    if !is_valid_isbn(&isbn) {
        return Err(ExtractError::InvalidIsbn(isbn));
    }
    if !session.claim_isbn(&isbn) {
        return Err(ExtractError::DuplicateIsbn(isbn));
    }

    let title = meta_property(&doc, "og:title").ok_or(ExtractError::MissingField("title"))?;
    let description = meta_property(&doc, "og:description");
    let image_url = meta_property(&doc, "og:image");

    let release_date =
        meta_itemprop(&doc, "releaseDate").and_then(|raw| format_release_date(&raw, "%Y-%m-%d"));
    let kind = product_kind_from_base_info(&doc);
    let franchise = clean_franchise_title(&title);

    Ok(ProductRecord {
        franchise_raw_title: title.clone(),
        franchise,
        title,
        isbn,
        description,
        image_url,
        release_date,
        kind,
        source_url: url.to_string(),
    })
}
