//! Adapter for the Altraverse shop
//!
//! Listing pages live under `/manga/?p={page}`; detail pages carry the ISBN
//! in an `itemprop` span, the release date in the "Veröffentlichung" row of
//! the attribute list, and the product kind in the "Produkt" row.

use crate::catalog::{clean_franchise_title, format_release_date, is_valid_isbn, ProductRecord};
use crate::crawler::{CrawlSession, ExtractError, FetchClient, SiteAdapter};
use crate::sites::{absolutize, first_attr, first_text, product_kind_from_base_info};
use async_trait::async_trait;
use scraper::{Html, Selector};
use std::sync::Arc;

pub const BASE_URL: &str = "https://altraverse.de";

pub struct Altraverse {
    fetch: Arc<FetchClient>,
    base_url: String,
}

impl Altraverse {
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
        format!("{}/manga/?p={}", self.base_url, page)
    }
}

#[async_trait]
impl SiteAdapter for Altraverse {
    fn name(&self) -> &'static str {
        "altraverse"
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

    let isbn = first_text(&doc, r#"span.entry--content[itemprop="isbn"]"#)
        .ok_or(ExtractError::MissingField("isbn"))?;
    if !is_valid_isbn(&isbn) {
        return Err(ExtractError::InvalidIsbn(isbn));
    }
    if !session.claim_isbn(&isbn) {
        return Err(ExtractError::DuplicateIsbn(isbn));
    }

    let title =
        first_text(&doc, "h1.product--title").ok_or(ExtractError::MissingField("title"))?;
    let description = first_text(&doc, "div.product--description");

    // The shop serves responsive images; the first srcset entry is the
    // smallest usable variant.
    let image_url = first_attr(&doc, "a.product--image img", "srcset")
        .and_then(|srcset| srcset.split(',').next().map(|s| s.trim().to_string()))
        .filter(|s| !s.is_empty());

    let release_date = release_date_from_attributes(&doc);
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

/// Finds the "Veröffentlichung" attribute row and canonicalizes its value
fn release_date_from_attributes(doc: &Html) -> Option<String> {
    let entry_sel = Selector::parse("li.base-info--entry.entry-attribute").ok()?;
    let label_sel = Selector::parse("strong.entry--label").ok()?;
    let value_sel = Selector::parse("span.entry--content").ok()?;

    for entry in doc.select(&entry_sel) {
        let Some(label) = entry.select(&label_sel).next() else {
            continue;
        };
        if !label.text().collect::<String>().contains("Veröffentlichung") {
            continue;
        }
        let Some(value) = entry.select(&value_sel).next() else {
            continue;
        };
        let text = value.text().collect::<String>();
        return format_release_date(&text, "%d.%m.%Y");
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ProductKind;

    const DETAIL_PAGE: &str = r##"
        <html><body>
          <h1 class="product--title">Gamers! – Light Novel, Band 01</h1>
          <div class="product--description">Keita Amano ist ein Gamer.</div>
          <a class="product--image" href="#">
            <img srcset="https://altraverse.de/media/gamers-01_400x400.jpg, https://altraverse.de/media/gamers-01_800x800.jpg 2x" />
          </a>
          <ul class="product--base-info">
            <li class="base-info--entry entry--Produkt">
              <strong class="entry--label">Produkt</strong>
              <span class="entry--content">Light Novel</span>
            </li>
            <li class="base-info--entry entry-attribute">
              <strong class="entry--label">Veröffentlichung</strong>
              <span class="entry--content">28.05.2021</span>
            </li>
          </ul>
          <span class="entry--content" itemprop="isbn">978-3-96358-096-3</span>
        </body></html>
    "##;

    #[test]
    fn test_parse_listing_qualifies_relative_links() {
        let body = r#"
            <div class="product--info">
              <a class="product--title" href="/manga/gamers/gamers-band-01">Gamers!</a>
            </div>
            <div class="product--info">
              <a class="product--title" href="https://altraverse.de/manga/overlord/band-03">Overlord</a>
            </div>
        "#;

        let links = parse_listing(body, BASE_URL);
        assert_eq!(
            links,
            vec![
                "https://altraverse.de/manga/gamers/gamers-band-01".to_string(),
                "https://altraverse.de/manga/overlord/band-03".to_string(),
            ]
        );
    }

    #[test]
    fn test_parse_listing_without_products() {
        let body = "<html><body><p>Keine Treffer</p></body></html>";
        assert!(parse_listing(body, BASE_URL).is_empty());
    }

    #[test]
    fn test_parse_detail_full_record() {
        let session = CrawlSession::new();
        let record =
            parse_detail(DETAIL_PAGE, "https://altraverse.de/manga/gamers-band-01", &session)
                .unwrap();

        assert_eq!(record.title, "Gamers! – Light Novel, Band 01");
        assert_eq!(record.franchise.as_deref(), Some("Gamers!"));
        assert_eq!(record.isbn, "978-3-96358-096-3");
        assert_eq!(record.description.as_deref(), Some("Keita Amano ist ein Gamer."));
        assert_eq!(
            record.image_url.as_deref(),
            Some("https://altraverse.de/media/gamers-01_400x400.jpg")
        );
        assert_eq!(record.release_date.as_deref(), Some("28.05.2021"));
        assert_eq!(record.kind, ProductKind::LightNovel);
    }

    #[test]
    fn test_parse_detail_rejects_invalid_isbn() {
        let session = CrawlSession::new();
        let body = DETAIL_PAGE.replace("978-3-96358-096-3", "9783963580963");

        let result = parse_detail(&body, "https://altraverse.de/x", &session);
        assert!(matches!(result, Err(ExtractError::InvalidIsbn(_))));
    }

    #[test]
    fn test_parse_detail_drops_duplicates() {
        let session = CrawlSession::new();

        assert!(parse_detail(DETAIL_PAGE, "https://altraverse.de/a", &session).is_ok());
        let second = parse_detail(DETAIL_PAGE, "https://altraverse.de/b", &session);
        assert!(matches!(second, Err(ExtractError::DuplicateIsbn(_))));
    }

    #[test]
    fn test_parse_detail_missing_isbn() {
        let session = CrawlSession::new();
        let body = "<html><body><h1 class=\"product--title\">Titel</h1></body></html>";

        let result = parse_detail(body, "https://altraverse.de/x", &session);
        assert!(matches!(result, Err(ExtractError::MissingField("isbn"))));
    }
}
