//! Concrete site adapters
//!
//! One module per target shop, plus the markup helpers they share. Adapters
//! differ only in selectors and base URL; everything else (fetching, pacing,
//! dedup, pagination) lives behind the [`SiteAdapter`] contract.

pub mod altraverse;
pub mod tokyopop;

pub use altraverse::Altraverse;
pub use tokyopop::Tokyopop;

use crate::crawler::{FetchClient, SiteAdapter};
use crate::{ProductKind, ShinkanError};
use scraper::{Html, Selector};
use std::sync::Arc;
use url::Url;

/// Site names accepted in configuration
pub const KNOWN_SITES: &[&str] = &["altraverse", "tokyopop"];

/// Builds the adapter registered under `name`
///
/// # Arguments
///
/// * `name` - One of [`KNOWN_SITES`]
/// * `base_url` - Optional base-URL override (mirrors, local test servers)
/// * `fetch` - The fetch client this adapter will issue requests through
pub fn build_adapter(
    name: &str,
    base_url: Option<&str>,
    fetch: Arc<FetchClient>,
) -> Result<Arc<dyn SiteAdapter>, ShinkanError> {
    match name {
        "altraverse" => Ok(Arc::new(Altraverse::with_base(
            fetch,
            base_url.unwrap_or(altraverse::BASE_URL),
        ))),
        "tokyopop" => Ok(Arc::new(Tokyopop::with_base(
            fetch,
            base_url.unwrap_or(tokyopop::BASE_URL),
        ))),
        other => Err(ShinkanError::UnknownSite(other.to_string())),
    }
}

/// Text content of the first element matching `selector`, trimmed;
/// empty results count as absent
pub(crate) fn first_text(doc: &Html, selector: &str) -> Option<String> {
    let sel = Selector::parse(selector).ok()?;
    doc.select(&sel)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Attribute value of the first element matching `selector`
pub(crate) fn first_attr(doc: &Html, selector: &str, attr: &str) -> Option<String> {
    let sel = Selector::parse(selector).ok()?;
    doc.select(&sel)
        .next()
        .and_then(|el| el.value().attr(attr))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Content of a `<meta property="...">` tag (Open Graph style)
pub(crate) fn meta_property(doc: &Html, property: &str) -> Option<String> {
    first_attr(doc, &format!(r#"meta[property="{}"]"#, property), "content")
}

/// Content of a `<meta itemprop="...">` tag
pub(crate) fn meta_itemprop(doc: &Html, itemprop: &str) -> Option<String> {
    first_attr(doc, &format!(r#"meta[itemprop="{}"]"#, itemprop), "content")
}

/// Qualifies a possibly relative href against the site's base URL
pub(crate) fn absolutize(base_url: &str, href: &str) -> String {
    match Url::parse(base_url).and_then(|base| base.join(href)) {
        Ok(url) => url.to_string(),
        Err(_) => href.to_string(),
    }
}

/// Classifies the product kind from the "Produkt" row of the base-info list
/// both shops render on their detail pages
///
/// An absent row maps to [`ProductKind::Other`] so the field stays total.
pub(crate) fn product_kind_from_base_info(doc: &Html) -> ProductKind {
    let (Ok(entry_sel), Ok(label_sel), Ok(content_sel)) = (
        Selector::parse("ul.product--base-info li.base-info--entry"),
        Selector::parse("strong.entry--label"),
        Selector::parse("span.entry--content"),
    ) else {
        return ProductKind::Other;
    };

    for entry in doc.select(&entry_sel) {
        let Some(label) = entry.select(&label_sel).next() else {
            continue;
        };
        if !label.text().collect::<String>().contains("Produkt") {
            continue;
        }
        if let Some(content) = entry.select(&content_sel).next() {
            let text = content.text().collect::<String>();
            return ProductKind::classify(text.trim());
        }
    }

    ProductKind::Other
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolutize() {
        assert_eq!(
            absolutize("https://altraverse.de", "/manga/gamers"),
            "https://altraverse.de/manga/gamers"
        );
        assert_eq!(
            absolutize("https://altraverse.de", "https://altraverse.de/manga/gamers"),
            "https://altraverse.de/manga/gamers"
        );
    }

    #[test]
    fn test_meta_property() {
        let doc = Html::parse_document(
            r#"<html><head><meta property="og:title" content=" Gamers!, Band 01 " /></head></html>"#,
        );
        assert_eq!(
            meta_property(&doc, "og:title"),
            Some("Gamers!, Band 01".to_string())
        );
        assert_eq!(meta_property(&doc, "og:image"), None);
    }

    #[test]
    fn test_product_kind_from_base_info() {
        let doc = Html::parse_document(
            r#"<ul class="product--base-info">
                 <li class="base-info--entry"><strong class="entry--label">Format</strong>
                   <span class="entry--content">Taschenbuch</span></li>
                 <li class="base-info--entry"><strong class="entry--label">Produkt</strong>
                   <span class="entry--content">Light Novel</span></li>
               </ul>"#,
        );
        assert_eq!(product_kind_from_base_info(&doc), ProductKind::LightNovel);
    }

    #[test]
    fn test_product_kind_missing_row() {
        let doc = Html::parse_document("<html><body></body></html>");
        assert_eq!(product_kind_from_base_info(&doc), ProductKind::Other);
    }
}
