use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Mapping from cleaned franchise name to the records extracted for it,
/// in page-then-task order
pub type FranchiseMap = BTreeMap<String, Vec<ProductRecord>>;

/// Product category, classified from the site's own metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductKind {
    Manga,
    LightNovel,
    Webtoon,
    Other,
}

impl ProductKind {
    /// Classifies a kind from the free-text product field a site exposes
    /// (e.g. the "Produkt" row of a detail page)
    pub fn classify(text: &str) -> Self {
        let text = text.to_uppercase();
        if text.contains("MANGA") {
            Self::Manga
        } else if text.contains("LIGHT NOVEL") {
            Self::LightNovel
        } else if text.contains("WEBTOON") {
            Self::Webtoon
        } else {
            Self::Other
        }
    }
}

impl fmt::Display for ProductKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Manga => "MANGA",
            Self::LightNovel => "LIGHT_NOVEL",
            Self::Webtoon => "WEBTOON",
            Self::Other => "OTHER",
        };
        f.write_str(name)
    }
}

/// One extracted product release
///
/// Produced by a site adapter's detail extraction and immutable afterwards.
/// Optional fields use `None` internally; the JSON boundary re-emits the
/// `"N/A"` literal because the downstream store expects it.
#[derive(Debug, Clone, Serialize)]
pub struct ProductRecord {
    /// Full product title as shown on the detail page
    pub title: String,

    /// The text the franchise name was derived from (before cleanup)
    #[serde(skip_serializing)]
    pub franchise_raw_title: String,

    /// Cleaned franchise name; `None` when cleanup yields nothing
    #[serde(skip_serializing)]
    pub franchise: Option<String>,

    /// Validated 13-digit hyphenated ISBN, the dedup key
    pub isbn: String,

    #[serde(serialize_with = "na_if_none")]
    pub description: Option<String>,

    #[serde(rename = "image", serialize_with = "na_if_none")]
    pub image_url: Option<String>,

    /// Release date in dd.mm.yyyy form, `None` when the site gave none
    #[serde(serialize_with = "na_if_none")]
    pub release_date: Option<String>,

    #[serde(rename = "type")]
    pub kind: ProductKind,

    /// The detail-page URL this record was extracted from
    #[serde(rename = "link")]
    pub source_url: String,
}

impl ProductRecord {
    /// The key this record is grouped under in the output map
    ///
    /// Franchise-less records share the literal "None" key, which is what the
    /// downstream store expects for them.
    pub fn franchise_key(&self) -> String {
        self.franchise.clone().unwrap_or_else(|| "None".to_string())
    }
}

fn na_if_none<S>(value: &Option<String>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(value.as_deref().unwrap_or("N/A"))
}
