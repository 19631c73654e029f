use serde::{Deserialize, Serialize};
use std::fmt;

/// CMS record identifier. Strapi v4 uses numeric ids, v5 adds string `documentId`s.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemId {
    Number(i64),
    Text(String),
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemId::Number(n) => write!(f, "{}", n),
            ItemId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for ItemId {
    fn from(value: i64) -> Self {
        ItemId::Number(value)
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        ItemId::Text(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
    pub alt: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subsection {
    pub title: String,
    pub description: String,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: ItemId,
    pub slug: String,
    pub title: String,
    pub description: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<Image>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subsections: Option<Vec<Subsection>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    pub id: ItemId,
    pub name: String,
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<Image>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whatsapp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: ItemId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<Image>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub testimonial: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Media {
    #[serde(rename = "type")]
    pub kind: MediaKind,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroContent {
    pub id: ItemId,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cta_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cta_link: Option<String>,
    pub media: Media,
}

/// UI display language. Anything other than `en`/`ar` disables locale filtering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Locale {
    #[default]
    En,
    Ar,
    Other(String),
}

impl Locale {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "en" => Locale::En,
            "ar" => Locale::Ar,
            other => Locale::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Locale::En => "en",
            Locale::Ar => "ar",
            Locale::Other(s) => s,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Locale {
    fn from(value: &str) -> Self {
        Locale::parse(value)
    }
}

impl Serialize for Locale {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Locale {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Locale::parse(&raw))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub page_size: u32,
    pub page_count: u32,
    pub total: u32,
}

impl Pagination {
    /// Rebuilds counts from the number of records that survived client-side filtering.
    /// The CMS paginated before filtering, so these can disagree with its own meta.
    pub fn recomputed(page: u32, page_size: u32, remaining: usize) -> Self {
        let total = remaining as u32;
        let page_count = if page_size == 0 {
            0
        } else {
            total.div_ceil(page_size)
        };
        Self {
            page,
            page_size,
            page_count,
            total,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paged<T> {
    pub data: Vec<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

impl<T> Paged<T> {
    pub fn empty() -> Self {
        Self {
            data: Vec::new(),
            pagination: None,
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl<T> Default for Paged<T> {
    fn default() -> Self {
        Self::empty()
    }
}

/// One list/detail response body before normalization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawList {
    pub items: Vec<serde_json::Value>,
    pub pagination: Option<Pagination>,
}

impl RawList {
    /// Accepts `{data: [...], meta: {pagination}}`, `{data: {...}}` or a bare array.
    pub fn from_body(body: serde_json::Value) -> Self {
        use serde_json::Value;

        let pagination = body
            .pointer("/meta/pagination")
            .or_else(|| body.get("pagination"))
            .and_then(|p| serde_json::from_value::<Pagination>(p.clone()).ok());

        let items = match body {
            Value::Array(items) => items,
            Value::Object(mut obj) => match obj.remove("data") {
                Some(Value::Array(items)) => items,
                Some(Value::Null) | None => Vec::new(),
                Some(single) => vec![single],
            },
            _ => Vec::new(),
        };

        Self { items, pagination }
    }
}

/// Strapi REST query parameters, kept in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CmsQuery {
    params: Vec<(String, String)>,
}

impl CmsQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.params.push((key.into(), value.to_string()));
        self
    }

    pub fn populate_all(self) -> Self {
        self.param("populate", "*")
    }

    pub fn page(self, page: u32, page_size: u32) -> Self {
        self.param("pagination[page]", page)
            .param("pagination[pageSize]", page_size)
    }

    pub fn page_size(self, page_size: u32) -> Self {
        self.param("pagination[pageSize]", page_size)
    }

    /// `None` leaves the CMS to pick its default locale.
    pub fn locale(self, locale: Option<&Locale>) -> Self {
        match locale {
            Some(locale) => self.param("locale", locale.as_str()),
            None => self,
        }
    }

    pub fn slug_eq(self, slug: &str) -> Self {
        self.param("filters[slug][$eq]", slug)
    }

    /// Case-insensitive substring match on any of `fields`.
    pub fn contains_any(mut self, fields: &[&str], needle: &str) -> Self {
        for (index, field) in fields.iter().enumerate() {
            self = self.param(format!("filters[$or][{}][{}][$containsi]", index, field), needle);
        }
        self
    }

    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}
