//! Maps raw CMS items onto the flat view models.
//!
//! Normalization is total: a record missing expected fields still produces a
//! best-effort view model with placeholders, and only items that are not JSON
//! objects at all are dropped from a list.

use crate::core::envelope::{scalar_text, Envelope};
use crate::core::media::resolve_image;
use crate::domain::model::{Client, HeroContent, Media, MediaKind, Service, Subsection, TeamMember};
use serde_json::Value;

pub const UNKNOWN: &str = "Unknown";

pub trait FromCms: Sized {
    /// Collection label used in diagnostics.
    const KIND: &'static str;

    fn from_envelope(envelope: &Envelope<'_>, origin: &str) -> Self;
}

pub fn normalize<T: FromCms>(item: &Value, origin: &str) -> Option<T> {
    match Envelope::decode(item) {
        Some(envelope) => Some(T::from_envelope(&envelope, origin)),
        None => {
            tracing::warn!("Skipping {} item that is not an object: {}", T::KIND, item);
            None
        }
    }
}

pub fn normalize_all<T: FromCms>(items: &[Value], origin: &str) -> Vec<T> {
    items
        .iter()
        .filter_map(|item| normalize::<T>(item, origin))
        .collect()
}

impl FromCms for Service {
    const KIND: &'static str = "service";

    fn from_envelope(envelope: &Envelope<'_>, origin: &str) -> Self {
        let id = envelope.item_id();
        let slug = envelope.text("slug").unwrap_or_default();
        let title = envelope.text("title");
        if slug.is_empty() || title.is_none() {
            tracing::debug!(
                "Service {} ({}) is missing slug or title",
                id,
                envelope.convention()
            );
        }

        let (content, embedded_subsections) = resolve_content(envelope.field("content"));
        let subsections = match envelope.field("subsections") {
            Some(Value::Array(entries)) => Some(parse_subsections(entries)),
            Some(_) => Some(Vec::new()),
            None => embedded_subsections,
        };

        Service {
            id,
            slug,
            title: title.unwrap_or_else(|| UNKNOWN.to_string()),
            description: envelope.text("description").unwrap_or_default(),
            content,
            image: resolve_image(origin, envelope.field("image")),
            subsections,
        }
    }
}

/// The CMS `content` field doubles as a JSON-encoded `{footer, subsections}`
/// document. Returns the flattened text and any embedded subsections.
fn resolve_content(content: Option<&Value>) -> (String, Option<Vec<Subsection>>) {
    match content {
        Some(Value::String(raw)) if raw.starts_with('{') => {
            match serde_json::from_str::<Value>(raw) {
                Ok(parsed) => structured_content(&parsed),
                Err(e) => {
                    tracing::debug!("Service content looks like JSON but failed to parse: {}", e);
                    (raw.clone(), None)
                }
            }
        }
        Some(Value::String(raw)) => (raw.clone(), None),
        Some(structured @ Value::Object(_)) => structured_content(structured),
        _ => (String::new(), None),
    }
}

fn structured_content(parsed: &Value) -> (String, Option<Vec<Subsection>>) {
    let footer = parsed
        .get("footer")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let subsections = parsed
        .get("subsections")
        .and_then(Value::as_array)
        .map(|entries| parse_subsections(entries));
    (footer, subsections)
}

fn parse_subsections(entries: &[Value]) -> Vec<Subsection> {
    entries
        .iter()
        .filter_map(Envelope::decode)
        .map(|entry| Subsection {
            title: entry.text("title").unwrap_or_default(),
            description: entry.text("description").unwrap_or_default(),
            items: entry
                .field("items")
                .and_then(Value::as_array)
                .map(|items| items.iter().filter_map(scalar_text).collect())
                .unwrap_or_default(),
        })
        .collect()
}

impl FromCms for TeamMember {
    const KIND: &'static str = "team member";

    fn from_envelope(envelope: &Envelope<'_>, origin: &str) -> Self {
        let id = envelope.item_id();
        let name = envelope.text("name");
        let role = envelope.text("role");
        if name.is_none() && role.is_none() {
            tracing::debug!("Team member {} is missing name and role: {:?}", id, envelope.fields());
        }

        TeamMember {
            id,
            name: name.unwrap_or_else(|| UNKNOWN.to_string()),
            role: role.unwrap_or_default(),
            image: resolve_image(origin, envelope.field("image")),
            whatsapp: envelope.text("whatsapp"),
            phone: envelope.text("phone"),
            email: envelope.text("email"),
        }
    }
}

impl FromCms for Client {
    const KIND: &'static str = "client";

    fn from_envelope(envelope: &Envelope<'_>, origin: &str) -> Self {
        let id = envelope.item_id();
        let name = envelope.text("name").unwrap_or_else(|| {
            tracing::debug!("Client {} has no name", id);
            UNKNOWN.to_string()
        });

        Client {
            id,
            name,
            position: envelope.text("position"),
            company: envelope.text("company"),
            image: resolve_image(origin, envelope.field("image")),
            testimonial: envelope.text("testimonial"),
        }
    }
}

impl FromCms for HeroContent {
    const KIND: &'static str = "hero";

    fn from_envelope(envelope: &Envelope<'_>, origin: &str) -> Self {
        let id = envelope.item_id();
        let title = envelope.text("title").unwrap_or_else(|| {
            tracing::debug!("Hero item {} has no title", id);
            UNKNOWN.to_string()
        });

        let kind = match envelope.text("mediaType") {
            Some(kind) if kind.eq_ignore_ascii_case("video") => MediaKind::Video,
            _ => MediaKind::Image,
        };
        let image = resolve_image(origin, envelope.field("media"));
        let media = Media {
            kind,
            url: image.as_ref().map(|i| i.url.clone()).unwrap_or_default(),
            alt: image.map(|i| i.alt).filter(|alt| !alt.is_empty()),
        };

        HeroContent {
            id,
            title,
            subtitle: envelope.text("subtitle"),
            description: envelope.text("description"),
            cta_text: envelope.text("ctaText"),
            cta_link: envelope.text("ctaLink"),
            media,
        }
    }
}
