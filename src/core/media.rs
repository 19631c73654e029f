use crate::domain::model::Image;
use serde_json::{Map, Value};
use url::Url;

/// Strapi image format variants, largest first.
const FORMAT_PREFERENCE: [&str; 4] = ["large", "medium", "small", "thumbnail"];

/// Prefixes relative upload paths with the CMS origin. Absolute and
/// protocol-relative URLs are returned unchanged, so the function is idempotent.
pub fn absolutize(origin: &str, url: &str) -> String {
    if is_absolute(url) {
        return url.to_string();
    }

    let origin = origin.trim_end_matches('/');
    if url.starts_with('/') {
        format!("{}{}", origin, url)
    } else {
        format!("{}/{}", origin, url)
    }
}

fn is_absolute(url: &str) -> bool {
    url.starts_with("//") || Url::parse(url).is_ok()
}

/// Unwraps `field`, `field.data`, `field.data.attributes` or `field.attributes`
/// down to the media object. Multi-media fields use their first entry.
fn unwrap_media(reference: &Value) -> Option<&Map<String, Value>> {
    let mut node = first_if_array(reference)?;

    if let Some(data) = node.get("data") {
        node = first_if_array(data)?;
    }
    if let Some(attributes) = node.get("attributes").filter(|a| a.is_object()) {
        node = attributes;
    }

    node.as_object()
}

fn first_if_array(value: &Value) -> Option<&Value> {
    match value {
        Value::Array(items) => items.first(),
        Value::Null => None,
        other => Some(other),
    }
}

fn non_empty_str<'a>(media: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    media.get(key).and_then(Value::as_str).filter(|s| !s.is_empty())
}

fn pick_url(media: &Map<String, Value>) -> Option<&str> {
    non_empty_str(media, "url").or_else(|| {
        let formats = media.get("formats")?;
        FORMAT_PREFERENCE.iter().find_map(|format| {
            formats
                .get(format)
                .and_then(|f| f.get("url"))
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
        })
    })
}

/// Resolves a media reference to an absolute image. `None` when the
/// reference is absent or carries no usable URL.
pub fn resolve_image(origin: &str, reference: Option<&Value>) -> Option<Image> {
    let media = unwrap_media(reference?)?;
    let url = pick_url(media)?;
    let alt = non_empty_str(media, "alternativeText")
        .or_else(|| non_empty_str(media, "caption"))
        .unwrap_or_default();

    Some(Image {
        url: absolutize(origin, url),
        alt: alt.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const ORIGIN: &str = "http://localhost:1337";

    #[test]
    fn test_absolutize_relative_and_absolute() {
        assert_eq!(
            absolutize(ORIGIN, "/uploads/team.jpg"),
            "http://localhost:1337/uploads/team.jpg"
        );
        assert_eq!(
            absolutize("http://localhost:1337/", "uploads/team.jpg"),
            "http://localhost:1337/uploads/team.jpg"
        );
        let cdn = "https://cdn.example.com/uploads/team.jpg";
        assert_eq!(absolutize(ORIGIN, cdn), cdn);
        assert_eq!(absolutize(ORIGIN, "//cdn.example.com/a.png"), "//cdn.example.com/a.png");
    }

    #[test]
    fn test_absolutize_is_idempotent() {
        for path in ["/uploads/a.png", "uploads/b.png", "https://x.io/c.png"] {
            let once = absolutize(ORIGIN, path);
            assert_eq!(absolutize(ORIGIN, &once), once);
        }
    }

    #[test]
    fn test_resolve_all_nesting_shapes() {
        let flat = json!({"url": "/uploads/a.png", "alternativeText": "A"});
        let data = json!({"data": {"url": "/uploads/a.png", "alternativeText": "A"}});
        let data_attributes =
            json!({"data": {"id": 4, "attributes": {"url": "/uploads/a.png", "alternativeText": "A"}}});
        let attributes = json!({"attributes": {"url": "/uploads/a.png", "alternativeText": "A"}});

        let expected = Some(Image {
            url: "http://localhost:1337/uploads/a.png".to_string(),
            alt: "A".to_string(),
        });
        for shape in [flat, data, data_attributes, attributes] {
            assert_eq!(resolve_image(ORIGIN, Some(&shape)), expected);
        }
    }

    #[test]
    fn test_resolve_prefers_formats_in_size_order() {
        let media = json!({
            "formats": {
                "thumbnail": {"url": "/uploads/thumb_a.png"},
                "medium": {"url": "/uploads/medium_a.png"}
            },
            "caption": "Office"
        });
        let image = resolve_image(ORIGIN, Some(&media)).unwrap();
        assert_eq!(image.url, "http://localhost:1337/uploads/medium_a.png");
        assert_eq!(image.alt, "Office");
    }

    #[test]
    fn test_resolve_missing_media() {
        assert_eq!(resolve_image(ORIGIN, None), None);
        assert_eq!(resolve_image(ORIGIN, Some(&json!({"data": null}))), None);
        assert_eq!(resolve_image(ORIGIN, Some(&json!({"alternativeText": "no url"}))), None);
    }

    #[test]
    fn test_resolve_multi_media_takes_first() {
        let media = json!({"data": [{"attributes": {"url": "/uploads/1.png"}}, {"attributes": {"url": "/uploads/2.png"}}]});
        let image = resolve_image(ORIGIN, Some(&media)).unwrap();
        assert_eq!(image.url, "http://localhost:1337/uploads/1.png");
        assert_eq!(image.alt, "");
    }
}
