use legal_site::core::locale::{filter_records, has_arabic_text};
use legal_site::core::normalizer::{normalize, normalize_all, FromCms};
use legal_site::core::{Client, HeroContent, Locale, Service, TeamMember};
use serde_json::{json, Map, Value};

const ORIGIN: &str = "https://cms.example.com";

/// Wraps the flat (current) form of an item into the legacy `attributes` form.
fn to_legacy(flat: &Value) -> Value {
    let mut attributes: Map<String, Value> = flat.as_object().unwrap().clone();
    let id = attributes.remove("id").unwrap_or(Value::Null);
    json!({ "id": id, "attributes": attributes })
}

fn assert_shape_invariant<T: FromCms + PartialEq + std::fmt::Debug>(flat: Value) {
    let legacy = to_legacy(&flat);
    let from_flat: T = normalize(&flat, ORIGIN).unwrap();
    let from_legacy: T = normalize(&legacy, ORIGIN).unwrap();
    assert_eq!(from_flat, from_legacy);
}

#[test]
fn test_service_shape_invariance() {
    assert_shape_invariant::<Service>(json!({
        "id": 4,
        "slug": "corporate",
        "title": "Corporate Law",
        "description": "Company formation",
        "content": "{\"footer\":\"Call us\",\"subsections\":[{\"title\":\"A\",\"description\":\"B\",\"items\":[\"x\",\"y\"]}]}",
        "image": {"data": {"attributes": {"url": "/uploads/corp.png", "caption": "Tower"}}}
    }));
}

#[test]
fn test_team_member_shape_invariance() {
    assert_shape_invariant::<TeamMember>(json!({
        "id": 9,
        "name": "Layla Hassan",
        "role": "Senior Associate",
        "email": "layla@firm.com",
        "phone": "+966 11 000 0000",
        "image": {"url": "/uploads/layla.jpg", "alternativeText": "Layla"}
    }));
}

#[test]
fn test_client_shape_invariance() {
    assert_shape_invariant::<Client>(json!({
        "id": 2,
        "name": "Omar Khalid",
        "position": "CFO",
        "testimonial": "Reliable and quick.",
        "image": {"data": {"attributes": {"url": "/uploads/omar.jpg"}}}
    }));
}

#[test]
fn test_hero_shape_invariance() {
    assert_shape_invariant::<HeroContent>(json!({
        "id": 1,
        "title": "Welcome",
        "description": "Full-service firm",
        "ctaText": "Read more",
        "ctaLink": "/services",
        "mediaType": "image",
        "media": {"data": {"attributes": {"url": "/uploads/hero.png", "alternativeText": "Skyline"}}}
    }));
}

#[test]
fn test_every_image_url_is_absolute() {
    let items = vec![
        json!({"id": 1, "name": "A", "image": {"url": "/uploads/a.png"}}),
        json!({"id": 2, "name": "B", "image": {"data": {"attributes": {"url": "uploads/b.png"}}}}),
        json!({"id": 3, "name": "C", "image": {"attributes": {"url": "https://cdn.example.com/c.png"}}}),
    ];
    let members: Vec<TeamMember> = normalize_all(&items, ORIGIN);

    let urls: Vec<&str> = members
        .iter()
        .map(|m| m.image.as_ref().unwrap().url.as_str())
        .collect();
    assert_eq!(
        urls,
        vec![
            "https://cms.example.com/uploads/a.png",
            "https://cms.example.com/uploads/b.png",
            "https://cdn.example.com/c.png",
        ]
    );
}

#[test]
fn test_locale_split_of_normalized_clients() {
    let items = vec![
        json!({"id": 1, "name": "Mohammed Saif", "testimonial": "Great firm."}),
        json!({"id": 2, "name": "محمد سيف", "testimonial": "مكتب رائع"}),
        json!({"id": 3, "name": "John Smith", "testimonial": "خدمة ممتازة"}),
        json!({"id": 4, "name": "1998"}),
    ];
    let clients: Vec<Client> = normalize_all(&items, ORIGIN);

    let en = filter_records(clients.clone(), &Locale::En);
    let ar = filter_records(clients.clone(), &Locale::Ar);

    let en_ids: Vec<String> = en.iter().map(|c| c.id.to_string()).collect();
    let ar_ids: Vec<String> = ar.iter().map(|c| c.id.to_string()).collect();
    assert_eq!(en_ids, vec!["1", "4"]);
    assert_eq!(ar_ids, vec!["2", "3"]);

    for client in &ar {
        let texts = [Some(client.name.as_str()), client.testimonial.as_deref()];
        assert!(texts.iter().flatten().any(|t| has_arabic_text(t)));
    }
    assert_eq!(en.len() + ar.len(), clients.len());
}
