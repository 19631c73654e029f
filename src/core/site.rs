//! Page-facing content operations.
//!
//! Each operation issues one CMS request, normalizes every item and, for
//! listings, applies the script-based locale filter. Transport and HTTP
//! failures on reads are logged and turned into an empty list or `None` so a
//! page section can still render.

use crate::core::envelope::Envelope;
use crate::core::locale::filter_records;
use crate::core::normalizer::{normalize, normalize_all};
use crate::core::ContentSource;
use crate::domain::model::{
    Client, CmsQuery, HeroContent, Locale, Paged, Pagination, RawList, Service, TeamMember,
};
use crate::utils::error::Result;
use crate::utils::validation::validate_email;

pub const SERVICES: &str = "services";
pub const TEAM_MEMBERS: &str = "team-members";
pub const CLIENTS: &str = "clients";
pub const PAGES: &str = "pages";
pub const SUBSCRIBERS: &str = "subscribers";

/// Page size for the team and client carousels, which load everything at once.
pub const CAROUSEL_PAGE_SIZE: u32 = 100;

/// Suffix some Arabic services carry on their slug.
pub const ARABIC_SLUG_SUFFIX: &str = "-ar";

pub struct SiteContent<S: ContentSource> {
    source: S,
}

impl<S: ContentSource> SiteContent<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    async fn fetch_or_empty(&self, collection: &str, query: CmsQuery) -> Option<RawList> {
        match self.source.fetch(collection, &query).await {
            Ok(list) => Some(list),
            Err(e) => {
                tracing::error!("Error fetching {}: {} ({:?})", collection, e, e.category());
                None
            }
        }
    }

    /// Services for the home page grid. Pagination is recomputed from the
    /// filtered list, since the CMS paginated before locale filtering.
    pub async fn list_services(&self, locale: &Locale, page: u32, page_size: u32) -> Paged<Service> {
        let query = CmsQuery::new()
            .page(page, page_size)
            .populate_all()
            .locale(Some(locale));

        let Some(raw) = self.fetch_or_empty(SERVICES, query).await else {
            return Paged::empty();
        };

        let services = filter_records(normalize_all::<Service>(&raw.items, self.source.origin()), locale);
        let pagination = Pagination::recomputed(page, page_size, services.len());
        if let Some(cms) = raw.pagination {
            if cms.total != pagination.total {
                tracing::debug!(
                    "CMS reported {} services, {} left after '{}' filter",
                    cms.total,
                    pagination.total,
                    locale
                );
            }
        }

        Paged {
            data: services,
            pagination: Some(pagination),
        }
    }

    /// Single slug lookup. `locale` of `None` sends no locale parameter.
    pub async fn service_by_slug(&self, slug: &str, locale: Option<&Locale>) -> Option<Service> {
        let query = CmsQuery::new().slug_eq(slug).populate_all().locale(locale);
        let raw = self.fetch_or_empty(SERVICES, query).await?;

        raw.items
            .first()
            .and_then(|item| normalize::<Service>(item, self.source.origin()))
    }

    /// Service detail lookup with fallbacks: the slug in `locale`, then the
    /// `-ar` slug variant for Arabic, then the slug without a locale.
    pub async fn find_service(&self, slug: &str, locale: &Locale) -> Option<Service> {
        if let Some(service) = self.service_by_slug(slug, Some(locale)).await {
            return Some(service);
        }

        if *locale == Locale::Ar && !slug.ends_with(ARABIC_SLUG_SUFFIX) {
            let alternate = format!("{}{}", slug, ARABIC_SLUG_SUFFIX);
            tracing::debug!("Service '{}' not found in 'ar', trying '{}'", slug, alternate);
            if let Some(service) = self.service_by_slug(&alternate, Some(locale)).await {
                return Some(service);
            }
        }

        tracing::debug!("Service '{}' not found in '{}', trying without locale", slug, locale);
        self.service_by_slug(slug, None).await
    }

    /// Substring search over title and description. Relies on the CMS match,
    /// so no locale filter is applied and the CMS pagination is passed through.
    pub async fn search_services(
        &self,
        query: &str,
        locale: &Locale,
        page: u32,
        page_size: u32,
    ) -> Paged<Service> {
        self.search(SERVICES, &["title", "description"], query, locale, page, page_size)
            .await
    }

    pub async fn search_team_members(
        &self,
        query: &str,
        locale: &Locale,
        page: u32,
        page_size: u32,
    ) -> Paged<TeamMember> {
        self.search(TEAM_MEMBERS, &["name", "role"], query, locale, page, page_size)
            .await
    }

    async fn search<T: crate::core::normalizer::FromCms>(
        &self,
        collection: &str,
        fields: &[&str],
        needle: &str,
        locale: &Locale,
        page: u32,
        page_size: u32,
    ) -> Paged<T> {
        let needle = needle.trim();
        if needle.is_empty() {
            return Paged::empty();
        }

        let query = CmsQuery::new()
            .contains_any(fields, needle)
            .page(page, page_size)
            .populate_all()
            .locale(Some(locale));

        match self.fetch_or_empty(collection, query).await {
            Some(raw) => Paged {
                data: normalize_all(&raw.items, self.source.origin()),
                pagination: raw.pagination,
            },
            None => Paged::empty(),
        }
    }

    pub async fn list_team_members(&self, locale: &Locale) -> Vec<TeamMember> {
        let query = CmsQuery::new()
            .populate_all()
            .page_size(CAROUSEL_PAGE_SIZE)
            .locale(Some(locale));

        match self.fetch_or_empty(TEAM_MEMBERS, query).await {
            Some(raw) => filter_records(normalize_all(&raw.items, self.source.origin()), locale),
            None => Vec::new(),
        }
    }

    /// Clients for the testimonial carousel. Items whose own `locale` tag
    /// names the other language are dropped before the script filter runs.
    /// Untagged items are not assumed to be English, so an untagged Arabic
    /// testimonial still reaches the `ar` carousel.
    pub async fn list_clients(&self, locale: &Locale) -> Vec<Client> {
        let query = CmsQuery::new()
            .populate_all()
            .page_size(CAROUSEL_PAGE_SIZE)
            .locale(Some(locale));

        let Some(raw) = self.fetch_or_empty(CLIENTS, query).await else {
            return Vec::new();
        };

        let tagged_for_locale: Vec<_> = raw
            .items
            .into_iter()
            .filter(|item| match Envelope::decode(item).and_then(|e| e.locale_tag()) {
                Some(tag) if !matches!(locale, Locale::Other(_)) => Locale::parse(tag) == *locale,
                _ => true,
            })
            .collect();

        filter_records(normalize_all(&tagged_for_locale, self.source.origin()), locale)
    }

    pub async fn hero_content(&self, locale: &Locale) -> Vec<HeroContent> {
        let query = CmsQuery::new().populate_all().locale(Some(locale));

        match self.fetch_or_empty(PAGES, query).await {
            Some(raw) => filter_records(normalize_all(&raw.items, self.source.origin()), locale),
            None => Vec::new(),
        }
    }

    /// Newsletter signup. Unlike reads, failures are returned so the form can
    /// show an inline error.
    pub async fn subscribe(&self, email: &str) -> Result<serde_json::Value> {
        validate_email(email)?;
        let body = serde_json::json!({ "data": { "email": email.trim() } });

        match self.source.create(SUBSCRIBERS, body).await {
            Ok(created) => {
                tracing::info!("Subscribed {}", email.trim());
                Ok(created)
            }
            Err(e) => {
                tracing::error!("Error subscribing email: {}", e);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::SiteError;
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::sync::{Arc, Mutex};

    /// In-memory CMS that records every query it receives.
    #[derive(Clone, Default)]
    struct MockSource {
        items: Vec<Value>,
        fail: bool,
        queries: Arc<Mutex<Vec<(String, CmsQuery)>>>,
    }

    impl MockSource {
        fn with_items(items: Vec<Value>) -> Self {
            Self {
                items,
                ..Self::default()
            }
        }

        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::default()
            }
        }

        fn recorded(&self) -> Vec<(String, CmsQuery)> {
            self.queries.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ContentSource for MockSource {
        fn origin(&self) -> &str {
            "http://cms.test"
        }

        async fn fetch(&self, collection: &str, query: &CmsQuery) -> Result<RawList> {
            self.queries
                .lock()
                .unwrap()
                .push((collection.to_string(), query.clone()));
            if self.fail {
                return Err(SiteError::StatusError {
                    status: 500,
                    body: "boom".to_string(),
                });
            }
            Ok(RawList {
                items: self.items.clone(),
                pagination: None,
            })
        }

        async fn create(&self, _collection: &str, body: Value) -> Result<Value> {
            if self.fail {
                return Err(SiteError::StatusError {
                    status: 400,
                    body: "duplicate".to_string(),
                });
            }
            Ok(body)
        }
    }

    #[tokio::test]
    async fn test_list_services_filters_and_recomputes_pagination() {
        let source = MockSource::with_items(vec![
            json!({"id": 1, "slug": "tax", "title": "Tax Law"}),
            json!({"id": 2, "slug": "tax-ar", "title": "قانون الضرائب"}),
            json!({"id": 3, "slug": "labor", "title": "Labor Law"}),
        ]);
        let site = SiteContent::new(source.clone());

        let page = site.list_services(&Locale::En, 1, 2).await;
        assert_eq!(page.len(), 2);
        assert_eq!(
            page.pagination,
            Some(Pagination {
                page: 1,
                page_size: 2,
                page_count: 1,
                total: 2
            })
        );

        let (collection, query) = &source.recorded()[0];
        assert_eq!(collection, SERVICES);
        assert_eq!(query.get("locale"), Some("en"));
        assert_eq!(query.get("populate"), Some("*"));
    }

    #[tokio::test]
    async fn test_list_operations_absorb_failures() {
        let site = SiteContent::new(MockSource::failing());
        assert!(site.list_services(&Locale::En, 1, 6).await.is_empty());
        assert!(site.list_team_members(&Locale::En).await.is_empty());
        assert!(site.list_clients(&Locale::Ar).await.is_empty());
        assert!(site.hero_content(&Locale::En).await.is_empty());
        assert!(site.find_service("tax", &Locale::Ar).await.is_none());
    }

    #[tokio::test]
    async fn test_search_skips_locale_filter_and_empty_queries() {
        let source = MockSource::with_items(vec![
            json!({"id": 1, "name": "Sara", "role": "Associate"}),
            json!({"id": 2, "name": "سارة", "role": "محامية"}),
        ]);
        let site = SiteContent::new(source.clone());

        let results = site.search_team_members("sar", &Locale::En, 1, 20).await;
        assert_eq!(results.len(), 2);

        let (collection, query) = &source.recorded()[0];
        assert_eq!(collection, TEAM_MEMBERS);
        assert_eq!(query.get("filters[$or][0][name][$containsi]"), Some("sar"));
        assert_eq!(query.get("filters[$or][1][role][$containsi]"), Some("sar"));

        let empty = site.search_services("   ", &Locale::En, 1, 20).await;
        assert!(empty.is_empty());
        assert_eq!(source.recorded().len(), 1);
    }

    #[tokio::test]
    async fn test_clients_drop_contradicting_locale_tags() {
        let source = MockSource::with_items(vec![
            json!({"id": 1, "name": "محمد", "locale": "en"}),
            json!({"id": 2, "name": "أحمد", "locale": "ar"}),
            json!({"id": 3, "name": "خالد"}),
        ]);
        let site = SiteContent::new(source);

        let clients = site.list_clients(&Locale::Ar).await;
        let ids: Vec<String> = clients.iter().map(|c| c.id.to_string()).collect();
        assert_eq!(ids, vec!["2", "3"]);
    }

    #[tokio::test]
    async fn test_find_service_tries_every_fallback() {
        let source = MockSource::default();
        let site = SiteContent::new(source.clone());

        assert!(site.find_service("legal-consultation", &Locale::Ar).await.is_none());

        let recorded = source.recorded();
        assert_eq!(recorded.len(), 3);
        assert_eq!(recorded[0].1.get("filters[slug][$eq]"), Some("legal-consultation"));
        assert_eq!(recorded[1].1.get("filters[slug][$eq]"), Some("legal-consultation-ar"));
        assert_eq!(recorded[2].1.get("locale"), None);
    }

    #[tokio::test]
    async fn test_find_service_english_skips_arabic_slug() {
        let source = MockSource::default();
        let site = SiteContent::new(source.clone());

        assert!(site.find_service("tax", &Locale::En).await.is_none());
        assert_eq!(source.recorded().len(), 2);
    }

    #[tokio::test]
    async fn test_subscribe_validates_and_wraps_email() {
        let site = SiteContent::new(MockSource::default());

        let body = site.subscribe(" client@firm.com ").await.unwrap();
        assert_eq!(body, json!({"data": {"email": "client@firm.com"}}));

        let err = site.subscribe("not-an-email").await.unwrap_err();
        assert!(matches!(err, SiteError::ValidationError { .. }));

        let failing = SiteContent::new(MockSource::failing());
        assert!(failing.subscribe("client@firm.com").await.is_err());
    }
}
