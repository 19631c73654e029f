use crate::domain::model::{CmsQuery, Locale, RawList};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait ConfigProvider: Send + Sync {
    /// CMS origin without the `/api` suffix, e.g. `http://localhost:1337`.
    fn base_url(&self) -> &str;
    fn api_token(&self) -> Option<&str>;
    fn default_locale(&self) -> Locale;
    fn page_size(&self) -> u32;
    fn timeout_seconds(&self) -> Option<u64>;
}

/// Read/write access to the CMS collections. `collection` is the REST
/// collection name such as `services` or `team-members`.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Origin that relative upload paths are resolved against.
    fn origin(&self) -> &str;
    async fn fetch(&self, collection: &str, query: &CmsQuery) -> Result<RawList>;
    async fn create(
        &self,
        collection: &str,
        body: serde_json::Value,
    ) -> Result<serde_json::Value>;
}
