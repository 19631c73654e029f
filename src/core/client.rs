use crate::core::{ConfigProvider, ContentSource};
use crate::domain::model::{CmsQuery, RawList};
use crate::utils::error::{Result, SiteError};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use std::time::Duration;

/// Strapi REST client. Every call is a single request; errors are returned
/// as-is and retries are left to the caller.
#[derive(Debug, Clone)]
pub struct StrapiClient {
    http: Client,
    base_url: String,
}

impl StrapiClient {
    pub fn new<C: ConfigProvider>(config: &C) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(token) = config.api_token() {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|e| {
                SiteError::InvalidConfigValueError {
                    field: "api_token".to_string(),
                    value: "<redacted>".to_string(),
                    reason: e.to_string(),
                }
            })?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let mut builder = Client::builder().default_headers(headers);
        if let Some(seconds) = config.timeout_seconds() {
            builder = builder.timeout(Duration::from_secs(seconds));
        }

        Ok(Self {
            http: builder.build()?,
            base_url: config.base_url().trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, collection: &str) -> String {
        format!("{}/api/{}", self.base_url, collection.trim_start_matches('/'))
    }

    async fn read_json(response: reqwest::Response) -> Result<serde_json::Value> {
        let status = response.status();
        tracing::debug!("CMS response status: {}", status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SiteError::StatusError {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl ContentSource for StrapiClient {
    fn origin(&self) -> &str {
        &self.base_url
    }

    async fn fetch(&self, collection: &str, query: &CmsQuery) -> Result<RawList> {
        let url = self.endpoint(collection);
        tracing::debug!("GET {} {:?}", url, query.params());

        let response = self.http.get(&url).query(query.params()).send().await?;
        let body = Self::read_json(response).await?;
        let list = RawList::from_body(body);

        tracing::debug!("Fetched {} raw {} items", list.items.len(), collection);
        Ok(list)
    }

    async fn create(
        &self,
        collection: &str,
        body: serde_json::Value,
    ) -> Result<serde_json::Value> {
        let url = self.endpoint(collection);
        tracing::debug!("POST {}", url);

        let response = self.http.post(&url).json(&body).send().await?;
        Self::read_json(response).await
    }
}
