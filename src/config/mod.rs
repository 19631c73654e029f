#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::domain::model::Locale;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "http://localhost:1337";
pub const BASE_URL_ENV: &str = "CMS_URL";
pub const API_TOKEN_ENV: &str = "CMS_TOKEN";
pub const DEFAULT_PAGE_SIZE: u32 = 10;
/// Strapi's default `maxLimit` for REST pagination.
pub const MAX_PAGE_SIZE: u32 = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CmsConfig {
    pub base_url: String,
    pub api_token: Option<String>,
    pub default_locale: Locale,
    pub page_size: u32,
    pub timeout_seconds: Option<u64>,
}

impl Default for CmsConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_token: None,
            default_locale: Locale::En,
            page_size: DEFAULT_PAGE_SIZE,
            timeout_seconds: None,
        }
    }
}

impl CmsConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }
}

impl ConfigProvider for CmsConfig {
    fn base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    fn api_token(&self) -> Option<&str> {
        self.api_token.as_deref()
    }

    fn default_locale(&self) -> Locale {
        self.default_locale.clone()
    }

    fn page_size(&self) -> u32 {
        self.page_size
    }

    fn timeout_seconds(&self) -> Option<u64> {
        self.timeout_seconds
    }
}

impl Validate for CmsConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("base_url", &self.base_url)?;
        validation::validate_range("page_size", self.page_size, 1, MAX_PAGE_SIZE)?;
        validation::validate_non_empty_string("default_locale", self.default_locale.as_str())?;
        if let Some(token) = &self.api_token {
            validation::validate_non_empty_string("api_token", token)?;
        }
        if let Some(timeout) = self.timeout_seconds {
            validation::validate_range("timeout_seconds", timeout, 1, 300)?;
        }
        Ok(())
    }
}
