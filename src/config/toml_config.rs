use crate::config::{CmsConfig, DEFAULT_BASE_URL, DEFAULT_PAGE_SIZE};
use crate::domain::model::Locale;
use crate::utils::error::{Result, SiteError};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

/// File form of the site configuration:
///
/// ```toml
/// [cms]
/// base_url = "${CMS_URL}"
/// api_token = "${CMS_TOKEN}"
/// timeout_seconds = 10
///
/// [site]
/// default_locale = "ar"
/// page_size = 6
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub cms: CmsSection,
    #[serde(default)]
    pub site: SiteSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CmsSection {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    pub api_token: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteSection {
    #[serde(default)]
    pub default_locale: Locale,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            default_locale: Locale::En,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn env_placeholder() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("placeholder pattern is valid"))
}

impl TomlConfig {
    /// Loads and parses a TOML configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SiteError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| SiteError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value. Unset variables are left as written.
    fn substitute_env_vars(content: &str) -> String {
        env_placeholder()
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .to_string()
    }

    pub fn into_cms_config(self) -> CmsConfig {
        let api_token = self.cms.api_token.filter(|token| {
            let unresolved = env_placeholder().is_match(token);
            if unresolved {
                tracing::warn!("api_token references an unset environment variable, sending no token");
            }
            !unresolved && !token.trim().is_empty()
        });

        CmsConfig {
            base_url: self.cms.base_url,
            api_token,
            default_locale: self.site.default_locale,
            page_size: self.site.page_size,
            timeout_seconds: self.cms.timeout_seconds,
        }
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.clone().into_cms_config().validate()
    }
}
