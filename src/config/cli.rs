use crate::config::{CmsConfig, API_TOKEN_ENV, BASE_URL_ENV, DEFAULT_BASE_URL, DEFAULT_PAGE_SIZE};
use crate::config::toml_config::TomlConfig;
use crate::domain::model::Locale;
use crate::utils::error::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "legal-site")]
#[command(about = "Fetch and normalize legal-site content from the CMS")]
pub struct Cli {
    /// CMS origin, without the /api suffix
    #[arg(long, env = BASE_URL_ENV, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Static CMS API token
    #[arg(long, env = API_TOKEN_ENV, hide_env_values = true)]
    pub api_token: Option<String>,

    /// TOML configuration file; replaces the connection flags when given
    #[arg(short, long)]
    pub config: Option<String>,

    /// Display locale (en or ar); overrides the configured default
    #[arg(short, long)]
    pub locale: Option<String>,

    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    pub page_size: u32,

    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List services for the home page
    Services {
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Show one service by slug
    Service { slug: String },
    /// Search services, or team members with --team
    Search {
        query: String,
        #[arg(long)]
        team: bool,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// List team members
    Team,
    /// List clients and testimonials
    Clients,
    /// Show hero banners
    Hero,
    /// Subscribe an email to the newsletter
    Subscribe { email: String },
}

impl Cli {
    pub fn cms_config(&self) -> Result<CmsConfig> {
        let config = match &self.config {
            Some(path) => {
                tracing::info!("Loading configuration from: {}", path);
                TomlConfig::from_file(path)?.into_cms_config()
            }
            None => CmsConfig {
                base_url: self.base_url.clone(),
                api_token: self.api_token.clone().filter(|t| !t.trim().is_empty()),
                page_size: self.page_size,
                timeout_seconds: self.timeout_seconds,
                ..CmsConfig::default()
            },
        };
        Ok(config)
    }

    /// Locale for this session: `--locale` when given, else the configured default.
    pub fn session_locale(&self, config: &CmsConfig) -> Locale {
        self.locale
            .as_deref()
            .map(Locale::parse)
            .unwrap_or_else(|| config.default_locale.clone())
    }
}
