pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::Cli;

pub use config::{toml_config::TomlConfig, CmsConfig};
pub use self::core::{
    client::StrapiClient, locale::filter_by_locale, session::SessionContext, site::SiteContent,
};
pub use utils::error::{Result, SiteError};
