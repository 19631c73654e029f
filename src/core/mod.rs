pub mod client;
pub mod envelope;
pub mod locale;
pub mod media;
pub mod normalizer;
pub mod session;
pub mod site;

pub use crate::domain::model::{
    Client, CmsQuery, HeroContent, Image, ItemId, Locale, Media, MediaKind, Paged, Pagination,
    RawList, Service, Subsection, TeamMember,
};
pub use crate::domain::ports::{ConfigProvider, ContentSource};
pub use crate::utils::error::Result;
