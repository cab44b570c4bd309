//! Configuration module

mod site;

pub use site::AuthorConfig;
pub use site::HighlightConfig;
pub use site::ImagesConfig;
pub use site::ShareConfig;
pub use site::ShareService;
pub use site::SiteConfig;
pub use site::SocialConfig;
