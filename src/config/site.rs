//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub language: String,
    #[serde(default)]
    pub author: AuthorConfig,
    #[serde(default)]
    pub social: SocialConfig,

    // URL
    pub url: String,
    pub root: String,

    // Directory
    pub content_dir: String,
    pub public_dir: String,

    // Writing
    pub date_format: String,
    pub excerpt_length: usize,
    pub render_drafts: bool,
    #[serde(default)]
    pub highlight: HighlightConfig,

    // Post page
    #[serde(default)]
    pub images: ImagesConfig,
    #[serde(default)]
    pub share: ShareConfig,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "My Blog".to_string(),
            description: String::new(),
            language: "en".to_string(),
            author: AuthorConfig::default(),
            social: SocialConfig::default(),

            url: "http://localhost:8000".to_string(),
            root: "/".to_string(),

            content_dir: "content/blog".to_string(),
            public_dir: "public".to_string(),

            date_format: "YYYY-MM-DD".to_string(),
            excerpt_length: 160,
            render_drafts: false,
            highlight: HighlightConfig::default(),

            images: ImagesConfig::default(),
            share: ShareConfig::default(),

            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}

/// Post author shown in the bio
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthorConfig {
    pub name: String,
    pub summary: String,
}

impl Default for AuthorConfig {
    fn default() -> Self {
        Self {
            name: "John Doe".to_string(),
            summary: String::new(),
        }
    }
}

/// Social accounts
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialConfig {
    pub twitter: Option<String>,
}

/// Syntax highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub theme: String,
    pub line_number: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            theme: "base16-ocean.dark".to_string(),
            line_number: false,
        }
    }
}

/// Hero image processing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ImagesConfig {
    /// Width of the default `src` variant, in pixels
    pub max_width: u32,
    /// Width of the blurred inline placeholder
    pub placeholder_width: u32,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            max_width: 800,
            placeholder_width: 20,
        }
    }
}

/// Share button configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShareConfig {
    pub services: Vec<ShareService>,
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            services: vec![
                ShareService::Twitter,
                ShareService::Facebook,
                ShareService::Pocket,
                ShareService::Hatena,
            ],
        }
    }
}

/// A service the share buttons can link to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShareService {
    Twitter,
    Facebook,
    Pocket,
    Hatena,
    Line,
    Linkedin,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.content_dir, "content/blog");
        assert_eq!(config.excerpt_length, 160);
        assert_eq!(config.images.max_width, 800);
        assert_eq!(config.share.services.len(), 4);
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: Tech Notes
url: https://example.com
author:
  name: Test User
  summary: who writes about Rust.
social:
  twitter: testuser
share:
  services: [twitter, line]
images:
  max_width: 600
analytics_id: UA-1
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "Tech Notes");
        assert_eq!(config.author.name, "Test User");
        assert_eq!(config.social.twitter.as_deref(), Some("testuser"));
        assert_eq!(
            config.share.services,
            vec![ShareService::Twitter, ShareService::Line]
        );
        assert_eq!(config.images.max_width, 600);
        assert_eq!(config.images.placeholder_width, 20);
        assert_eq!(config.root, "/");
        assert!(config.extra.contains_key("analytics_id"));
    }
}
