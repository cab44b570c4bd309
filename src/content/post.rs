//! Post data as the page query resolves it

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::config::{ShareService, SiteConfig};

/// A blog post, fully resolved before any page is rendered
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// Stable identifier derived from the source path
    pub id: String,

    /// Plain-text summary, pruned to the configured length
    pub excerpt: String,

    /// Rendered HTML body (trusted markup)
    pub html: String,

    pub fields: PostFields,

    pub frontmatter: PostFrontmatter,
}

/// Fields computed from the source file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostFields {
    /// Route path, e.g. `/hello-world/`
    pub slug: String,
}

/// Front-matter values after formatting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostFrontmatter {
    pub title: String,
    /// Date already formatted with the site's `date_format`
    pub date: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub image: Option<PostImage>,
}

/// A post's hero image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostImage {
    /// URL of the untouched original
    #[serde(rename = "publicURL")]
    pub public_url: String,
    /// Responsive variants; absent for formats that are copied but not resized (SVG, GIF)
    pub fluid: Option<FluidImage>,
}

/// Responsive image descriptor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FluidImage {
    pub aspect_ratio: f64,
    pub src: String,
    pub src_set: String,
    pub sizes: String,
    /// Inline blurred placeholder as a data URI
    pub base64: Option<String>,
}

/// Site-wide metadata shared by every page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteMetadata {
    pub title: String,
    pub description: String,
    pub site_url: String,
    /// Path prefix every route lives under
    pub root: String,
    pub lang: String,
    pub author: Author,
    pub social: Social,
    pub share_services: Vec<ShareService>,
    /// Year shown in the footer, fixed when the build starts
    pub build_year: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Social {
    pub twitter: Option<String>,
}

impl SiteMetadata {
    pub fn from_config(config: &SiteConfig, build_year: i32) -> Self {
        Self {
            title: config.title.clone(),
            description: config.description.clone(),
            site_url: config.url.clone(),
            root: config.root.clone(),
            lang: config.language.clone(),
            author: Author {
                name: config.author.name.clone(),
                summary: config.author.summary.clone(),
            },
            social: Social {
                twitter: config.social.twitter.clone(),
            },
            share_services: config.share.services.clone(),
            build_year,
        }
    }
}

/// Reference to a neighbouring post in date order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjacentPostRef {
    pub slug: Option<String>,
    pub title: String,
}

impl AdjacentPostRef {
    pub fn from_post(post: &Post) -> Self {
        Self {
            slug: Some(post.fields.slug.clone()),
            title: post.frontmatter.title.clone(),
        }
    }
}

/// Per-page values decided when routes are created
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageContext {
    /// The older post
    pub previous: Option<AdjacentPostRef>,
    /// The newer post
    pub next: Option<AdjacentPostRef>,
    /// Pathname of the page being rendered
    pub location: String,
}

/// Everything the post page query returns for one slug
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostQuery {
    pub site: SiteMetadata,
    pub post: Post,
}

/// A loaded post with the bookkeeping the generator needs
#[derive(Debug, Clone)]
pub struct PostEntry {
    pub post: Post,
    /// Publication date, used for ordering
    pub published: DateTime<Local>,
    /// Full source file path
    pub source: PathBuf,
}
