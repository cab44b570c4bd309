//! View models for the site components a post page is assembled from

use serde::Serialize;

use crate::config::ShareService;
use crate::content::{FluidImage, SiteMetadata};
use crate::helpers::{encode_url, full_url_for, is_root_path, url_for};

/// Page shell: language, site header and footer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub lang: String,
    pub site_title: String,
    pub home_url: String,
    /// The home page gets a large heading instead of a small home link
    pub is_root_path: bool,
    pub year: i32,
}

impl Layout {
    pub fn new(site: &SiteMetadata, location: &str) -> Self {
        Self {
            lang: site.lang.clone(),
            site_title: site.title.clone(),
            home_url: url_for(&site.root, ""),
            is_root_path: is_root_path(&site.root, location),
            year: site.build_year,
        }
    }
}

/// Document title and meta tags
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Seo {
    /// Contents of `<title>`
    pub document_title: String,
    pub description: String,
    /// Absolute URL of the social preview image
    pub image: Option<String>,
    pub meta: Vec<MetaTag>,
}

/// A `<meta>` element keyed by either `name` or `property`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetaTag {
    pub attr: &'static str,
    pub key: String,
    pub content: String,
}

impl MetaTag {
    fn name(key: &str, content: &str) -> Self {
        Self {
            attr: "name",
            key: key.to_string(),
            content: content.to_string(),
        }
    }

    fn property(key: &str, content: &str) -> Self {
        Self {
            attr: "property",
            key: key.to_string(),
            content: content.to_string(),
        }
    }
}

impl Seo {
    /// An empty `title` falls back to the site title, an empty `description`
    /// to the site description. `image` is a site-relative URL.
    pub fn new(
        site: &SiteMetadata,
        title: &str,
        description: &str,
        image: Option<&str>,
        og_type: &str,
    ) -> Self {
        let (document_title, title) = if title.is_empty() {
            (site.title.clone(), site.title.as_str())
        } else {
            (format!("{} | {}", title, site.title), title)
        };
        let description = if description.is_empty() {
            site.description.as_str()
        } else {
            description
        };
        let image = image.map(|url| full_url_for(&site.site_url, &site.root, url));

        let mut meta = vec![
            MetaTag::name("description", description),
            MetaTag::property("og:title", title),
            MetaTag::property("og:description", description),
            MetaTag::property("og:type", og_type),
        ];
        if let Some(ref url) = image {
            meta.push(MetaTag::property("og:image", url));
        }
        let card = if image.is_some() {
            "summary_large_image"
        } else {
            "summary"
        };
        meta.push(MetaTag::name("twitter:card", card));
        meta.push(MetaTag::name(
            "twitter:creator",
            site.social.twitter.as_deref().unwrap_or_default(),
        ));
        meta.push(MetaTag::name("twitter:title", title));
        meta.push(MetaTag::name("twitter:description", description));

        Self {
            document_title,
            description: description.to_string(),
            image,
            meta,
        }
    }
}

/// Hero image built from a fluid descriptor
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeroImage {
    pub fluid: FluidImage,
    /// Reserves the image box before it loads, e.g. `56.25%`
    pub padding_bottom: String,
    pub alt: String,
}

impl HeroImage {
    pub fn new(fluid: &FluidImage, alt: &str) -> Self {
        let ratio = if fluid.aspect_ratio > 0.0 {
            fluid.aspect_ratio
        } else {
            1.0
        };
        Self {
            fluid: fluid.clone(),
            padding_bottom: format!("{}%", trim_float(100.0 / ratio)),
            alt: alt.to_string(),
        }
    }
}

fn trim_float(value: f64) -> String {
    let s = format!("{:.4}", value);
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Share links for one post
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShareButtons {
    /// Absolute URL being shared
    pub url: String,
    pub links: Vec<ShareLink>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShareLink {
    pub service: ShareService,
    pub label: &'static str,
    pub href: String,
}

impl ShareButtons {
    pub fn new(site: &SiteMetadata, slug: &str, title: &str) -> Self {
        let url = full_url_for(&site.site_url, &site.root, slug);
        let via = site.social.twitter.as_deref();
        let links = site
            .share_services
            .iter()
            .map(|&service| ShareLink {
                service,
                label: service.label(),
                href: service.share_url(&url, title, via),
            })
            .collect();
        Self { url, links }
    }
}

impl ShareService {
    pub fn label(self) -> &'static str {
        match self {
            ShareService::Twitter => "Twitter",
            ShareService::Facebook => "Facebook",
            ShareService::Pocket => "Pocket",
            ShareService::Hatena => "Hatena Bookmark",
            ShareService::Line => "LINE",
            ShareService::Linkedin => "LinkedIn",
        }
    }

    /// Share endpoint for `url`, with query values percent-encoded
    pub fn share_url(self, url: &str, title: &str, via: Option<&str>) -> String {
        let u = encode_url(url);
        let t = encode_url(title);
        match self {
            ShareService::Twitter => {
                let mut href = format!("https://twitter.com/intent/tweet?url={}&text={}", u, t);
                if let Some(via) = via.filter(|v| !v.is_empty()) {
                    href.push_str("&via=");
                    href.push_str(&encode_url(via));
                }
                href
            }
            ShareService::Facebook => format!("https://www.facebook.com/sharer/sharer.php?u={}", u),
            ShareService::Pocket => format!("https://getpocket.com/edit?url={}&title={}", u, t),
            ShareService::Hatena => format!(
                "https://b.hatena.ne.jp/add?mode=confirm&url={}&title={}",
                u, t
            ),
            ShareService::Line => format!("https://social-plugins.line.me/lineit/share?url={}", u),
            ShareService::Linkedin => format!(
                "https://www.linkedin.com/sharing/share-offsite/?url={}",
                u
            ),
        }
    }
}

/// Author bio
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bio {
    pub name: String,
    pub summary: String,
    pub twitter_url: Option<String>,
}

impl Bio {
    pub fn new(site: &SiteMetadata) -> Self {
        Self {
            name: site.author.name.clone(),
            summary: site.author.summary.clone(),
            twitter_url: site
                .social
                .twitter
                .as_deref()
                .filter(|t| !t.is_empty())
                .map(|t| format!("https://twitter.com/{}", t.trim_start_matches('@'))),
        }
    }
}

/// Link to a neighbouring page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavLink {
    pub href: String,
    pub text: String,
    pub rel: &'static str,
}
