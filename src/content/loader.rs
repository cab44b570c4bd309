//! Content loader - loads posts from the content directory

use anyhow::Result;
use chrono::{Datelike, Local};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use super::excerpt::excerpt;
use super::index::sort_newest_first;
use super::{
    FrontMatter, MarkdownRenderer, Post, PostEntry, PostFields, PostFrontmatter, PostImage,
    PostIndex, SiteMetadata,
};
use crate::helpers::format_date;
use crate::images::ImageProcessor;
use crate::Site;

/// Loads posts from the content directory
pub struct ContentLoader<'a> {
    site: &'a Site,
    renderer: MarkdownRenderer,
    images: Option<ImageProcessor>,
}

impl<'a> ContentLoader<'a> {
    /// Create a loader that leaves hero images unresolved
    pub fn new(site: &'a Site) -> Self {
        let renderer = MarkdownRenderer::from_config(&site.config.highlight);
        Self {
            site,
            renderer,
            images: None,
        }
    }

    /// Also publish hero images into the public directory while loading
    pub fn with_images(mut self) -> Self {
        self.images = Some(ImageProcessor::new(
            &self.site.public_dir,
            &self.site.config.root,
            self.site.config.images.clone(),
        ));
        self
    }

    /// Load all posts and build the index
    pub fn load_index(&self) -> Result<PostIndex> {
        let site = SiteMetadata::from_config(&self.site.config, Local::now().year());
        PostIndex::new(site, self.load_posts()?)
    }

    /// Load all posts from the content directory
    pub fn load_posts(&self) -> Result<Vec<PostEntry>> {
        let content_dir = &self.site.content_dir;
        if !content_dir.exists() {
            tracing::warn!("Content directory {:?} does not exist", content_dir);
            return Ok(Vec::new());
        }

        let mut posts = Vec::new();

        for entry in WalkDir::new(content_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if path.is_file() && is_markdown_file(path) {
                match self.load_post(path) {
                    Ok(Some(post)) => posts.push(post),
                    Ok(None) => tracing::debug!("Skipping draft {:?}", path),
                    Err(e) => {
                        tracing::warn!("Failed to load post {:?}: {:#}", path, e);
                    }
                }
            }
        }

        sort_newest_first(&mut posts);

        Ok(posts)
    }

    /// Load a single post. Returns `None` for drafts when drafts are not rendered.
    fn load_post(&self, path: &Path) -> Result<Option<PostEntry>> {
        let content = fs::read_to_string(path)?;
        let (fm, body) = FrontMatter::parse(&content)?;

        if fm.draft && !self.site.config.render_drafts {
            return Ok(None);
        }

        let file_modified = fs::metadata(path)?
            .modified()
            .ok()
            .map(chrono::DateTime::<Local>::from);

        let published = fm
            .parse_date()
            .unwrap_or_else(|| file_modified.unwrap_or_else(Local::now));

        let slug = slug_for(&self.site.content_dir, path);

        let (excerpt_md, full_md) = MarkdownRenderer::split_excerpt(body);
        let html = self.renderer.render(&full_md)?;
        let excerpt = excerpt(
            excerpt_md.unwrap_or(body),
            self.site.config.excerpt_length,
        );

        let image = fm
            .image
            .as_deref()
            .and_then(|image| self.resolve_image(path, image));

        let post = Post {
            id: post_id(&self.site.content_dir, path),
            excerpt,
            html,
            fields: PostFields { slug },
            frontmatter: PostFrontmatter {
                title: fm.title.unwrap_or_default(),
                date: format_date(&published, &self.site.config.date_format),
                description: fm.description,
                category: fm.category,
                image,
            },
        };

        Ok(Some(PostEntry {
            post,
            published,
            source: path.to_path_buf(),
        }))
    }

    /// Resolve a front-matter image path relative to the post file.
    /// Failures degrade to a post without a hero image.
    fn resolve_image(&self, post_path: &Path, image: &str) -> Option<PostImage> {
        let processor = self.images.as_ref()?;
        let source = post_path.parent().unwrap_or(Path::new("")).join(image);

        match processor.process(&source) {
            Ok(image) => Some(image),
            Err(e) => {
                tracing::warn!("Skipping hero image for {:?}: {}", post_path, e);
                None
            }
        }
    }
}

/// Route path of a post, from its location under the content directory.
///
/// `hello-world/index.md` maps to `/hello-world/`, `notes/foo.md` to `/notes/foo/`.
pub fn slug_for(content_dir: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(content_dir).unwrap_or(path);
    let relative = relative.with_extension("");

    let mut parts: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().to_string())
        .collect();

    if parts.last().map(|p| p == "index").unwrap_or(false) {
        parts.pop();
    }

    if parts.is_empty() {
        "/".to_string()
    } else {
        format!("/{}/", parts.join("/"))
    }
}

/// Stable id from the source path relative to the content directory
fn post_id(content_dir: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(content_dir).unwrap_or(path);
    let relative = relative.to_string_lossy().replace('\\', "/");
    blake3::hash(relative.as_bytes()).to_hex()[..16].to_string()
}

/// Check if a file is a markdown file
pub fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}
