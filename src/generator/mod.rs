//! Generator module - writes post pages, the home page and page data

use anyhow::{anyhow, Result};
use std::fs;
use std::path::PathBuf;

use walkdir::WalkDir;

use crate::content::loader::is_markdown_file;
use crate::content::{PageContext, PostIndex, PostQuery};
use crate::render::{IndexRenderer, PostRenderer};
use crate::templates::TemplateRenderer;
use crate::Site;

/// Static site generator using the embedded templates
pub struct Generator {
    site: Site,
    templates: TemplateRenderer,
}

impl Generator {
    /// Create a new generator
    pub fn new(site: &Site) -> Result<Self> {
        Ok(Self {
            site: site.clone(),
            templates: TemplateRenderer::new()?,
        })
    }

    /// Generate the entire site
    pub fn generate(&self, index: &PostIndex) -> Result<()> {
        fs::create_dir_all(&self.site.public_dir)?;

        // Images and other files next to the posts keep their relative links working
        self.copy_content_assets()?;

        self.generate_post_pages(index)?;
        self.generate_index_page(index)?;

        Ok(())
    }

    /// Render one page per post
    fn generate_post_pages(&self, index: &PostIndex) -> Result<()> {
        let renderer = PostRenderer::new(&self.templates);

        for entry in index.posts() {
            let slug = &entry.post.fields.slug;
            let query = index
                .query(slug)
                .ok_or_else(|| anyhow!("No post found for slug {}", slug))?;
            let context = index
                .context_for(slug)
                .ok_or_else(|| anyhow!("No page context for slug {}", slug))?;

            let html = renderer
                .render(&query, &context)
                .map_err(|e| anyhow!("Failed to render {:?}: {}", entry.source, e))?;

            let output_path = self.write_page(slug, &html)?;
            self.write_page_data(slug, &query, &context)?;
            tracing::debug!("Generated post: {:?}", output_path);
        }

        tracing::info!("Generated {} post pages", index.len());
        Ok(())
    }

    /// Render the home page listing
    fn generate_index_page(&self, index: &PostIndex) -> Result<()> {
        let html = IndexRenderer::new(&self.templates).render(index)?;
        let output_path = self.write_page("/", &html)?;
        tracing::debug!("Generated index: {:?}", output_path);
        Ok(())
    }

    /// Write `html` to `<public>/<route>/index.html`
    fn write_page(&self, route: &str, html: &str) -> Result<PathBuf> {
        // Strip leading slash from route to avoid creating absolute paths
        let clean_path = route.trim_matches('/');
        let output_path = self.site.public_dir.join(clean_path).join("index.html");
        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| anyhow!("Failed to create dir {:?}: {}", parent, e))?;
        }
        fs::write(&output_path, html)
            .map_err(|e| anyhow!("Failed to write {:?}: {}", output_path, e))?;
        Ok(output_path)
    }

    /// Write the query result and page context as `page-data/<slug>/page-data.json`
    fn write_page_data(&self, slug: &str, query: &PostQuery, context: &PageContext) -> Result<()> {
        let output_path = self
            .site
            .public_dir
            .join("page-data")
            .join(slug.trim_matches('/'))
            .join("page-data.json");
        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let data = serde_json::json!({
            "path": context.location,
            "result": {
                "data": query,
                "pageContext": context,
            },
        });
        fs::write(&output_path, serde_json::to_string_pretty(&data)?)?;
        Ok(())
    }

    /// Copy non-markdown files from the content directory
    fn copy_content_assets(&self) -> Result<()> {
        let content_dir = &self.site.content_dir;
        if !content_dir.exists() {
            return Ok(());
        }

        for entry in WalkDir::new(content_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();

            if path.is_file() && !is_markdown_file(path) {
                let relative = path.strip_prefix(content_dir)?;
                let dest = self.site.public_dir.join(relative);

                if let Some(parent) = dest.parent() {
                    fs::create_dir_all(parent)?;
                }

                fs::copy(path, &dest)?;
                tracing::debug!("Copied asset {:?}", relative);
            }
        }

        Ok(())
    }
}
