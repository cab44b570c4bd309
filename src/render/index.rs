//! The home page listing every post

use anyhow::Result;
use serde::Serialize;
use tera::Context;

use super::components::{Bio, Layout, Seo};
use crate::content::PostIndex;
use crate::helpers::url_for;
use crate::templates::TemplateRenderer;

/// Document tree of the post listing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexPage {
    pub layout: Layout,
    pub seo: Seo,
    pub bio: Bio,
    pub posts: Vec<IndexEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexEntry {
    /// Post title, or its slug when the title is empty
    pub title: String,
    pub href: String,
    pub date: String,
    /// Description, or the excerpt when there is none
    pub summary: String,
}

/// Renders the home page
pub struct IndexRenderer<'a> {
    templates: &'a TemplateRenderer,
}

impl<'a> IndexRenderer<'a> {
    pub fn new(templates: &'a TemplateRenderer) -> Self {
        Self { templates }
    }

    pub fn build(index: &PostIndex) -> IndexPage {
        let site = index.site();
        let location = url_for(&site.root, "");

        let posts = index
            .posts()
            .iter()
            .map(|entry| {
                let post = &entry.post;
                let fm = &post.frontmatter;
                IndexEntry {
                    title: if fm.title.is_empty() {
                        post.fields.slug.clone()
                    } else {
                        fm.title.clone()
                    },
                    href: url_for(&site.root, &post.fields.slug),
                    date: fm.date.clone(),
                    summary: fm
                        .description
                        .clone()
                        .unwrap_or_else(|| post.excerpt.clone()),
                }
            })
            .collect();

        IndexPage {
            layout: Layout::new(site, &location),
            seo: Seo::new(site, "All posts", "", None, "website"),
            bio: Bio::new(site),
            posts,
        }
    }

    pub fn render(&self, index: &PostIndex) -> Result<String> {
        let mut context = Context::new();
        context.insert("page", &Self::build(index));
        self.templates.render("index.html", &context)
    }
}
