//! Page rendering: the post page and the post listing
//!
//! Building a page is a pure function of its inputs and yields a serializable
//! view model; serializing that model to HTML goes through the embedded templates.

pub mod components;
mod index;

use anyhow::Result;
use serde::Serialize;
use tera::Context;

use crate::content::{AdjacentPostRef, PageContext, PostQuery};
use crate::helpers::url_for;
use crate::templates::TemplateRenderer;
use components::{Bio, HeroImage, Layout, NavLink, Seo, ShareButtons};

pub use index::{IndexEntry, IndexPage, IndexRenderer};

/// Document tree of a single post page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostPage {
    pub layout: Layout,
    pub seo: Seo,
    pub article: Article,
    /// Rendered in the article footer
    pub bio: Bio,
    pub nav: PostNav,
}

/// The `<article>` element
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Article {
    pub title: String,
    pub date: String,
    pub hero: Option<HeroImage>,
    /// Trusted markup, inserted verbatim
    pub html: String,
    pub share: ShareButtons,
}

/// Previous/next links. Missing sides still render an empty list item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostNav {
    pub previous: Option<NavLink>,
    pub next: Option<NavLink>,
}

#[derive(Debug, Clone, Copy)]
enum NavDirection {
    Previous,
    Next,
}

impl NavDirection {
    fn rel(self) -> &'static str {
        match self {
            NavDirection::Previous => "prev",
            NavDirection::Next => "next",
        }
    }

    fn label(self, title: &str) -> String {
        match self {
            NavDirection::Previous => format!("← {}", title),
            NavDirection::Next => format!("{} →", title),
        }
    }
}

/// Renders blog post pages
pub struct PostRenderer<'a> {
    templates: &'a TemplateRenderer,
}

impl<'a> PostRenderer<'a> {
    pub fn new(templates: &'a TemplateRenderer) -> Self {
        Self { templates }
    }

    /// Assemble the page tree for one post
    pub fn build(query: &PostQuery, context: &PageContext) -> PostPage {
        let site = &query.site;
        let post = &query.post;
        let fm = &post.frontmatter;

        let description = fm.description.as_deref().unwrap_or(&post.excerpt);
        let image_url = fm.image.as_ref().map(|image| image.public_url.as_str());

        let hero = fm
            .image
            .as_ref()
            .and_then(|image| image.fluid.as_ref())
            .map(|fluid| HeroImage::new(fluid, &fm.title));

        let nav_link = |adjacent: &Option<AdjacentPostRef>, direction: NavDirection| -> Option<NavLink> {
            let adjacent = adjacent.as_ref()?;
            let slug = adjacent.slug.as_deref().filter(|s| !s.is_empty())?;
            Some(NavLink {
                href: url_for(&site.root, slug),
                text: direction.label(&adjacent.title),
                rel: direction.rel(),
            })
        };

        PostPage {
            layout: Layout::new(site, &context.location),
            seo: Seo::new(site, &fm.title, description, image_url, "article"),
            article: Article {
                title: fm.title.clone(),
                date: fm.date.clone(),
                hero,
                html: post.html.clone(),
                share: ShareButtons::new(site, &post.fields.slug, &fm.title),
            },
            bio: Bio::new(site),
            nav: PostNav {
                previous: nav_link(&context.previous, NavDirection::Previous),
                next: nav_link(&context.next, NavDirection::Next),
            },
        }
    }

    /// Build and serialize a post page
    pub fn render(&self, query: &PostQuery, context: &PageContext) -> Result<String> {
        self.render_page(&Self::build(query, context))
    }

    /// Serialize an already built page tree
    pub fn render_page(&self, page: &PostPage) -> Result<String> {
        let mut context = Context::new();
        context.insert("page", page);
        self.templates.render("post.html", &context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::content::{
        FluidImage, Post, PostFields, PostFrontmatter, PostImage, SiteMetadata,
    };

    fn query(html: &str, description: Option<&str>, image: Option<PostImage>) -> PostQuery {
        let mut config = SiteConfig::default();
        config.title = "Site Title".to_string();
        config.url = "https://example.com".to_string();
        PostQuery {
            site: SiteMetadata::from_config(&config, 2024),
            post: Post {
                id: "1".to_string(),
                excerpt: "The excerpt text".to_string(),
                html: html.to_string(),
                fields: PostFields {
                    slug: "/current/".to_string(),
                },
                frontmatter: PostFrontmatter {
                    title: "Current Post".to_string(),
                    date: "2020-05-01".to_string(),
                    description: description.map(str::to_string),
                    category: Some("tech".to_string()),
                    image,
                },
            },
        }
    }

    fn fluid_image() -> PostImage {
        PostImage {
            public_url: "/static/abc/cover.png".to_string(),
            fluid: Some(FluidImage {
                aspect_ratio: 2.0,
                src: "/static/abc/800/cover.png".to_string(),
                src_set: "/static/abc/200/cover.png 200w,\n/static/abc/800/cover.png 800w"
                    .to_string(),
                sizes: "(max-width: 800px) 100vw, 800px".to_string(),
                base64: Some("data:image/png;base64,AAAA".to_string()),
            }),
        }
    }

    fn context(previous: Option<(&str, &str)>, next: Option<(&str, &str)>) -> PageContext {
        let to_ref = |(slug, title): (&str, &str)| AdjacentPostRef {
            slug: Some(slug.to_string()),
            title: title.to_string(),
        };
        PageContext {
            previous: previous.map(to_ref),
            next: next.map(to_ref),
            location: "/current/".to_string(),
        }
    }

    fn render(query: &PostQuery, context: &PageContext) -> String {
        let templates = TemplateRenderer::new().unwrap();
        PostRenderer::new(&templates).render(query, context).unwrap()
    }

    #[test]
    fn test_description_falls_back_to_excerpt() {
        let page = PostRenderer::build(&query("<p>hi</p>", None, None), &context(None, None));
        assert_eq!(page.seo.description, "The excerpt text");

        let html = render(&query("<p>hi</p>", None, None), &context(None, None));
        assert!(html.contains(r#"<meta name="description" content="The excerpt text">"#));
    }

    #[test]
    fn test_description_used_when_present() {
        let page = PostRenderer::build(
            &query("<p>hi</p>", Some("Own description"), None),
            &context(None, None),
        );
        assert_eq!(page.seo.description, "Own description");
    }

    #[test]
    fn test_empty_description_is_not_replaced_by_excerpt() {
        let mut q = query("<p>hi</p>", Some(""), None);
        q.site.description = "Site desc".to_string();
        let page = PostRenderer::build(&q, &context(None, None));
        assert_eq!(page.seo.description, "Site desc");
    }

    #[test]
    fn test_no_image_renders_no_image_element() {
        let page = PostRenderer::build(&query("<p>hi</p>", None, None), &context(None, None));
        assert!(page.article.hero.is_none());
        assert!(page.seo.image.is_none());

        let html = render(&query("<p>hi</p>", None, None), &context(None, None));
        assert!(!html.contains("<img"));
        assert!(!html.contains("gatsby-image-wrapper"));
        assert!(!html.contains("og:image"));
    }

    #[test]
    fn test_hero_image_uses_fluid_descriptor() {
        let q = query("<p>hi</p>", None, Some(fluid_image()));
        let page = PostRenderer::build(&q, &context(None, None));
        let hero = page.article.hero.as_ref().unwrap();
        assert_eq!(hero.fluid.src, "/static/abc/800/cover.png");
        assert_eq!(hero.padding_bottom, "50%");
        assert_eq!(
            page.seo.image.as_deref(),
            Some("https://example.com/static/abc/cover.png")
        );

        let html = render(&q, &context(None, None));
        assert!(html.contains(r#"src="/static/abc/800/cover.png""#));
        assert!(html.contains(r#"sizes="(max-width: 800px) 100vw, 800px""#));
        assert!(html.contains("/static/abc/200/cover.png 200w"));
        assert!(html.contains(r#"itemprop="image""#));
        assert!(html.contains("padding-bottom: 50%"));
        assert!(html.contains(
            r#"<meta property="og:image" content="https://example.com/static/abc/cover.png">"#
        ));
    }

    #[test]
    fn test_image_without_fluid_has_no_hero() {
        let image = PostImage {
            public_url: "/static/abc/logo.svg".to_string(),
            fluid: None,
        };
        let page = PostRenderer::build(
            &query("<p>hi</p>", None, Some(image)),
            &context(None, None),
        );
        assert!(page.article.hero.is_none());
        assert!(page.seo.image.is_some());
    }

    #[test]
    fn test_previous_absent_renders_empty_item() {
        let html = render(
            &query("<p>hi</p>", None, None),
            &context(None, Some(("/b/", "B"))),
        );
        assert!(html.contains(r#"<li></li>"#));
        assert!(!html.contains(r#"rel="prev""#));
    }

    #[test]
    fn test_previous_link() {
        let page = PostRenderer::build(
            &query("<p>hi</p>", None, None),
            &context(Some(("/a/", "A")), None),
        );
        let prev = page.nav.previous.as_ref().unwrap();
        assert_eq!(prev.href, "/a/");
        assert_eq!(prev.text, "← A");

        let html = render(
            &query("<p>hi</p>", None, None),
            &context(Some(("/a/", "A")), None),
        );
        assert!(html.contains(r#"<a href="/a/" rel="prev">← A</a>"#));
    }

    #[test]
    fn test_next_link() {
        let html = render(
            &query("<p>hi</p>", None, None),
            &context(None, Some(("/b/", "B"))),
        );
        assert!(html.contains(r#"<a href="/b/" rel="next">B →</a>"#));
    }

    #[test]
    fn test_both_absent_keeps_two_items() {
        let html = render(&query("<p>hi</p>", None, None), &context(None, None));
        assert_eq!(html.matches("<li></li>").count(), 2);
    }

    #[test]
    fn test_adjacent_without_slug_is_not_linked() {
        let ctx = PageContext {
            previous: Some(AdjacentPostRef {
                slug: None,
                title: "Nowhere".to_string(),
            }),
            next: None,
            location: "/current/".to_string(),
        };
        let page = PostRenderer::build(&query("<p>hi</p>", None, None), &ctx);
        assert!(page.nav.previous.is_none());
    }

    #[test]
    fn test_adjacent_with_empty_slug_is_not_linked() {
        let ctx = context(Some(("", "Blank")), Some(("", "Blank")));
        let page = PostRenderer::build(&query("<p>hi</p>", None, None), &ctx);
        assert!(page.nav.previous.is_none());
        assert!(page.nav.next.is_none());

        let html = render(&query("<p>hi</p>", None, None), &ctx);
        assert_eq!(html.matches("<li></li>").count(), 2);
    }

    #[test]
    fn test_body_inserted_verbatim() {
        let html = render(&query("<p>hi</p>", None, None), &context(None, None));
        assert!(html.contains(r#"<section itemprop="articleBody"><p>hi</p></section>"#));
    }

    #[test]
    fn test_article_and_site_parts() {
        let html = render(&query("<p>hi</p>", None, None), &context(None, None));
        assert!(html.contains("<title>Current Post | Site Title</title>"));
        assert!(html.contains(r#"<h1 itemprop="headline">Current Post</h1>"#));
        assert!(html.contains("<p>2020-05-01</p>"));
        assert!(html.contains(r#"itemtype="https://schema.org/BlogPosting""#));
        assert!(html.contains("https://twitter.com/intent/tweet?url=https%3A%2F%2Fexample%2Ecom%2Fcurrent%2F"));
        assert!(html.contains("Written by <strong>John Doe</strong>"));
        assert!(html.contains(r#"class="header-link-home""#));
        assert!(html.contains("© 2024"));
    }

    #[test]
    fn test_titles_are_escaped() {
        let mut q = query("<p>hi</p>", None, None);
        q.post.frontmatter.title = "Tom & <Jerry>".to_string();
        let html = render(&q, &context(None, None));
        assert!(html.contains("Tom &amp; &lt;Jerry&gt;"));
        assert!(!html.contains("<Jerry>"));
    }

    #[test]
    fn test_build_does_not_touch_input() {
        let q = query("<p>hi</p>", None, Some(fluid_image()));
        let ctx = context(Some(("/a/", "A")), Some(("/b/", "B")));
        let before = (q.clone(), ctx.clone());
        let first = PostRenderer::build(&q, &ctx);
        let second = PostRenderer::build(&q, &ctx);
        assert_eq!(first, second);
        assert_eq!(before, (q, ctx));
    }
}
