//! Built-in blog templates using the Tera template engine
//!
//! All templates are embedded directly in the binary.

use anyhow::Result;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::helpers::html_escape;

/// Template renderer with the embedded blog templates
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        // Tera's autoescape also escapes `/`, which mangles URLs. Values are
        // escaped explicitly with `escape_html` instead, and post bodies are
        // trusted markup.
        tera.autoescape_on(vec![]);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("blog/layout.html")),
            ("post.html", include_str!("blog/post.html")),
            ("index.html", include_str!("blog/index.html")),
            // Partials
            ("partials/seo.html", include_str!("blog/partials/seo.html")),
            ("partials/bio.html", include_str!("blog/partials/bio.html")),
            (
                "partials/share_buttons.html",
                include_str!("blog/partials/share_buttons.html"),
            ),
            (
                "partials/fluid_image.html",
                include_str!("blog/partials/fluid_image.html"),
            ),
            (
                "partials/post_nav.html",
                include_str!("blog/partials/post_nav.html"),
            ),
        ])?;

        tera.register_filter("escape_html", escape_html_filter);

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// Tera filter: escape HTML special characters, leaving `/` intact
fn escape_html_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("escape_html", "value", String, value);
    Ok(tera::Value::String(html_escape(&s)))
}
