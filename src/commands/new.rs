//! Create a new post

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use crate::Site;

/// Scaffold `<content_dir>/<slug>/index.md` and return its path
pub fn create_post(site: &Site, title: &str) -> Result<PathBuf> {
    let slug = slug::slugify(title);
    if slug.is_empty() {
        anyhow::bail!("Cannot derive a slug from title {:?}", title);
    }

    let post_dir = site.content_dir.join(&slug);
    let file_path = post_dir.join("index.md");

    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    fs::create_dir_all(&post_dir)?;

    let now = chrono::Local::now();
    let content = format!(
        "---\ntitle: {}\ndate: {}\ndescription:\n---\n",
        yaml_string(title),
        now.format("%Y-%m-%d %H:%M:%S")
    );
    fs::write(&file_path, content)?;

    tracing::info!("Created: {:?}", file_path);

    Ok(file_path)
}

/// Quote a scalar so titles with `:` or `#` stay valid YAML
fn yaml_string(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}
