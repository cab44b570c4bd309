//! List site content

use anyhow::Result;
use std::collections::BTreeMap;

use crate::content::loader::ContentLoader;
use crate::content::PostEntry;
use crate::Site;

/// List site content by type
pub fn run(site: &Site, content_type: &str) -> Result<()> {
    let posts = ContentLoader::new(site).load_posts()?;

    match content_type {
        "post" | "posts" => {
            println!("Posts ({}):", posts.len());
            for entry in &posts {
                let post = &entry.post;
                println!(
                    "  {} - {} [{}]",
                    entry.published.format("%Y-%m-%d"),
                    post.frontmatter.title,
                    post.fields.slug
                );
            }
        }
        "category" | "categories" => {
            let categories = count_categories(&posts);
            println!("Categories ({}):", categories.len());
            for (category, count) in categories {
                println!("  {} ({})", category, count);
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, category",
                content_type
            );
        }
    }

    Ok(())
}

/// Post count per category, most used first
fn count_categories(posts: &[PostEntry]) -> Vec<(String, usize)> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for entry in posts {
        if let Some(category) = &entry.post.frontmatter.category {
            *counts.entry(category.clone()).or_insert(0) += 1;
        }
    }
    let mut counts: Vec<_> = counts.into_iter().collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}
