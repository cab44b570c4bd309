//! Post index: ordering, slug lookup and adjacent-post resolution

use anyhow::{bail, Result};
use std::collections::HashMap;

use super::post::{AdjacentPostRef, PageContext, PostEntry, PostQuery, SiteMetadata};

/// All published posts, newest first
pub struct PostIndex {
    site: SiteMetadata,
    entries: Vec<PostEntry>,
    by_slug: HashMap<String, usize>,
}

impl PostIndex {
    /// Build the index. Fails if two posts resolve to the same slug, or if a
    /// post would take the site root, which belongs to the post listing.
    pub fn new(site: SiteMetadata, mut entries: Vec<PostEntry>) -> Result<Self> {
        sort_newest_first(&mut entries);

        let mut by_slug = HashMap::with_capacity(entries.len());
        for (i, entry) in entries.iter().enumerate() {
            let slug = &entry.post.fields.slug;
            if slug.trim_matches('/').is_empty() {
                bail!(
                    "Post {:?} resolves to the site root; move it into its own directory",
                    entry.source
                );
            }
            if let Some(&other) = by_slug.get(slug) {
                let other: &PostEntry = &entries[other];
                bail!(
                    "Duplicate slug {} for {:?} and {:?}",
                    slug,
                    other.source,
                    entry.source
                );
            }
            by_slug.insert(slug.clone(), i);
        }

        Ok(Self {
            site,
            entries,
            by_slug,
        })
    }

    pub fn site(&self) -> &SiteMetadata {
        &self.site
    }

    /// Posts in display order (newest first)
    pub fn posts(&self) -> &[PostEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve the post page query for a slug
    pub fn query(&self, slug: &str) -> Option<PostQuery> {
        let &i = self.by_slug.get(slug)?;
        Some(PostQuery {
            site: self.site.clone(),
            post: self.entries[i].post.clone(),
        })
    }

    /// Page context for a slug: `previous` is the older post, `next` the newer one
    pub fn context_for(&self, slug: &str) -> Option<PageContext> {
        let &i = self.by_slug.get(slug)?;

        let previous = self
            .entries
            .get(i + 1)
            .map(|e| AdjacentPostRef::from_post(&e.post));
        let next = i
            .checked_sub(1)
            .and_then(|j| self.entries.get(j))
            .map(|e| AdjacentPostRef::from_post(&e.post));

        Some(PageContext {
            previous,
            next,
            location: crate::helpers::url_for(&self.site.root, slug),
        })
    }
}

/// Newest first, ties broken by slug
pub(crate) fn sort_newest_first(entries: &mut [PostEntry]) {
    entries.sort_by(|a, b| {
        b.published
            .cmp(&a.published)
            .then_with(|| a.post.fields.slug.cmp(&b.post.fields.slug))
    });
}
