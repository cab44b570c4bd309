//! Content module - front-matter, markdown, excerpts and the post index

pub mod excerpt;
mod frontmatter;
pub(crate) mod index;
pub mod loader;
mod markdown;
mod post;

pub use frontmatter::FrontMatter;
pub use index::PostIndex;
pub use markdown::{MarkdownRenderer, EXCERPT_SEPARATOR};
pub use post::{
    AdjacentPostRef, Author, FluidImage, PageContext, Post, PostEntry, PostFields,
    PostFrontmatter, PostImage, PostQuery, SiteMetadata, Social,
};
