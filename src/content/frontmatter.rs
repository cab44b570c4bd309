//! Front-matter parsing
//!
//! A post may open with a fenced metadata block: YAML between `---` lines, or
//! JSON between `;;;` lines. Anything else is body.

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Front-matter data from a post
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub date: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    /// Hero image, relative to the post file
    pub image: Option<String>,
    pub draft: bool,

    /// Fields this generator does not use
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Fence {
    Yaml,
    Json,
}

impl Fence {
    fn marker(self) -> &'static str {
        match self {
            Fence::Yaml => "---",
            Fence::Json => ";;;",
        }
    }
}

impl FrontMatter {
    /// Split `content` into front matter and body.
    ///
    /// Content without an opening fence is all body. An unterminated block or
    /// a block that does not deserialize is an error.
    pub fn parse(content: &str) -> Result<(Self, &str)> {
        let content = content.trim_start_matches('\u{feff}');

        let Some((fence, block, body)) = split_block(content)? else {
            return Ok((Self::default(), content));
        };

        if block.trim().is_empty() {
            return Ok((Self::default(), body));
        }

        let fm = match fence {
            Fence::Yaml => serde_yaml::from_str(block).context("Invalid YAML front matter")?,
            Fence::Json => serde_json::from_str(block).context("Invalid JSON front matter")?,
        };
        Ok((fm, body))
    }

    /// Publication date, read in local time when it carries no offset
    pub fn parse_date(&self) -> Option<DateTime<Local>> {
        self.date.as_deref().and_then(parse_date)
    }
}

/// Returns the fence kind, the block between the fences and the body after it
fn split_block(content: &str) -> Result<Option<(Fence, &str, &str)>> {
    let fence = if content.starts_with(Fence::Yaml.marker()) {
        Fence::Yaml
    } else if content.starts_with(Fence::Json.marker()) {
        Fence::Json
    } else {
        return Ok(None);
    };

    let mut lines = content.split_inclusive('\n');
    match lines.next() {
        Some(first) if first.trim_end() == fence.marker() => {}
        // `----` or `--- text` is markdown, not a fence
        _ => return Ok(None),
    }

    let block_start = content.find('\n').map(|i| i + 1).unwrap_or(content.len());
    let mut offset = block_start;
    for line in lines {
        if line.trim_end() == fence.marker() {
            let block = &content[block_start..offset];
            let body = &content[offset + line.len()..];
            return Ok(Some((fence, block, body.trim_start_matches(['\n', '\r']))));
        }
        offset += line.len();
    }

    bail!("Front matter opened with `{}` is never closed", fence.marker())
}

const DATETIME_FORMATS: [&str; 6] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
];

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];

fn parse_date(s: &str) -> Option<DateTime<Local>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Local));
    }

    let naive = DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })?;

    Local.from_local_datetime(&naive).earliest()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_yaml_frontmatter() {
        let content = r#"---
title: Hello World
date: 2024-01-15 10:30:00
description: A first post
category: rust
image: ./cover.png
---

This is the content.
"#;

        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title.as_deref(), Some("Hello World"));
        assert_eq!(fm.description.as_deref(), Some("A first post"));
        assert_eq!(fm.category.as_deref(), Some("rust"));
        assert_eq!(fm.image.as_deref(), Some("./cover.png"));
        assert!(!fm.draft);
        assert_eq!(body, "This is the content.\n");
    }

    #[test]
    fn test_parse_json_frontmatter() {
        let content = ";;;\n{\"title\": \"Test Post\", \"draft\": true}\n;;;\nThis is content.\n";

        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title.as_deref(), Some("Test Post"));
        assert!(fm.draft);
        assert_eq!(body, "This is content.\n");
    }

    #[test]
    fn test_no_frontmatter() {
        let (fm, body) = FrontMatter::parse("# Heading\n\ntext\n").unwrap();
        assert!(fm.title.is_none());
        assert_eq!(body, "# Heading\n\ntext\n");

        // A thematic break is not a fence
        let (_, body) = FrontMatter::parse("----\ntext\n").unwrap();
        assert_eq!(body, "----\ntext\n");
    }

    #[test]
    fn test_empty_block() {
        let (fm, body) = FrontMatter::parse("---\n---\nbody\n").unwrap();
        assert!(fm.title.is_none());
        assert_eq!(body, "body\n");
    }

    #[test]
    fn test_crlf_fences() {
        let (fm, body) = FrontMatter::parse("---\r\ntitle: T\r\n---\r\nbody\r\n").unwrap();
        assert_eq!(fm.title.as_deref(), Some("T"));
        assert_eq!(body, "body\r\n");
    }

    #[test]
    fn test_malformed_yaml_is_an_error() {
        let err = FrontMatter::parse("---\ntitle: [unclosed\n---\nbody\n").unwrap_err();
        assert!(err.to_string().contains("YAML"));
    }

    #[test]
    fn test_unclosed_block_is_an_error() {
        assert!(FrontMatter::parse("---\ntitle: T\nbody\n").is_err());
    }

    #[test]
    fn test_extra_fields_kept() {
        let content = "---\ntitle: T\nauthor_note: hi\n---\nbody\n";
        let (fm, _) = FrontMatter::parse(content).unwrap();
        assert!(fm.extra.contains_key("author_note"));
    }

    #[test]
    fn test_parse_date_forms() {
        let date = |s: &str| {
            FrontMatter {
                date: Some(s.to_string()),
                ..Default::default()
            }
            .parse_date()
            .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
        };

        assert_eq!(date("2024-01-15 10:30:00").as_deref(), Some("2024-01-15 10:30"));
        assert_eq!(date("2024/01/15 10:30").as_deref(), Some("2024-01-15 10:30"));
        assert_eq!(date("2020-05-01").as_deref(), Some("2020-05-01 00:00"));
        assert!(date("2020-05-01T08:00:00+00:00").is_some());
        assert_eq!(date("yesterday"), None);
    }
}
