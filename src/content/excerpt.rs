//! Plain-text excerpts for SEO descriptions and post listings

use pulldown_cmark::{Event, Parser, TagEnd};

use super::markdown::MarkdownRenderer;

/// Appended to an excerpt that had to be shortened
pub const ELLIPSIS: char = '…';

/// Build the plain-text excerpt of a markdown source, pruned to `length` characters.
pub fn excerpt(markdown: &str, length: usize) -> String {
    prune(&plain_text(markdown), length)
}

/// Extract the visible text of a markdown document with whitespace collapsed.
///
/// Raw HTML is dropped, block boundaries become single spaces.
pub fn plain_text(markdown: &str) -> String {
    let mut text = String::with_capacity(markdown.len());

    for event in Parser::new_ext(markdown, MarkdownRenderer::options()) {
        match event {
            Event::Text(t) | Event::Code(t) => text.push_str(&t),
            Event::SoftBreak | Event::HardBreak => text.push(' '),
            Event::End(
                TagEnd::Paragraph
                | TagEnd::Heading(_)
                | TagEnd::Item
                | TagEnd::CodeBlock
                | TagEnd::TableCell,
            ) => text.push(' '),
            _ => {}
        }
    }

    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Shorten `text` to at most `length` characters without splitting a word,
/// then append an ellipsis. Text that already fits is returned unchanged.
pub fn prune(text: &str, length: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= length {
        return text.to_string();
    }
    if length == 0 {
        return ELLIPSIS.to_string();
    }

    let is_word = |c: char| c.is_alphanumeric() || c == '_';

    // Back up to the start of a word the cut would split
    let mut cut = length;
    if is_word(chars[length - 1]) && is_word(chars[length]) {
        while cut > 0 && is_word(chars[cut - 1]) {
            cut -= 1;
        }
    }

    let kept: String = chars[..cut].iter().collect();
    let kept = kept.trim_end_matches(|c: char| c.is_whitespace() || c.is_ascii_punctuation());

    // A single word longer than the limit gets a hard cut
    if kept.is_empty() {
        let hard: String = chars[..length].iter().collect();
        return format!("{}{}", hard, ELLIPSIS);
    }

    format!("{}{}", kept, ELLIPSIS)
}
