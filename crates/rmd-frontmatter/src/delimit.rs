//! Locating the front matter block in document text
//!
//! These helpers only find and rebuild the `---` delimited block. The YAML
//! inside is handed over as raw text.

use crate::front_matter::FRONTMATTER_SEPARATOR;

/// Front matter text and the document body that follows it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrontMatterBlock<'a> {
    /// Raw YAML between the delimiter lines, including its final newline
    pub yaml: &'a str,
    /// Everything after the closing delimiter line
    pub body: &'a str,
}

/// Split a document into its front matter block and body
///
/// The document must start with a `---` line. The block ends at the next line
/// that is `---` or `...`; trailing whitespace and CRLF endings are allowed on
/// both delimiter lines. Returns `None` when there is no opening line or the
/// block is never closed.
pub fn split_front_matter(document: &str) -> Option<FrontMatterBlock<'_>> {
    let mut lines = document.split_inclusive('\n');
    let opening = lines.next()?;
    if !opening.ends_with('\n') || opening.trim_end() != "---" {
        return None;
    }

    let rest = &document[opening.len()..];
    let mut offset = 0;
    for line in lines {
        let marker = line.trim_end();
        if marker == "---" || marker == "..." {
            return Some(FrontMatterBlock {
                yaml: &rest[..offset],
                body: &rest[offset + line.len()..],
            });
        }
        offset += line.len();
    }
    None
}

/// Wrap `yaml` in delimiter lines and prepend it to `body`
pub fn join_front_matter(yaml: &str, body: &str) -> String {
    let mut document =
        String::with_capacity(yaml.len() + body.len() + 2 * FRONTMATTER_SEPARATOR.len() + 1);
    document.push_str(FRONTMATTER_SEPARATOR);
    document.push_str(yaml);
    if !yaml.is_empty() && !yaml.ends_with('\n') {
        document.push('\n');
    }
    document.push_str(FRONTMATTER_SEPARATOR);
    document.push_str(body);
    document
}
