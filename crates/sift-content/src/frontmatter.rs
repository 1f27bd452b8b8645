//! Frontmatter extraction and the content schema.
//!
//! Entries start with a YAML block fenced by `---` lines:
//!
//! ```text
//! ---
//! title: Endomidface Guide
//! tags: [Surgery, Face]
//! date: 2024-05-01
//! ---
//! Body markdown...
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sift_core::{Error, Result};

const FENCE: &str = "---";

/// Frontmatter fields recognised by the blog collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frontmatter {
    /// Entry title. Required and non-empty.
    pub title: String,

    /// Short summary used in listings and meta tags.
    #[serde(default)]
    pub description: Option<String>,

    /// Free-form tags. Blank tags are rejected.
    #[serde(default)]
    pub tags: Vec<String>,

    /// Listing category (e.g. "face", "recovery").
    #[serde(default)]
    pub category: Option<String>,

    /// Locale code; overrides the directory-derived locale.
    #[serde(default)]
    pub locale: Option<String>,

    /// Publication date, `YYYY-MM-DD`.
    #[serde(default)]
    pub date: Option<NaiveDate>,

    /// Drafts are skipped unless explicitly requested.
    #[serde(default)]
    pub draft: bool,

    /// Slug override; defaults to the file name.
    #[serde(default)]
    pub slug: Option<String>,
}

impl Frontmatter {
    /// Parse and validate a YAML frontmatter block.
    pub fn parse(yaml: &str) -> Result<Self> {
        let frontmatter: Self = serde_yaml::from_str(yaml)
            .map_err(|e| Error::parse(format!("invalid frontmatter: {e}")))?;
        frontmatter.validate()?;
        Ok(frontmatter)
    }

    fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(Error::parse("title must not be empty"));
        }
        if self.tags.iter().any(|t| t.trim().is_empty()) {
            return Err(Error::parse("tags must not contain empty strings"));
        }
        Ok(())
    }
}

/// Split a document into its frontmatter block (if any) and body.
///
/// Returns `(None, content)` when the document does not open with a fence.
///
/// # Errors
///
/// Returns a parse error when the opening fence is never closed.
pub fn extract_frontmatter(content: &str) -> Result<(Option<&str>, &str)> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    let Some(after_open) = strip_fence_line(content) else {
        return Ok((None, content));
    };

    let mut offset = 0;
    for line in after_open.split_inclusive('\n') {
        if line.trim_end() == FENCE {
            let yaml = &after_open[..offset];
            let body = &after_open[offset + line.len()..];
            return Ok((Some(yaml), body));
        }
        offset += line.len();
    }

    Err(Error::parse("frontmatter block is not closed"))
}

/// If `content` opens with a fence line, return what follows it.
fn strip_fence_line(content: &str) -> Option<&str> {
    let rest = content.strip_prefix(FENCE)?;
    let rest = rest.trim_start_matches([' ', '\t']);
    rest.strip_prefix("\r\n").or_else(|| rest.strip_prefix('\n'))
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = "---\ntitle: Endomidface Guide\ntags: [Surgery, Face]\ndate: 2024-05-01\n---\n# Heading\nBody text.\n";

    #[test]
    fn test_extract_basic() {
        let (yaml, body) = extract_frontmatter(DOC).unwrap();
        assert!(yaml.unwrap().contains("title: Endomidface Guide"));
        assert_eq!(body, "# Heading\nBody text.\n");
    }

    #[test]
    fn test_extract_crlf() {
        let doc = "---\r\ntitle: Browlift\r\n---\r\nBody\r\n";
        let (yaml, body) = extract_frontmatter(doc).unwrap();
        assert_eq!(yaml.unwrap().trim_end(), "title: Browlift");
        assert_eq!(body, "Body\r\n");
    }

    #[test]
    fn test_extract_bom() {
        let doc = "\u{feff}---\ntitle: X\n---\nbody";
        let (yaml, body) = extract_frontmatter(doc).unwrap();
        assert!(yaml.is_some());
        assert_eq!(body, "body");
    }

    #[test]
    fn test_extract_no_frontmatter() {
        let (yaml, body) = extract_frontmatter("# Just markdown\n").unwrap();
        assert!(yaml.is_none());
        assert_eq!(body, "# Just markdown\n");
    }

    #[test]
    fn test_extract_horizontal_rule_is_not_a_fence() {
        let (yaml, _) = extract_frontmatter("----\ntitle: x\n").unwrap();
        assert!(yaml.is_none());
    }

    #[test]
    fn test_extract_unclosed() {
        let err = extract_frontmatter("---\ntitle: X\nno close").unwrap_err();
        assert!(err.to_string().contains("not closed"));
    }

    #[test]
    fn test_extract_empty_block_at_eof() {
        let (yaml, body) = extract_frontmatter("---\n---").unwrap();
        assert_eq!(yaml, Some(""));
        assert_eq!(body, "");
    }

    #[test]
    fn test_parse_full() {
        let (yaml, _) = extract_frontmatter(DOC).unwrap();
        let fm = Frontmatter::parse(yaml.unwrap()).unwrap();
        assert_eq!(fm.title, "Endomidface Guide");
        assert_eq!(fm.tags, vec!["Surgery", "Face"]);
        assert_eq!(fm.date, NaiveDate::from_ymd_opt(2024, 5, 1));
        assert!(!fm.draft);
        assert!(fm.description.is_none());
    }

    #[test]
    fn test_parse_missing_title() {
        let err = Frontmatter::parse("description: no title here").unwrap_err();
        assert!(err.to_string().contains("title"));
    }

    #[test]
    fn test_parse_blank_title() {
        let err = Frontmatter::parse("title: '   '").unwrap_err();
        assert!(err.to_string().contains("title must not be empty"));
    }

    #[test]
    fn test_parse_bad_date() {
        assert!(Frontmatter::parse("title: X\ndate: 01/05/2024").is_err());
    }

    #[test]
    fn test_parse_tags_wrong_type() {
        assert!(Frontmatter::parse("title: X\ntags: 7").is_err());
    }

    #[test]
    fn test_parse_empty_tag() {
        let err = Frontmatter::parse("title: X\ntags: [Face, '']").unwrap_err();
        assert!(err.to_string().contains("tags"));
    }
}
