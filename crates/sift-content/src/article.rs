//! A validated content entry.

use std::path::{Component, Path, PathBuf};

use chrono::NaiveDate;
use serde::Serialize;
use sift_core::{Error, Result, normalize_slug, slug_from_path};
use sift_filter::{FieldValue, Searchable};

use crate::frontmatter::{Frontmatter, extract_frontmatter};
use crate::locale::Locale;

/// Field names an [`Article`] answers to in searches.
pub const SEARCHABLE_FIELDS: [&str; 7] =
    ["title", "description", "tags", "category", "slug", "locale", "body"];

/// A blog entry parsed from a markdown file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Article {
    /// URL slug, unique per locale.
    pub slug: String,
    /// Publication locale.
    pub locale: Locale,
    /// Display title.
    pub title: String,
    /// Listing summary.
    pub description: Option<String>,
    /// Tags.
    pub tags: Vec<String>,
    /// Listing category.
    pub category: Option<String>,
    /// Publication date.
    pub date: Option<NaiveDate>,
    /// Whether the entry is unpublished.
    pub draft: bool,
    /// Markdown body after the frontmatter.
    pub body: String,
    /// Path relative to the collection root.
    pub path: PathBuf,
}

impl Article {
    /// Parse an entry from its source text.
    ///
    /// `relative_path` is the file's path under the collection root; it
    /// supplies the slug and, when the first directory is a locale code,
    /// the locale.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] naming `relative_path` when the
    /// frontmatter is missing, malformed, or fails the schema.
    pub fn parse(relative_path: &Path, source: &str, default_locale: Locale) -> Result<Self> {
        let invalid = |e: Error| match e {
            Error::Parse(msg) => Error::validation(relative_path, msg),
            other => other,
        };

        let (yaml, body) = extract_frontmatter(source).map_err(invalid)?;
        let yaml = yaml.ok_or_else(|| Error::validation(relative_path, "missing frontmatter"))?;
        let frontmatter = Frontmatter::parse(yaml).map_err(invalid)?;

        let locale = match frontmatter.locale.as_deref() {
            Some(code) => code.parse::<Locale>().map_err(invalid)?,
            None => locale_from_path(relative_path).unwrap_or(default_locale),
        };

        let slug = match frontmatter.slug.as_deref().map(normalize_slug) {
            Some(slug) if !slug.is_empty() => slug,
            Some(_) => return Err(Error::validation(relative_path, "slug must not be empty")),
            None => slug_from_path(relative_path)
                .ok_or_else(|| Error::validation(relative_path, "cannot derive slug from path"))?,
        };

        Ok(Self {
            slug,
            locale,
            title: frontmatter.title.trim().to_string(),
            description: frontmatter.description,
            tags: frontmatter.tags,
            category: frontmatter.category,
            date: frontmatter.date,
            draft: frontmatter.draft,
            body: body.to_string(),
            path: relative_path.to_path_buf(),
        })
    }
}

/// The locale named by the first directory of `relative_path`, if any.
fn locale_from_path(relative_path: &Path) -> Option<Locale> {
    let parent = relative_path.parent()?;
    match parent.components().next()? {
        Component::Normal(first) => first.to_str()?.parse().ok(),
        _ => None,
    }
}

impl Searchable for Article {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "title" => Some((&self.title).into()),
            "description" => self.description.as_ref().map(FieldValue::from),
            "tags" => Some((&self.tags).into()),
            "category" => self.category.as_ref().map(FieldValue::from),
            "slug" => Some((&self.slug).into()),
            "locale" => Some(FieldValue::Text(self.locale.as_str())),
            "body" => Some((&self.body).into()),
            "date" | "draft" => Some(FieldValue::Unsupported),
            _ => None,
        }
    }
}
