//! Loading a content collection from disk.

use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use sift_core::traits::ConfigProvider;
use sift_core::util::files::{FindOptions, find_all_files, read_file};
use sift_core::Result;

use crate::article::Article;
use crate::locale::Locale;

/// How a collection is loaded.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Keep entries marked `draft: true`.
    pub include_drafts: bool,
    /// Fail on the first invalid entry instead of skipping it.
    pub strict: bool,
    /// Locale for entries that name none, directly or by directory.
    pub default_locale: Locale,
}

impl LoadOptions {
    /// Keep drafts.
    pub fn with_drafts(mut self, include: bool) -> Self {
        self.include_drafts = include;
        self
    }

    /// Fail on invalid entries.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Set the fallback locale.
    pub fn with_default_locale(mut self, locale: Locale) -> Self {
        self.default_locale = locale;
        self
    }
}

/// An entry that was not loaded, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    /// Path relative to the collection root.
    pub path: PathBuf,
    /// Why it was skipped.
    pub reason: String,
}

/// The entries of one content collection, newest first.
#[derive(Debug, Clone, Default)]
pub struct Collection {
    root: PathBuf,
    articles: Vec<Article>,
    skipped: Vec<SkippedFile>,
}

impl Collection {
    /// Load every markdown entry under `root`.
    ///
    /// # Errors
    ///
    /// Fails when `root` cannot be walked. Unreadable or invalid entries fail
    /// the load only with [`LoadOptions::strict`]; otherwise they are logged
    /// and recorded in [`skipped`](Self::skipped).
    pub async fn load(root: impl AsRef<Path>, options: &LoadOptions) -> Result<Self> {
        let root = root.as_ref();
        let files = find_all_files(root, FindOptions::markdown()).await?;

        let mut articles = Vec::with_capacity(files.len());
        let mut skipped = Vec::new();

        for file in files {
            let source = match read_file(&file.path).await {
                Ok(source) => source,
                Err(e) if !options.strict => {
                    log::warn!("skipping unreadable entry: {e}");
                    skipped.push(SkippedFile {
                        path: file.relative_path,
                        reason: e.to_string(),
                    });
                    continue;
                }
                Err(e) => return Err(e),
            };
            match Article::parse(&file.relative_path, &source, options.default_locale) {
                Ok(article) if article.draft && !options.include_drafts => {
                    log::debug!("skipping draft {}", file.relative_path.display());
                    skipped.push(SkippedFile {
                        path: file.relative_path,
                        reason: "draft".to_string(),
                    });
                }
                Ok(article) => articles.push(article),
                Err(e) if e.is_per_file() && !options.strict => {
                    log::warn!("skipping invalid entry: {e}");
                    skipped.push(SkippedFile {
                        path: file.relative_path,
                        reason: e.to_string(),
                    });
                }
                Err(e) => return Err(e),
            }
        }

        log::info!(
            "loaded {} entries from {} ({} skipped)",
            articles.len(),
            root.display(),
            skipped.len()
        );

        Ok(Self::from_articles(root, articles).with_skipped(skipped))
    }

    /// Load the named collection from the configured content directory.
    pub async fn load_from_config<C: ConfigProvider>(
        config: &C,
        collection: &str,
        options: &LoadOptions,
    ) -> Result<Self> {
        let root = config.content_path(collection)?;
        Self::load(root, options).await
    }

    /// Build a collection from already-parsed entries, applying the standard order.
    pub fn from_articles(root: impl Into<PathBuf>, mut articles: Vec<Article>) -> Self {
        articles.sort_by(newest_first);
        Self {
            root: root.into(),
            articles,
            skipped: Vec::new(),
        }
    }

    fn with_skipped(mut self, skipped: Vec<SkippedFile>) -> Self {
        self.skipped = skipped;
        self
    }

    /// The collection's root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// All loaded entries.
    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    /// Entries that were not loaded.
    pub fn skipped(&self) -> &[SkippedFile] {
        &self.skipped
    }

    /// Number of loaded entries.
    pub fn len(&self) -> usize {
        self.articles.len()
    }

    /// Whether nothing was loaded.
    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    /// Entries published in `locale`.
    pub fn by_locale(&self, locale: Locale) -> Vec<&Article> {
        self.articles.iter().filter(|a| a.locale == locale).collect()
    }

    /// Consume the collection, keeping only `locale` when given.
    pub fn into_items(self, locale: Option<Locale>) -> Vec<Article> {
        match locale {
            Some(locale) => self.articles.into_iter().filter(|a| a.locale == locale).collect(),
            None => self.articles,
        }
    }
}

/// Dated entries newest first, undated last; ties broken by slug, then locale.
fn newest_first(a: &Article, b: &Article) -> Ordering {
    let by_date = match (a.date, b.date) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    by_date
        .then_with(|| a.slug.cmp(&b.slug))
        .then_with(|| a.locale.cmp(&b.locale))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sift_core::Error;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    fn site() -> TempDir {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        write(
            root,
            "pt/endomidface.md",
            "---\ntitle: Guia Endomidface\ntags: [Cirurgia, Face]\ndate: 2024-05-01\n---\nCorpo.\n",
        );
        write(
            root,
            "en/endomidface.md",
            "---\ntitle: Endomidface Guide\ntags: [Surgery, Face]\ndate: 2024-05-01\n---\nBody.\n",
        );
        write(
            root,
            "en/browlift.md",
            "---\ntitle: Browlift Basics\ntags: [Recovery]\ndate: 2024-08-10\n---\n",
        );
        write(root, "es/borrador.md", "---\ntitle: Borrador\ndraft: true\n---\n");
        write(root, "en/about.md", "---\ntitle: About the clinic\n---\n");
        write(root, "pt/cover.webp", "not markdown");
        temp
    }

    #[derive(Clone)]
    struct SiteConfig {
        base: PathBuf,
    }

    impl ConfigProvider for SiteConfig {
        fn project_name(&self) -> &str {
            "clinic"
        }

        fn base_path(&self) -> Result<PathBuf> {
            Ok(self.base.clone())
        }

        fn content_path(&self, collection: &str) -> Result<PathBuf> {
            Ok(self.base.join(collection))
        }
    }

    #[tokio::test]
    async fn test_load_orders_newest_first() {
        let temp = site();
        let collection = Collection::load(temp.path(), &LoadOptions::default())
            .await
            .unwrap();

        let order: Vec<(&str, Locale)> = collection
            .articles()
            .iter()
            .map(|a| (a.slug.as_str(), a.locale))
            .collect();
        assert_eq!(
            order,
            vec![
                ("browlift", Locale::En),
                ("endomidface", Locale::Pt),
                ("endomidface", Locale::En),
                ("about", Locale::En),
            ]
        );
    }

    #[tokio::test]
    async fn test_load_skips_drafts_by_default() {
        let temp = site();
        let collection = Collection::load(temp.path(), &LoadOptions::default())
            .await
            .unwrap();

        assert_eq!(collection.len(), 4);
        assert_eq!(collection.skipped().len(), 1);
        assert_eq!(collection.skipped()[0].reason, "draft");
        assert!(collection.by_locale(Locale::Es).is_empty());
    }

    #[tokio::test]
    async fn test_load_includes_drafts_when_asked() {
        let temp = site();
        let options = LoadOptions::default().with_drafts(true);
        let collection = Collection::load(temp.path(), &options).await.unwrap();

        assert_eq!(collection.len(), 5);
        assert_eq!(collection.by_locale(Locale::Es).len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_entry_skipped_when_lenient() {
        let temp = site();
        write(temp.path(), "pt/broken.md", "---\ntags: [x]\n---\n");

        let collection = Collection::load(temp.path(), &LoadOptions::default())
            .await
            .unwrap();

        assert_eq!(collection.len(), 4);
        assert!(
            collection
                .skipped()
                .iter()
                .any(|s| s.path == PathBuf::from("pt/broken.md"))
        );
    }

    #[tokio::test]
    async fn test_invalid_entry_fails_when_strict() {
        let temp = site();
        write(temp.path(), "pt/broken.md", "no frontmatter at all");

        let options = LoadOptions::default().strict(true);
        let err = Collection::load(temp.path(), &options).await.unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
        assert!(err.to_string().contains("broken.md"));
    }

    #[tokio::test]
    async fn test_unreadable_entry_skipped_when_lenient() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "pt/good.md", "---\ntitle: Lifting\n---\n");
        std::fs::write(temp.path().join("pt/bad.md"), b"\xff\xfe---").unwrap();

        let collection = Collection::load(temp.path(), &LoadOptions::default())
            .await
            .unwrap();

        assert_eq!(collection.len(), 1);
        assert_eq!(collection.skipped().len(), 1);
        assert_eq!(collection.skipped()[0].path, PathBuf::from("pt/bad.md"));
    }

    #[tokio::test]
    async fn test_unreadable_entry_fails_when_strict() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "pt/good.md", "---\ntitle: Lifting\n---\n");
        std::fs::write(temp.path().join("pt/bad.md"), b"\xff\xfe---").unwrap();

        let options = LoadOptions::default().strict(true);
        let err = Collection::load(temp.path(), &options).await.unwrap_err();
        assert!(matches!(err, Error::IoWithPath { .. }));
    }

    #[tokio::test]
    async fn test_load_missing_root() {
        let temp = TempDir::new().unwrap();
        let result = Collection::load(temp.path().join("blog"), &LoadOptions::default()).await;
        assert!(matches!(result, Err(Error::NotFound(_))));
    }

    #[tokio::test]
    async fn test_load_from_config() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "blog/pt/lifting.md", "---\ntitle: Lifting\n---\n");
        let config = SiteConfig {
            base: temp.path().to_path_buf(),
        };

        let collection = Collection::load_from_config(&config, "blog", &LoadOptions::default())
            .await
            .unwrap();
        assert_eq!(collection.len(), 1);
        assert_eq!(collection.root(), temp.path().join("blog"));
    }

    #[tokio::test]
    async fn test_default_locale_applies_to_flat_layout() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "lifting.md", "---\ntitle: Lifting\n---\n");

        let options = LoadOptions::default().with_default_locale(Locale::Es);
        let collection = Collection::load(temp.path(), &options).await.unwrap();
        assert_eq!(collection.articles()[0].locale, Locale::Es);
    }

    #[tokio::test]
    async fn test_into_items_by_locale() {
        let temp = site();
        let collection = Collection::load(temp.path(), &LoadOptions::default())
            .await
            .unwrap();

        let english = collection.clone().into_items(Some(Locale::En));
        assert_eq!(english.len(), 3);
        assert!(english.iter().all(|a| a.locale == Locale::En));
        assert_eq!(collection.into_items(None).len(), 4);
    }
}
