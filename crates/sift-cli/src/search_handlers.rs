//! Handlers for `sift search`, `sift list` and `sift interactive`.

use crate::cli::{ScopeArgs, SearchArgs};
use crate::config::SiftConfig;
use serde::Serialize;
use sift_content::article::SEARCHABLE_FIELDS;
use sift_content::{Article, Collection, Locale};
use sift_core::{Error, Result};
use sift_filter::{FilterEngine, FilterOptions, filter_items};
use std::io::Write;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

// ============================================================================
// Shared helpers
// ============================================================================

/// The fields to search: the command's `--field` list, else `search.fields`.
///
/// # Errors
///
/// Fails on a field an [`Article`] does not have.
pub fn resolve_fields(config: &SiftConfig, scope: &ScopeArgs) -> Result<Vec<String>> {
    let fields = if scope.fields.is_empty() {
        &config.search.fields
    } else {
        &scope.fields
    };

    if let Some(unknown) = fields
        .iter()
        .find(|f| !SEARCHABLE_FIELDS.contains(&f.as_str()))
    {
        return Err(Error::config(format!(
            "unknown search field '{unknown}' (expected one of: {})",
            SEARCHABLE_FIELDS.join(", ")
        )));
    }
    Ok(fields.clone())
}

/// Load the configured collection, narrowed to the scope's locale.
pub async fn load_articles(config: &SiftConfig, scope: &ScopeArgs) -> Result<Vec<Article>> {
    let locale = scope
        .locale
        .as_deref()
        .map(str::parse::<Locale>)
        .transpose()?;

    let mut options = config.load_options()?;
    if scope.drafts {
        options = options.with_drafts(true);
    }

    let name = scope
        .collection
        .as_deref()
        .unwrap_or(config.content.collection.as_str());
    let collection = Collection::load_from_config(config, name, &options).await?;
    for skipped in collection.skipped() {
        tracing::debug!(path = %skipped.path.display(), reason = %skipped.reason, "entry skipped");
    }

    Ok(collection.into_items(locale))
}

/// One line of human-readable output for an entry.
fn format_article(article: &Article) -> String {
    let date = article
        .date
        .map_or_else(|| "----------".to_string(), |d| d.to_string());
    format!(
        "{date}  [{}] {}  ({})",
        article.locale, article.title, article.slug
    )
}

/// JSON shape of a search hit.
#[derive(Debug, Serialize)]
struct Hit<'a> {
    slug: &'a str,
    locale: Locale,
    title: &'a str,
    description: Option<&'a str>,
    tags: &'a [String],
    date: Option<String>,
    path: String,
}

impl<'a> From<&'a Article> for Hit<'a> {
    fn from(article: &'a Article) -> Self {
        Self {
            slug: &article.slug,
            locale: article.locale,
            title: &article.title,
            description: article.description.as_deref(),
            tags: &article.tags,
            date: article.date.map(|d| d.to_string()),
            path: article.path.display().to_string(),
        }
    }
}

// ============================================================================
// search
// ============================================================================

/// Run a one-shot search and print the matches.
pub async fn handle_search(config: &SiftConfig, args: &SearchArgs, out: &mut impl Write) -> Result<()> {
    let fields = resolve_fields(config, &args.scope)?;
    let articles = load_articles(config, &args.scope).await?;
    let min_chars = args.min_chars.unwrap_or(config.search.min_chars);
    let limit = args.limit.or(config.search.limit).unwrap_or(usize::MAX);

    let matches = filter_items(&articles, &fields, &args.query, min_chars);
    tracing::info!(
        query = %args.query,
        total = articles.len(),
        matched = matches.len(),
        "search complete"
    );

    if args.json {
        let hits: Vec<Hit<'_>> = matches.iter().take(limit).map(|a| Hit::from(*a)).collect();
        let json = serde_json::to_string_pretty(&hits)
            .map_err(|e| Error::runtime(format!("serialize results: {e}")))?;
        writeln!(out, "{json}")?;
    } else {
        for article in matches.iter().take(limit) {
            writeln!(out, "{}", format_article(article))?;
        }
        writeln!(out, "{} of {} entries", matches.len(), articles.len())?;
    }
    Ok(())
}

// ============================================================================
// list
// ============================================================================

/// Print every loaded entry.
pub async fn handle_list(config: &SiftConfig, scope: &ScopeArgs, out: &mut impl Write) -> Result<()> {
    let articles = load_articles(config, scope).await?;
    for article in &articles {
        writeln!(out, "{}", format_article(article))?;
    }
    writeln!(out, "{} entries", articles.len())?;
    Ok(())
}

// ============================================================================
// interactive
// ============================================================================

/// Feed query lines from `input` to a [`FilterEngine`], printing the results
/// each time a query settles. A blank line clears the search.
///
/// Returns when `input` is exhausted, after the last query has settled.
pub async fn handle_interactive<R>(
    config: &SiftConfig,
    scope: &ScopeArgs,
    input: R,
    out: &mut impl Write,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let fields = resolve_fields(config, scope)?;
    let articles = load_articles(config, scope).await?;
    run_interactive(articles, fields, config.filter_options(), config.search.limit, input, out).await
}

async fn run_interactive<R>(
    articles: Vec<Article>,
    fields: Vec<String>,
    options: FilterOptions,
    limit: Option<usize>,
    input: R,
    out: &mut impl Write,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let limit = limit.unwrap_or(usize::MAX);
    let mut engine = FilterEngine::new(articles, fields, options)?;
    let mut settled = engine.subscribe();
    let mut lines = input.lines();

    loop {
        tokio::select! {
            line = lines.next_line() => match line? {
                Some(line) if line.trim().is_empty() => engine.clear_search(),
                Some(line) => engine.set_query(line),
                None => break,
            },
            changed = settled.changed() => {
                if changed.is_err() {
                    return Ok(());
                }
                let _ = settled.borrow_and_update();
                render(&engine, limit, out)?;
            }
        }
    }

    // Input is closed: wait out any scheduled settle, even one that repeats
    // the settled query, then show what it settled to.
    let mut dirty = settled.has_changed().unwrap_or(false);
    let recheck = engine.options().debounce().max(Duration::from_millis(1));
    while engine.has_pending_settle() {
        tokio::select! {
            changed = settled.changed() => {
                changed.map_err(|_| Error::runtime("filter engine dropped"))?;
                dirty = true;
            }
            _ = tokio::time::sleep(recheck) => {}
        }
    }
    if dirty {
        let _ = settled.borrow_and_update();
        render(&engine, limit, out)?;
    }
    Ok(())
}

fn render<T>(engine: &FilterEngine<Article>, limit: usize, out: &mut T) -> Result<()>
where
    T: Write + ?Sized,
{
    let query = engine.debounced_search_term();
    if engine.is_searching() {
        writeln!(out, "{} result(s) for \"{}\"", engine.result_count(), query.trim())?;
    } else {
        writeln!(out, "{} entries", engine.result_count())?;
    }
    for article in engine.filtered_items().into_iter().take(limit) {
        writeln!(out, "  {}", format_article(article))?;
    }
    out.flush()?;
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
