//! Conversion entry points.
//!
//! [`convert_str`] is the in-memory path and does no I/O. The async
//! functions resolve an input path or URL first, then hand the text to it.
//! Input failures return before any text processing happens.

use crate::config::ConversionConfig;
use crate::error::Md2PagesError;
use crate::output::{ConversionOutput, ConversionStats, DocumentMetadata, PageResult};
use crate::pipeline::{self, input};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Origin recorded for text passed in directly.
const MEMORY_SOURCE: &str = "<memory>";

/// Convert a markdown file or URL into print pages.
///
/// This is the primary entry point for the library.
///
/// # Arguments
/// * `input_str` — Local file path or HTTP/HTTPS URL to a markdown document
/// * `config`    — Conversion configuration
///
/// # Errors
/// - File not found / permission denied / download failure
/// - Content is not UTF-8 text
/// - The page selection keeps none of a non-empty document's pages
pub async fn convert(
    input_str: impl AsRef<str>,
    config: &ConversionConfig,
) -> Result<ConversionOutput, Md2PagesError> {
    let input_str = input_str.as_ref();
    info!("Starting conversion: {}", input_str);

    let source = input::read_source(input_str, config.download_timeout_secs).await?;
    convert_source(&source.origin, &source.text, config)
}

/// Convert markdown text already in memory.
///
/// An empty or whitespace-only document is not an error: it yields an output
/// with no pages.
///
/// # Example
/// ```rust
/// use md2pages::{convert_str, ConversionConfig};
///
/// let text = "Intro\n<div style=\"page-break-after: always\"></div>\nChapter 1";
/// let output = convert_str(text, &ConversionConfig::default()).unwrap();
/// assert_eq!(output.pages.len(), 2);
/// assert_eq!(output.pages[1].markdown, "Chapter 1");
/// ```
pub fn convert_str(
    source: &str,
    config: &ConversionConfig,
) -> Result<ConversionOutput, Md2PagesError> {
    convert_source(MEMORY_SOURCE, source, config)
}

/// Synchronous wrapper around [`convert`].
///
/// Creates a temporary tokio runtime internally.
pub fn convert_sync(
    input_str: impl AsRef<str>,
    config: &ConversionConfig,
) -> Result<ConversionOutput, Md2PagesError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| Md2PagesError::Internal(format!("Failed to create tokio runtime: {}", e)))?
        .block_on(convert(input_str, config))
}

/// Convert a document and write the assembled markdown to a file.
///
/// Uses atomic write (temp file + rename) to prevent partial files.
pub async fn convert_to_file(
    input_str: impl AsRef<str>,
    output_path: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<ConversionStats, Md2PagesError> {
    let output = convert(input_str, config).await?;
    let path = output_path.as_ref();

    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| write_failed(path, e))?;
    }
    write_atomic(path, &output.markdown).await?;

    Ok(output.stats)
}

/// Convert a document and write each selected page to its own file.
///
/// Files are named `page-001.md`, `page-002.md`, … after each page's
/// position in the full document, so a page selection leaves gaps in the
/// numbering rather than renumbering.
pub async fn convert_to_dir(
    input_str: impl AsRef<str>,
    dir: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<ConversionStats, Md2PagesError> {
    let output = convert(input_str, config).await?;
    let dir = dir.as_ref();

    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| write_failed(dir, e))?;

    for page in &output.pages {
        let path = page_file_path(dir, page.page_num);
        write_atomic(&path, &page.markdown).await?;
        debug!("Wrote page {} to {}", page.page_num, path.display());
    }

    Ok(output.stats)
}

/// Read and paginate a document without assembling any output.
pub async fn inspect(input_str: impl AsRef<str>) -> Result<DocumentMetadata, Md2PagesError> {
    let config = ConversionConfig::default();
    let source = input::read_source(input_str.as_ref(), config.download_timeout_secs).await?;
    let pagination = pipeline::process(&source.text, config.normalize_line_endings);
    Ok(DocumentMetadata {
        title: find_title(&pagination.pages),
        source: source.origin,
        source_bytes: source.text.len(),
        page_count: pagination.pages.len(),
    })
}

/// Path of the file holding page `page_num` inside `dir`.
pub fn page_file_path(dir: &Path, page_num: usize) -> PathBuf {
    dir.join(format!("page-{:03}.md", page_num))
}

// ── Internal helpers ─────────────────────────────────────────────────────

fn convert_source(
    origin: &str,
    text: &str,
    config: &ConversionConfig,
) -> Result<ConversionOutput, Md2PagesError> {
    let start = Instant::now();

    let pagination = pipeline::process(text, config.normalize_line_endings);
    let total_pages = pagination.pages.len();
    info!("Document has {} pages", total_pages);

    let metadata = DocumentMetadata {
        source: origin.to_string(),
        title: find_title(&pagination.pages),
        source_bytes: text.len(),
        page_count: total_pages,
    };

    let indices = config.pages.to_indices(total_pages);
    if indices.is_empty() && total_pages > 0 {
        return Err(Md2PagesError::PageOutOfRange {
            page: config.pages.first_requested().unwrap_or(0),
            total: total_pages,
        });
    }
    if indices.len() < total_pages {
        warn!(
            "Page selection keeps {} of {} pages",
            indices.len(),
            total_pages
        );
    }

    let mut all_pages = pagination.pages;
    let pages: Vec<PageResult> = indices
        .into_iter()
        .map(|idx| PageResult {
            page_num: idx + 1,
            markdown: std::mem::take(&mut all_pages[idx]),
        })
        .collect();

    let markdown = assemble_document(&pages, config);

    let stats = ConversionStats {
        total_pages,
        selected_pages: pages.len(),
        page_breaks_found: pagination.page_breaks,
        blank_pages_dropped: pagination.blank_dropped,
        total_duration_ms: start.elapsed().as_millis() as u64,
    };

    info!(
        "Conversion complete: {}/{} pages, {}ms total",
        stats.selected_pages, total_pages, stats.total_duration_ms
    );

    Ok(ConversionOutput {
        markdown,
        pages,
        metadata,
        stats,
        style: config.style,
    })
}

/// Join page markdown with the configured separator.
fn assemble_document(pages: &[PageResult], config: &ConversionConfig) -> String {
    let mut parts: Vec<String> = Vec::with_capacity(pages.len() * 2);
    for (i, page) in pages.iter().enumerate() {
        if i > 0 {
            parts.push(config.page_separator.render(page.page_num));
        }
        parts.push(page.markdown.clone());
    }
    parts.join("")
}

/// Text of the first level-one ATX heading across the pages.
fn find_title(pages: &[String]) -> Option<String> {
    pages
        .iter()
        .flat_map(|page| page.lines())
        .find_map(|line| {
            let heading = line.trim_start().strip_prefix("# ")?;
            let title = heading.trim().trim_end_matches('#').trim_end();
            (!title.is_empty()).then(|| title.to_string())
        })
}

async fn write_atomic(path: &Path, contents: &str) -> Result<(), Md2PagesError> {
    let tmp_path = path.with_extension("md.tmp");
    tokio::fs::write(&tmp_path, contents)
        .await
        .map_err(|e| write_failed(path, e))?;
    tokio::fs::rename(&tmp_path, path)
        .await
        .map_err(|e| write_failed(path, e))
}

fn write_failed(path: &Path, source: std::io::Error) -> Md2PagesError {
    Md2PagesError::OutputWriteFailed {
        path: path.to_path_buf(),
        source,
    }
}
