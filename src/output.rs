//! Output types returned by the conversion entry points.

use crate::config::SheetStyle;
use serde::{Deserialize, Serialize};

/// The result of converting one document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionOutput {
    /// Selected pages joined with the configured separator.
    pub markdown: String,
    /// Selected pages, in document order.
    pub pages: Vec<PageResult>,
    /// Facts about the whole document.
    pub metadata: DocumentMetadata,
    /// Counters and timings for this run.
    pub stats: ConversionStats,
    /// Display values for the renderer, copied from the config.
    pub style: SheetStyle,
}

impl ConversionOutput {
    /// True when the document produced no printable page.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

/// One printable page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageResult {
    /// 1-indexed position among all non-blank pages of the document.
    pub page_num: usize,
    /// Standalone markdown for this page, passed to the renderer as-is.
    pub markdown: String,
}

/// Document-level metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    /// Path or URL the text was read from (`"<memory>"` for in-memory input).
    pub source: String,
    /// Text of the first `#` heading, if the document has one.
    pub title: Option<String>,
    /// Size of the raw source in bytes.
    pub source_bytes: usize,
    /// Number of non-blank pages.
    pub page_count: usize,
}

/// Counters and timings for one conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionStats {
    /// Non-blank pages in the document.
    pub total_pages: usize,
    /// Pages kept by the page selection.
    pub selected_pages: usize,
    /// Page-break markers found in the canonical text.
    pub page_breaks_found: usize,
    /// Segments between markers dropped for having no visible content.
    pub blank_pages_dropped: usize,
    /// Wall-clock time for the whole conversion.
    pub total_duration_ms: u64,
}
