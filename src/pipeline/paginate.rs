//! Paginator: split canonical text into print pages.
//!
//! The document is cut at every page-break marker (see [`super::marker`]),
//! the markers are thrown away, each piece is trimmed, and pieces with no
//! visible content are dropped. Surviving pages keep document order; page
//! numbers are simply positions in the returned list.

use super::marker::find_page_breaks;

/// HTML non-breaking space entity; a page made only of these prints blank.
const NBSP_ENTITY: &str = "&nbsp;";

/// Result of paginating one document.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Pagination {
    /// Trimmed, non-blank pages in document order.
    pub pages: Vec<String>,
    /// Number of page-break markers found.
    pub page_breaks: usize,
    /// Segments discarded as blank.
    pub blank_dropped: usize,
}

/// Split `text` into non-blank, trimmed page fragments.
///
/// ```
/// use md2pages::pipeline::paginate::paginate;
///
/// let text = "A<div style=\"page-break-after: always\"></div>\n&nbsp;\n\
///             <div style='page-break-after:always'></div>B";
/// assert_eq!(paginate(text), vec!["A", "B"]);
/// ```
pub fn paginate(text: &str) -> Vec<String> {
    paginate_with_report(text).pages
}

/// [`paginate`], also reporting how many markers and blank segments were seen.
pub fn paginate_with_report(text: &str) -> Pagination {
    let segments = split_segments(text);
    let page_breaks = segments.len() - 1;
    let pages: Vec<String> = segments
        .into_iter()
        .map(str::trim)
        .filter(|segment| !is_blank_page(segment))
        .map(str::to_string)
        .collect();
    let blank_dropped = page_breaks + 1 - pages.len();
    Pagination {
        pages,
        page_breaks,
        blank_dropped,
    }
}

/// Raw text between markers, untrimmed. N markers give N + 1 segments.
pub fn split_segments(text: &str) -> Vec<&str> {
    let breaks = find_page_breaks(text);
    let mut segments = Vec::with_capacity(breaks.len() + 1);
    let mut start = 0;
    for range in breaks {
        segments.push(&text[start..range.start]);
        start = range.end;
    }
    segments.push(&text[start..]);
    segments
}

/// True when nothing but whitespace and `&nbsp;` entities remain.
pub fn is_blank_page(segment: &str) -> bool {
    segment
        .split(NBSP_ENTITY)
        .all(|piece| piece.chars().all(char::is_whitespace))
}
