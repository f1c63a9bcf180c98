//! Pipeline stages for markdown-to-pages conversion.
//!
//! Each submodule implements exactly one transformation step, and the two
//! text stages are pure functions over `&str` so they can be called from
//! anywhere, concurrently, without setup.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ normalize ──▶ paginate
//! (path/URL)  (cleanup)     (split on page-break markers)
//! ```
//!
//! 1. [`input`]     — read the user-supplied path or URL into a `String`;
//!    the only stage with I/O
//! 2. [`normalize`] — strip invisible marks and decorative rules, repair
//!    chapter-heading spacing
//! 3. [`paginate`]  — cut at [`marker`]s, trim, drop blank pages

pub mod input;
pub mod marker;
pub mod normalize;
pub mod paginate;

use paginate::Pagination;
use tracing::debug;

/// Run the text stages: normalise `source`, then paginate the result.
pub fn process(source: &str, normalize_line_endings: bool) -> Pagination {
    let canonical = normalize::normalize_with(source, normalize_line_endings);
    debug!(
        "Normalised {} bytes into {} bytes",
        source.len(),
        canonical.len()
    );
    let pagination = paginate::paginate_with_report(&canonical);
    debug!(
        "Found {} page breaks, kept {} pages, dropped {} blank",
        pagination.page_breaks,
        pagination.pages.len(),
        pagination.blank_dropped
    );
    pagination
}
