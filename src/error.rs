//! Error types for the md2pages library.
//!
//! The text pipeline itself ([`crate::pipeline::normalize`] and
//! [`crate::pipeline::paginate`]) is total: every string produces some
//! output, so it has no error type at all. Failures only happen at the edges:
//!
//! * acquiring the source text (missing file, unreadable file, bad download,
//!   bytes that are not UTF-8 text);
//! * interpreting the caller's request (invalid configuration, a page
//!   selection that keeps nothing);
//! * writing results back to disk.
//!
//! All of these are fatal for the request and are returned as
//! `Err(Md2PagesError)`. When acquisition fails the pipeline is never run.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the md2pages library.
#[derive(Debug, Error)]
pub enum Md2PagesError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("Markdown file not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The input string is not a usable file path or URL.
    #[error("Invalid input '{input}': not a file path or a valid HTTP/HTTPS URL")]
    InvalidInput { input: String },

    /// HTTP URL was syntactically valid but download failed.
    #[error("Failed to download '{url}': {reason}\nCheck your internet connection.")]
    DownloadFailed { url: String, reason: String },

    /// Download exceeded the configured timeout.
    #[error("Download timed out after {secs}s for '{url}'\nIncrease --download-timeout.")]
    DownloadTimeout { url: String, secs: u64 },

    /// The content was read but is not UTF-8 text. `origin` is the file path
    /// or URL it came from.
    #[error("'{origin}' is not UTF-8 text (invalid byte at offset {valid_up_to})")]
    NotText { origin: String, valid_up_to: usize },

    // ── Request errors ────────────────────────────────────────────────────
    /// The page selection keeps none of the document's pages.
    #[error("Page {page} is out of range (document has {total} pages)")]
    PageOutOfRange { page: usize, total: usize },

    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create or write an output file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}
