//! # md2pages
//!
//! Split a markdown document into clean, print-ready pages.
//!
//! Long documents written for screen reading (novels, course notes, exported
//! wikis) mark their page boundaries with an empty HTML div:
//!
//! ```html
//! <div style="page-break-after: always;"></div>
//! ```
//!
//! This crate turns such a document into an ordered list of standalone
//! markdown fragments, one per printed sheet, that a CommonMark + GFM
//! renderer can draw independently.
//!
//! ## Pipeline Overview
//!
//! ```text
//! markdown
//!  │
//!  ├─ 1. Input      read a local file or download from URL
//!  ├─ 2. Normalize  strip BOM / zero-width spaces and rule lines,
//!  │                blank line before chapter headings
//!  ├─ 3. Paginate   split on page-break markers, trim, drop blank pages
//!  └─ 4. Output     selected pages + assembled markdown + stats
//! ```
//!
//! Steps 2 and 3 are pure functions and can be used on their own:
//!
//! ```rust
//! use md2pages::{normalize, paginate};
//!
//! let raw = "\u{FEFF}Intro\n<div style='page-break-after:always'></div>\n---\nNext";
//! assert_eq!(paginate(&normalize(raw)), vec!["Intro", "Next"]);
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use md2pages::{convert, ConversionConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let output = convert("book.md", &ConversionConfig::default()).await?;
//!     for page in &output.pages {
//!         println!("--- page {} ---\n{}", page.page_num, page.markdown);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `md2pages` binary (clap + anyhow + tracing-subscriber) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod error;
pub mod output;
pub mod pipeline;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ConversionConfig, ConversionConfigBuilder, PageSelection, PageSeparator, SheetStyle};
pub use convert::{convert, convert_str, convert_sync, convert_to_dir, convert_to_file, inspect};
pub use error::Md2PagesError;
pub use output::{ConversionOutput, ConversionStats, DocumentMetadata, PageResult};
pub use pipeline::marker::PAGE_BREAK_MARKER;
pub use pipeline::normalize::normalize;
pub use pipeline::paginate::paginate;
