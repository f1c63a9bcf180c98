//! Configuration types for markdown-to-pages conversion.
//!
//! All conversion behaviour is controlled through [`ConversionConfig`], built
//! via its [`ConversionConfigBuilder`]. The text stages themselves take no
//! configuration beyond the line-ending switch; everything else here shapes
//! what happens around them (which pages to keep, how to join them, what
//! display values to hand the renderer).

use crate::error::Md2PagesError;
use crate::pipeline::marker::PAGE_BREAK_MARKER;
use serde::{Deserialize, Serialize};

/// Configuration for a markdown-to-pages conversion.
///
/// Built via [`ConversionConfig::builder()`] or using
/// [`ConversionConfig::default()`].
///
/// # Example
/// ```rust
/// use md2pages::{ConversionConfig, PageSelection};
///
/// let config = ConversionConfig::builder()
///     .pages(PageSelection::Range(2, 5))
///     .font_size_px(18.0)
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionConfig {
    /// Page selection. Default: All pages.
    pub pages: PageSelection,

    /// Separator used when pages are joined back into one document.
    /// Default: [`PageSeparator::PageBreak`], so the assembled output
    /// paginates back to the same pages.
    pub page_separator: PageSeparator,

    /// Convert CRLF and lone CR to LF before cleanup. Default: true.
    ///
    /// The cleanup rules are line based and expect `\n`. Turning this off
    /// leaves Windows line endings in place, and CRLF rule lines then survive.
    pub normalize_line_endings: bool,

    /// Display values for the host renderer. Never read by the pipeline.
    pub style: SheetStyle,

    /// Download timeout for URL inputs in seconds. Default: 120.
    pub download_timeout_secs: u64,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            pages: PageSelection::default(),
            page_separator: PageSeparator::default(),
            normalize_line_endings: true,
            style: SheetStyle::default(),
            download_timeout_secs: 120,
        }
    }
}

impl ConversionConfig {
    /// Create a new builder for `ConversionConfig`.
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ConversionConfig`].
#[derive(Debug)]
pub struct ConversionConfigBuilder {
    config: ConversionConfig,
}

impl ConversionConfigBuilder {
    pub fn pages(mut self, selection: PageSelection) -> Self {
        self.config.pages = selection;
        self
    }

    pub fn page_separator(mut self, sep: PageSeparator) -> Self {
        self.config.page_separator = sep;
        self
    }

    pub fn normalize_line_endings(mut self, v: bool) -> Self {
        self.config.normalize_line_endings = v;
        self
    }

    pub fn style(mut self, style: SheetStyle) -> Self {
        self.config.style = style;
        self
    }

    pub fn font_size_px(mut self, px: f32) -> Self {
        self.config.style.font_size_px = px.clamp(SheetStyle::FONT_SIZE_MIN, SheetStyle::FONT_SIZE_MAX);
        self
    }

    pub fn line_height(mut self, ratio: f32) -> Self {
        self.config.style.line_height =
            ratio.clamp(SheetStyle::LINE_HEIGHT_MIN, SheetStyle::LINE_HEIGHT_MAX);
        self
    }

    pub fn margin_mm(mut self, mm: f32) -> Self {
        self.config.style.margin_mm = mm.clamp(SheetStyle::MARGIN_MIN, SheetStyle::MARGIN_MAX);
        self
    }

    pub fn download_timeout_secs(mut self, secs: u64) -> Self {
        self.config.download_timeout_secs = secs;
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ConversionConfig, Md2PagesError> {
        let c = &self.config;
        c.style.validate()?;
        c.pages.validate()?;
        if c.download_timeout_secs == 0 {
            return Err(Md2PagesError::InvalidConfig(
                "Download timeout must be ≥ 1 second".into(),
            ));
        }
        Ok(self.config)
    }
}

// ── Display values ───────────────────────────────────────────────────────

/// Font and spacing values the host applies when printing each page.
///
/// A plain value: the pipeline neither reads nor emits CSS for it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SheetStyle {
    /// Base font size in CSS pixels. Range: 10–32. Default: 16.
    pub font_size_px: f32,
    /// Line height as a multiple of the font size. Range: 1.0–3.0. Default: 1.6.
    pub line_height: f32,
    /// Page margin in millimetres. Range: 0–50. Default: 20.
    pub margin_mm: f32,
}

impl SheetStyle {
    pub const FONT_SIZE_MIN: f32 = 10.0;
    pub const FONT_SIZE_MAX: f32 = 32.0;
    pub const LINE_HEIGHT_MIN: f32 = 1.0;
    pub const LINE_HEIGHT_MAX: f32 = 3.0;
    pub const MARGIN_MIN: f32 = 0.0;
    pub const MARGIN_MAX: f32 = 50.0;

    fn validate(&self) -> Result<(), Md2PagesError> {
        let checks = [
            ("font size", self.font_size_px, Self::FONT_SIZE_MIN, Self::FONT_SIZE_MAX),
            ("line height", self.line_height, Self::LINE_HEIGHT_MIN, Self::LINE_HEIGHT_MAX),
            ("margin", self.margin_mm, Self::MARGIN_MIN, Self::MARGIN_MAX),
        ];
        for (name, value, min, max) in checks {
            if !(min..=max).contains(&value) {
                return Err(Md2PagesError::InvalidConfig(format!(
                    "{name} must be {min}–{max}, got {value}"
                )));
            }
        }
        Ok(())
    }
}

impl Default for SheetStyle {
    fn default() -> Self {
        Self {
            font_size_px: 16.0,
            line_height: 1.6,
            margin_mm: 20.0,
        }
    }
}

// ── Enums ────────────────────────────────────────────────────────────────

/// Specifies which pages of the paginated document to keep.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageSelection {
    /// Keep all pages (default).
    #[default]
    All,
    /// Keep a single page (1-indexed).
    Single(usize),
    /// Keep a contiguous range of pages (1-indexed, inclusive).
    Range(usize, usize),
    /// Keep specific pages (1-indexed, deduplicated).
    Set(Vec<usize>),
}

impl PageSelection {
    /// Whether page `page_num` (1-indexed) is part of the selection.
    pub fn selects(&self, page_num: usize) -> bool {
        page_num >= 1
            && match self {
                PageSelection::All => true,
                PageSelection::Single(p) => *p == page_num,
                PageSelection::Range(start, end) => (*start..=*end).contains(&page_num),
                PageSelection::Set(pages) => pages.contains(&page_num),
            }
    }

    /// 0-indexed positions of the selected pages in a document of
    /// `total_pages`, ascending and without repeats.
    pub fn to_indices(&self, total_pages: usize) -> Vec<usize> {
        (1..=total_pages)
            .filter(|&n| self.selects(n))
            .map(|n| n - 1)
            .collect()
    }

    /// The first page number the selection asks for (1-indexed), if any.
    pub fn first_requested(&self) -> Option<usize> {
        match self {
            PageSelection::All => None,
            PageSelection::Single(p) => Some(*p),
            PageSelection::Range(start, _) => Some(*start),
            PageSelection::Set(pages) => pages.iter().min().copied(),
        }
    }

    /// Rejects page 0 and reversed ranges.
    pub fn validate(&self) -> Result<(), Md2PagesError> {
        match self {
            PageSelection::Single(0) => Err(Md2PagesError::InvalidConfig(
                "Pages are 1-indexed, minimum is 1 (got 0)".into(),
            )),
            PageSelection::Range(start, end) if start > end => {
                Err(Md2PagesError::InvalidConfig(format!(
                    "Invalid page range '{start}-{end}': start must be <= end"
                )))
            }
            PageSelection::Set(pages) if pages.contains(&0) => Err(Md2PagesError::InvalidConfig(
                "Pages are 1-indexed, minimum is 1 (got 0)".into(),
            )),
            _ => Ok(()),
        }
    }
}

/// How to separate pages in the assembled Markdown output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageSeparator {
    /// Canonical page-break marker: `<div style="page-break-after: always;"></div>`. (default)
    #[default]
    PageBreak,
    /// No separator; pages joined with "\n\n".
    None,
    /// Horizontal rule: "\n\n---\n\n"
    HorizontalRule,
    /// HTML comment with page number: "<!-- page N -->"
    Comment,
    /// Custom string inserted between pages.
    Custom(String),
}

impl PageSeparator {
    /// Render the separator string placed before page `page_num` (1-indexed).
    pub fn render(&self, page_num: usize) -> String {
        match self {
            PageSeparator::PageBreak => format!("\n\n{}\n\n", PAGE_BREAK_MARKER),
            PageSeparator::None => "\n\n".to_string(),
            PageSeparator::HorizontalRule => "\n\n---\n\n".to_string(),
            PageSeparator::Comment => format!("\n\n<!-- page {} -->\n\n", page_num),
            PageSeparator::Custom(s) => format!("\n\n{}\n\n", s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_selection_to_indices() {
        assert_eq!(PageSelection::All.to_indices(5), vec![0, 1, 2, 3, 4]);
        assert_eq!(PageSelection::Single(3).to_indices(5), vec![2]);
        assert_eq!(PageSelection::Single(6).to_indices(5), Vec::<usize>::new());
        assert_eq!(PageSelection::Range(2, 4).to_indices(5), vec![1, 2, 3]);
        assert_eq!(PageSelection::Range(3, 10).to_indices(4), vec![2, 3]);
        assert_eq!(
            PageSelection::Set(vec![3, 1, 3]).to_indices(5),
            vec![0, 2] // deduplicated and sorted
        );
        assert!(PageSelection::All.to_indices(0).is_empty());
    }

    #[test]
    fn test_page_selection_selects() {
        assert!(PageSelection::Range(2, 4).selects(4));
        assert!(!PageSelection::Range(2, 4).selects(5));
        assert!(PageSelection::Set(vec![7, 2]).selects(7));
        assert!(!PageSelection::All.selects(0));
    }

    #[test]
    fn test_page_selection_validate() {
        assert!(PageSelection::Set(vec![2, 9]).validate().is_ok());
        assert!(PageSelection::Single(0).validate().is_err());
        let err = PageSelection::Range(9, 2).validate().unwrap_err();
        assert!(err.to_string().contains("9-2"), "got: {err}");
    }

    #[test]
    fn test_first_requested() {
        assert_eq!(PageSelection::All.first_requested(), None);
        assert_eq!(PageSelection::Range(4, 9).first_requested(), Some(4));
        assert_eq!(PageSelection::Set(vec![7, 2]).first_requested(), Some(2));
    }

    #[test]
    fn test_builder_clamps_style() {
        let config = ConversionConfig::builder()
            .font_size_px(99.0)
            .line_height(0.2)
            .margin_mm(-5.0)
            .build()
            .unwrap();
        assert_eq!(config.style.font_size_px, SheetStyle::FONT_SIZE_MAX);
        assert_eq!(config.style.line_height, SheetStyle::LINE_HEIGHT_MIN);
        assert_eq!(config.style.margin_mm, SheetStyle::MARGIN_MIN);
    }

    #[test]
    fn test_builder_rejects_bad_style() {
        let style = SheetStyle {
            font_size_px: f32::NAN,
            ..SheetStyle::default()
        };
        let err = ConversionConfig::builder().style(style).build().unwrap_err();
        assert!(err.to_string().contains("font size"), "got: {err}");
    }

    #[test]
    fn test_builder_rejects_bad_selection() {
        assert!(ConversionConfig::builder()
            .pages(PageSelection::Range(5, 2))
            .build()
            .is_err());
        assert!(ConversionConfig::builder()
            .pages(PageSelection::Set(vec![0, 1]))
            .build()
            .is_err());
    }

    #[test]
    fn test_builder_rejects_zero_timeout() {
        assert!(ConversionConfig::builder()
            .download_timeout_secs(0)
            .build()
            .is_err());
    }

    #[test]
    fn test_separator_render() {
        assert_eq!(
            PageSeparator::PageBreak.render(2),
            "\n\n<div style=\"page-break-after: always;\"></div>\n\n"
        );
        assert_eq!(PageSeparator::Comment.render(3), "\n\n<!-- page 3 -->\n\n");
        assert_eq!(PageSeparator::Custom("~~".into()).render(2), "\n\n~~\n\n");
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = ConversionConfig::builder()
            .pages(PageSelection::Set(vec![1, 3]))
            .page_separator(PageSeparator::Comment)
            .build()
            .unwrap();
        let json = serde_json::to_string(&config).unwrap();
        let back: ConversionConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
