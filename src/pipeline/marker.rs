//! Page-break marker recognition.
//!
//! A page break in the source document is an empty HTML div whose inline
//! style asks for a break after it:
//!
//! ```html
//! <div style="page-break-after: always;"></div>
//! <div class="pb" STYLE='color: red; Page-Break-After :ALWAYS'></div>
//! ```
//!
//! Recognition runs in two steps so each rule can be tested on its own:
//!
//! 1. a case-insensitive regex finds empty `<div ...></div>` elements
//!    (whitespace between the tags is allowed, text is not);
//! 2. the attribute list is tokenized by hand, the `style` value extracted,
//!    and its declarations checked for `page-break-after: always`.
//!
//! Anything that fails either step (a div without a style, a div with text
//! inside, `page-break-before`, ...) is ordinary content.

use once_cell::sync::Lazy;
use regex::Regex;
use std::ops::Range;

/// Empty div elements; group 1 is the raw attribute list.
static RE_EMPTY_DIV: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<div(\s[^>]*)?>\s*</div\s*>").unwrap());

/// The canonical marker written between pages when assembling output.
pub const PAGE_BREAK_MARKER: &str = r#"<div style="page-break-after: always;"></div>"#;

/// Byte ranges of every page-break marker in `text`, in document order.
pub fn find_page_breaks(text: &str) -> Vec<Range<usize>> {
    RE_EMPTY_DIV
        .captures_iter(text)
        .filter(|caps| {
            caps.get(1)
                .and_then(|attrs| style_attribute(attrs.as_str()))
                .is_some_and(is_page_break_style)
        })
        .filter_map(|caps| caps.get(0).map(|m| m.range()))
        .collect()
}

/// Does this inline style declare `page-break-after: always`?
///
/// Other declarations may appear before or after it. Property and value are
/// matched case-insensitively, with any whitespace around the colon, and an
/// `!important` suffix is accepted.
pub fn is_page_break_style(style: &str) -> bool {
    style.split(';').any(|decl| {
        let Some((property, value)) = decl.split_once(':') else {
            return false;
        };
        let value = value.trim();
        let value = strip_important(value).unwrap_or(value);
        property.trim().eq_ignore_ascii_case("page-break-after")
            && value.eq_ignore_ascii_case("always")
    })
}

fn strip_important(value: &str) -> Option<&str> {
    let bang = value.rfind('!')?;
    value[bang + 1..]
        .trim()
        .eq_ignore_ascii_case("important")
        .then(|| value[..bang].trim_end())
}

/// Value of the first `style` attribute in a raw attribute list.
///
/// Accepts double-quoted, single-quoted and unquoted values. Attribute names
/// are compared case-insensitively.
pub fn style_attribute(attrs: &str) -> Option<&str> {
    AttributeScanner::new(attrs)
        .find(|(name, _)| name.eq_ignore_ascii_case("style"))
        .and_then(|(_, value)| value)
}

/// Minimal HTML attribute tokenizer over the text between `<div` and `>`.
struct AttributeScanner<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> AttributeScanner<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn skip_whitespace(&mut self) {
        let rest = &self.src[self.pos..];
        self.pos += rest.len() - rest.trim_start().len();
    }

    /// Advance while `keep` holds and return the consumed slice.
    fn take_while(&mut self, keep: impl Fn(char) -> bool) -> &'a str {
        let rest = &self.src[self.pos..];
        let end = rest.find(|c: char| !keep(c)).unwrap_or(rest.len());
        self.pos += end;
        &rest[..end]
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn value(&mut self) -> &'a str {
        match self.peek() {
            Some(quote @ ('"' | '\'')) => {
                self.pos += 1;
                let value = self.take_while(|c| c != quote);
                if self.peek() == Some(quote) {
                    self.pos += 1;
                }
                value
            }
            _ => self.take_while(|c| !c.is_whitespace() && c != '/'),
        }
    }
}

impl<'a> Iterator for AttributeScanner<'a> {
    /// `(name, value)`; `value` is `None` for bare attributes like `hidden`.
    type Item = (&'a str, Option<&'a str>);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.skip_whitespace();
            let c = self.peek()?;
            if c == '/' || c == '=' {
                // Stray slash or an `=` with no name: skip it.
                self.pos += 1;
                continue;
            }
            let name = self.take_while(|c| !c.is_whitespace() && c != '=' && c != '/');
            self.skip_whitespace();
            if self.peek() != Some('=') {
                return Some((name, None));
            }
            self.pos += 1;
            self.skip_whitespace();
            return Some((name, Some(self.value())));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn markers(text: &str) -> Vec<&str> {
        find_page_breaks(text)
            .into_iter()
            .map(|r| &text[r])
            .collect()
    }

    #[test]
    fn test_style_declarations() {
        assert!(is_page_break_style("page-break-after: always"));
        assert!(is_page_break_style("page-break-after:always;"));
        assert!(is_page_break_style("  page-break-after \t:\n always  "));
        assert!(is_page_break_style("color: red; PAGE-BREAK-AFTER: Always; margin: 0"));
        assert!(is_page_break_style("page-break-after: always !important"));
        assert!(!is_page_break_style("page-break-before: always"));
        assert!(!is_page_break_style("page-break-after: auto"));
        assert!(!is_page_break_style("page-break-after"));
        assert!(!is_page_break_style(""));
    }

    #[test]
    fn test_style_attribute_quoting() {
        assert_eq!(style_attribute(r#" style="a: b""#), Some("a: b"));
        assert_eq!(style_attribute(" style='a: b'"), Some("a: b"));
        assert_eq!(style_attribute(" style=a:b"), Some("a:b"));
        assert_eq!(style_attribute(r#" STYLE = "x""#), Some("x"));
    }

    #[test]
    fn test_style_attribute_among_others() {
        let attrs = r#" class="pb" data-x='1' hidden style="page-break-after: always" id=p2"#;
        assert_eq!(style_attribute(attrs), Some("page-break-after: always"));
    }

    #[test]
    fn test_first_style_attribute_wins() {
        assert_eq!(style_attribute(r#" style="a" style="b""#), Some("a"));
    }

    #[test]
    fn test_missing_style_attribute() {
        assert_eq!(style_attribute(r#" class="x""#), None);
        assert_eq!(style_attribute(" style"), None);
        assert_eq!(style_attribute(""), None);
    }

    #[test]
    fn test_style_name_is_not_a_prefix_match() {
        assert_eq!(style_attribute(r#" data-style="page-break-after: always""#), None);
    }

    #[test]
    fn test_find_markers_variants() {
        let text = concat!(
            "a<div style=\"page-break-after: always;\"></div>",
            "b<DIV Style='page-break-after:always'></DIV>",
            "c<div class=\"x\" style=\"color:red; page-break-after : always\">\n</div>",
            "d",
        );
        assert_eq!(markers(text).len(), 3);
    }

    #[test]
    fn test_canonical_marker_matches() {
        assert_eq!(markers(PAGE_BREAK_MARKER), vec![PAGE_BREAK_MARKER]);
    }

    #[test]
    fn test_non_markers_ignored() {
        let text = concat!(
            "<div></div>",
            "<div style=\"color: red\"></div>",
            "<div style=\"page-break-after: always\">text</div>",
            "<div style=\"page-break-before: always\"></div>",
            "<divider style=\"page-break-after: always\"></divider>",
        );
        assert!(find_page_breaks(text).is_empty());
    }

    #[test]
    fn test_marker_ranges_in_order() {
        let text = "A<div style='page-break-after:always'></div>B<div style='page-break-after:always'></div>C";
        let ranges = find_page_breaks(text);
        assert_eq!(ranges.len(), 2);
        assert!(ranges[0].end <= ranges[1].start);
        assert_eq!(&text[..ranges[0].start], "A");
        assert_eq!(&text[ranges[1].end..], "C");
    }
}
