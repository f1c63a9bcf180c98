//! Normalizer: turn raw source text into canonical markdown.
//!
//! Documents exported from word processors and note apps carry a handful of
//! artefacts that either show up in print or break block-level parsing:
//!
//! - byte-order marks and zero-width spaces scattered through the text
//! - decorative horizontal-rule lines (`---`, `***`, `___`) between sections
//! - chapter headings (`**ตอนที่ …**`) glued to the previous line, so the
//!   renderer folds them into the preceding paragraph
//!
//! ## Rule Order
//!
//! Invisible marks go first so that a line like `\u{FEFF}---` is seen as a
//! rule, and rule lines go before heading spacing so a removed rule that sat
//! between text and a chapter heading still leaves the heading separated.

/// Zero-width characters stripped anywhere in the document.
const INVISIBLE_MARKS: [char; 2] = ['\u{FEFF}', '\u{200B}'];

/// Opening of a bold chapter heading ("Chapter" in Thai).
const CHAPTER_HEADING: &str = "**ตอนที่";

/// Normalise raw markdown source into canonical text.
///
/// Total and deterministic; applying it twice gives the same result as
/// applying it once.
///
/// Rules (applied in order):
/// 0. Canonicalise line endings (CRLF / CR → LF), when enabled
/// 1. Strip byte-order marks and zero-width spaces
/// 2. Blank out standalone horizontal-rule lines, keeping their line breaks
/// 3. Ensure a blank line before each chapter heading
pub fn normalize(source: &str) -> String {
    normalize_with(source, true)
}

/// Like [`normalize`], with the line-ending rule made optional.
///
/// With `normalize_line_endings = false` a CRLF line keeps its `\r`, which
/// is not horizontal whitespace, so such lines are never treated as rules.
pub fn normalize_with(source: &str, normalize_line_endings: bool) -> String {
    let s = if normalize_line_endings {
        normalise_line_endings(source)
    } else {
        source.to_string()
    };
    let s = remove_invisible_marks(&s);
    let s = remove_rule_lines(&s);
    space_chapter_headings(&s)
}

// ── Rule 0: Normalise line endings ───────────────────────────────────────────

fn normalise_line_endings(input: &str) -> String {
    input.replace("\r\n", "\n").replace('\r', "\n")
}

// ── Rule 1: Remove invisible marks ───────────────────────────────────────────

fn remove_invisible_marks(input: &str) -> String {
    input.replace(INVISIBLE_MARKS, "")
}

// ── Rule 2: Remove standalone horizontal rules ───────────────────────────────

/// Empties every line that is only a thematic break. The line break stays,
/// so the blocks above and below remain separate paragraphs.
fn remove_rule_lines(input: &str) -> String {
    input
        .split_inclusive('\n')
        .map(|line| {
            let body = line.strip_suffix('\n').unwrap_or(line);
            if is_rule_line(body) {
                &line[body.len()..]
            } else {
                line
            }
        })
        .collect()
}

/// Three or more of the same character from `-`, `*`, `_`, optionally padded
/// with spaces or tabs.
fn is_rule_line(line: &str) -> bool {
    let body = line.trim_matches([' ', '\t']);
    let mut chars = body.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    matches!(first, '-' | '*' | '_') && body.len() >= 3 && chars.all(|c| c == first)
}

// ── Rule 3: Blank line before chapter headings ───────────────────────────────

/// Turns a single `\n` right before `**ตอนที่` into `\n\n`. A newline that
/// already follows another newline is left alone.
fn space_chapter_headings(input: &str) -> String {
    let mut result = String::with_capacity(input.len() + 16);
    let mut rest = input;
    while let Some(pos) = rest.find(CHAPTER_HEADING) {
        let (before, after) = rest.split_at(pos);
        result.push_str(before);
        if result.ends_with('\n') && !result[..result.len() - 1].ends_with('\n') {
            result.push('\n');
        }
        result.push_str(CHAPTER_HEADING);
        rest = &after[CHAPTER_HEADING.len()..];
    }
    result.push_str(rest);
    result
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalise_line_endings() {
        assert_eq!(normalise_line_endings("a\r\nb\rc"), "a\nb\nc");
    }

    #[test]
    fn test_remove_invisible_marks() {
        let input = "\u{FEFF}hello\u{200B}world\u{200B}";
        assert_eq!(remove_invisible_marks(input), "helloworld");
    }

    #[test]
    fn test_invisible_marks_keep_other_chars_in_order() {
        let input = "a\u{FEFF}b\u{200C}c";
        // Only BOM and ZWSP are stripped; ZWNJ is left as-is.
        assert_eq!(remove_invisible_marks(input), "ab\u{200C}c");
    }

    #[test]
    fn test_rule_line_detection() {
        assert!(is_rule_line("---"));
        assert!(is_rule_line("____"));
        assert!(is_rule_line("*****"));
        assert!(is_rule_line(" \t--- \t"));
        assert!(!is_rule_line("--"));
        assert!(!is_rule_line("-*-"));
        assert!(!is_rule_line("--*--"));
        assert!(!is_rule_line("--- text"));
        assert!(!is_rule_line("- - -"));
        assert!(!is_rule_line(""));
        assert!(!is_rule_line("---\r"));
    }

    #[test]
    fn test_remove_rule_lines() {
        assert_eq!(remove_rule_lines("a\n---\nb"), "a\n\nb");
        assert_eq!(remove_rule_lines("a\n  ***  \nb"), "a\n\nb");
        assert_eq!(remove_rule_lines("a\n____"), "a\n");
        assert_eq!(remove_rule_lines("---"), "");
    }

    #[test]
    fn test_rule_between_paragraphs_keeps_two_blocks() {
        let out = normalize("End of scene.\n***\nNext scene.");
        assert_eq!(out, "End of scene.\n\nNext scene.");
        assert_eq!(out.split("\n\n").count(), 2);
    }

    #[test]
    fn test_rule_lines_with_content_survive() {
        let input = "--- text\n-*-\n--*--\n";
        assert_eq!(remove_rule_lines(input), input);
    }

    #[test]
    fn test_chapter_heading_gets_blank_line() {
        assert_eq!(
            space_chapter_headings("foo\n**ตอนที่ 1**"),
            "foo\n\n**ตอนที่ 1**"
        );
    }

    #[test]
    fn test_chapter_heading_already_spaced() {
        let input = "foo\n\n**ตอนที่ 1**";
        assert_eq!(space_chapter_headings(input), input);
    }

    #[test]
    fn test_chapter_heading_mid_line_untouched() {
        let input = "see **ตอนที่ 2** below";
        assert_eq!(space_chapter_headings(input), input);
    }

    #[test]
    fn test_table_of_contents() {
        let input = "สารบัญ\n**ตอนที่ 1**\n**ตอนที่ 2**\n**ตอนที่ 3**";
        assert_eq!(
            space_chapter_headings(input),
            "สารบัญ\n\n**ตอนที่ 1**\n\n**ตอนที่ 2**\n\n**ตอนที่ 3**"
        );
    }

    #[test]
    fn test_normalize_order_bom_before_rule() {
        assert_eq!(normalize("intro\n\u{FEFF}---\nbody"), "intro\n\nbody");
    }

    #[test]
    fn test_normalize_rule_removal_exposes_heading() {
        assert_eq!(
            normalize("foo\n---\n**ตอนที่ 1**"),
            "foo\n\n**ตอนที่ 1**"
        );
    }

    #[test]
    fn test_normalize_crlf() {
        assert_eq!(normalize("a\r\n---\r\nb"), "a\n\nb");
        assert_eq!(normalize_with("a\r\n---\r\nb", false), "a\r\n---\r\nb");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let samples = [
            "",
            "\n",
            "\u{FEFF}# Title\n\n---\n\ntext\u{200B}",
            "x\n---\n***\n___\n**ตอนที่ 1**\n",
            "\n**ตอนที่ 1**",
            "a\r\n\r\n**ตอนที่ 2**\r\n---",
            "--- text\n-*-\n",
            "End of scene.\n***\nNext scene.",
            "a\n---\n---\n**ตอนที่ 3**",
        ];
        for s in samples {
            let once = normalize(s);
            assert_eq!(normalize(&once), once, "not idempotent for {s:?}");
        }
    }
}
