//! CLI binary for md2pages.
//!
//! A thin shim over the library crate that maps CLI flags
//! to `ConversionConfig` and prints results.

use anyhow::{Context, Result};
use clap::Parser;
use md2pages::{
    convert, convert_to_dir, convert_to_file, inspect, ConversionConfig, ConversionStats,
    PageSelection, PageSeparator,
};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

// ── Terminal styling ─────────────────────────────────────────────────────────

const GREEN: &str = "32";
const CYAN: &str = "36";
const BOLD: &str = "1";
const DIM: &str = "2";

/// Wrap `text` in an SGR escape sequence.
fn paint(sgr: &str, text: impl std::fmt::Display) -> String {
    format!("\x1b[{sgr}m{text}\x1b[0m")
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Print all pages to stdout, separated by page-break markers
  md2pages book.md

  # One file per page, ready for independent rendering
  md2pages book.md --out-dir pages/

  # Pages 3 to 10, joined with page-number comments
  md2pages --pages 3-10 --separator comment book.md -o excerpt.md

  # Read from a URL
  md2pages https://example.org/notes.md -o notes.md

  # Page count and title only
  md2pages --inspect-only book.md

  # JSON output with per-page fragments, stats and display values
  md2pages --json --font-size 18 --margin 15 book.md > book.json

PAGE BREAKS:
  A page ends at every empty div whose inline style sets page-break-after to
  always, in any casing or quoting:

    <div style="page-break-after: always;"></div>
    <DIV class="pb" style='color: red; Page-Break-After:ALWAYS'></DIV>

  Pages containing only whitespace or &nbsp; are dropped.

ENVIRONMENT VARIABLES:
  RUST_LOG                Override log filter (e.g. md2pages=debug)
  MD2PAGES_*              Every flag has an env equivalent, see --help
"#;

/// Split a markdown document into clean, print-ready pages.
#[derive(Parser, Debug)]
#[command(
    name = "md2pages",
    version,
    about = "Split a markdown document into clean, print-ready pages",
    long_about = "Split a markdown document (local file or URL) into standalone per-page \
markdown fragments. Invisible marks and decorative rule lines are removed, chapter headings \
are given room, and the text is cut at every page-break div.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Local markdown file path or HTTP/HTTPS URL.
    input: String,

    /// Write assembled Markdown to this file instead of stdout.
    #[arg(short, long, env = "MD2PAGES_OUTPUT", conflicts_with = "out_dir")]
    output: Option<PathBuf>,

    /// Write each page to DIR/page-NNN.md.
    #[arg(long, env = "MD2PAGES_OUT_DIR")]
    out_dir: Option<PathBuf>,

    /// Page selection: all, 5, 3-15, or 1,3,5,7.
    #[arg(long, env = "MD2PAGES_PAGES", default_value = "all")]
    pages: String,

    /// Page separator: pagebreak, none, hr, comment, or custom string.
    #[arg(long, env = "MD2PAGES_SEPARATOR", default_value = "pagebreak")]
    separator: String,

    /// Keep CRLF line endings instead of converting them to LF.
    #[arg(long, env = "MD2PAGES_KEEP_LINE_ENDINGS")]
    keep_line_endings: bool,

    /// Base font size in pixels (10–32).
    #[arg(long, env = "MD2PAGES_FONT_SIZE", default_value_t = 16.0)]
    font_size: f32,

    /// Line height as a multiple of the font size (1.0–3.0).
    #[arg(long, env = "MD2PAGES_LINE_HEIGHT", default_value_t = 1.6)]
    line_height: f32,

    /// Page margin in millimetres (0–50).
    #[arg(long, env = "MD2PAGES_MARGIN", default_value_t = 20.0)]
    margin: f32,

    /// Output structured JSON (ConversionOutput) instead of Markdown.
    #[arg(long, env = "MD2PAGES_JSON")]
    json: bool,

    /// Print document metadata only, no conversion output.
    #[arg(long)]
    inspect_only: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "MD2PAGES_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "MD2PAGES_QUIET")]
    quiet: bool,

    /// HTTP download timeout in seconds.
    #[arg(long, env = "MD2PAGES_DOWNLOAD_TIMEOUT", default_value_t = 120)]
    download_timeout: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || cli.json {
        "error"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Inspect-only mode ────────────────────────────────────────────────
    if cli.inspect_only {
        let meta = inspect(&cli.input)
            .await
            .context("Failed to inspect document")?;

        if cli.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&meta).context("Failed to serialize metadata")?
            );
        } else {
            println!("File:         {}", meta.source);
            if let Some(ref t) = meta.title {
                println!("Title:        {}", t);
            }
            println!("Pages:        {}", meta.page_count);
            println!("Size:         {} bytes", meta.source_bytes);
        }
        return Ok(());
    }

    let config = build_config(&cli)?;

    // ── Run conversion ───────────────────────────────────────────────────
    if let Some(ref dir) = cli.out_dir {
        let stats = convert_to_dir(&cli.input, dir, &config)
            .await
            .context("Conversion failed")?;
        report_written(&cli, &stats, dir);
    } else if let Some(ref output_path) = cli.output {
        let stats = convert_to_file(&cli.input, output_path, &config)
            .await
            .context("Conversion failed")?;
        report_written(&cli, &stats, output_path);
    } else {
        let output = convert(&cli.input, &config)
            .await
            .context("Conversion failed")?;

        if cli.json {
            let json =
                serde_json::to_string_pretty(&output).context("Failed to serialise output")?;
            println!("{json}");
        } else {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle
                .write_all(output.markdown.as_bytes())
                .context("Failed to write to stdout")?;
            if !output.markdown.is_empty() && !output.markdown.ends_with('\n') {
                handle
                    .write_all(b"\n")
                    .context("Failed to write to stdout")?;
            }
        }

        if !cli.quiet && !cli.json {
            eprintln!(
                "{}",
                paint(
                    DIM,
                    format_args!(
                        "{}/{} pages in {}ms",
                        output.stats.selected_pages,
                        output.stats.total_pages,
                        output.stats.total_duration_ms
                    )
                )
            );
        }
    }

    Ok(())
}

/// One-line summary after writing to disk.
fn report_written(cli: &Cli, stats: &ConversionStats, target: &Path) {
    if cli.quiet {
        return;
    }
    eprintln!(
        "{}  {}/{} pages  {}ms  →  {}",
        if stats.total_pages > 0 {
            paint(GREEN, "✔")
        } else {
            paint(CYAN, "⚠")
        },
        stats.selected_pages,
        stats.total_pages,
        stats.total_duration_ms,
        paint(BOLD, target.display()),
    );
    if stats.blank_pages_dropped > 0 {
        eprintln!(
            "   {} blank pages dropped",
            paint(DIM, stats.blank_pages_dropped)
        );
    }
}

/// Map CLI args to `ConversionConfig`.
fn build_config(cli: &Cli) -> Result<ConversionConfig> {
    let pages = parse_pages(&cli.pages)?;
    let separator = parse_separator(&cli.separator);

    ConversionConfig::builder()
        .pages(pages)
        .page_separator(separator)
        .normalize_line_endings(!cli.keep_line_endings)
        .font_size_px(cli.font_size)
        .line_height(cli.line_height)
        .margin_mm(cli.margin)
        .download_timeout_secs(cli.download_timeout)
        .build()
        .context("Invalid configuration")
}

/// Parse `--pages` (`all`, `5`, `3-15` or `1,3,5`) into a validated
/// `PageSelection`.
fn parse_pages(s: &str) -> Result<PageSelection> {
    let spec = s.trim();
    let number = |n: &str| -> Result<usize> {
        n.trim()
            .parse()
            .with_context(|| format!("Invalid page number '{}' in --pages", n.trim()))
    };

    let selection = if spec.eq_ignore_ascii_case("all") {
        PageSelection::All
    } else if spec.contains(',') {
        PageSelection::Set(spec.split(',').map(number).collect::<Result<_>>()?)
    } else if let Some((start, end)) = spec.split_once('-') {
        PageSelection::Range(number(start)?, number(end)?)
    } else {
        PageSelection::Single(number(spec)?)
    };

    selection.validate()?;
    Ok(selection)
}

/// Parse `--separator` string into `PageSeparator`.
fn parse_separator(s: &str) -> PageSeparator {
    match s.to_lowercase().as_str() {
        "pagebreak" | "page-break" => PageSeparator::PageBreak,
        "none" => PageSeparator::None,
        "hr" | "---" => PageSeparator::HorizontalRule,
        "comment" => PageSeparator::Comment,
        _ => PageSeparator::Custom(s.to_string()),
    }
}
