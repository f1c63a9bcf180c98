//! Input resolution: read a user-supplied path or URL into source text.
//!
//! This is the only asynchronous step in the crate. It either hands a
//! complete `String` to the text stages or fails with an
//! [`Md2PagesError`]; the text stages never see partial or non-text input.

use crate::error::Md2PagesError;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info};

/// Source text together with where it came from.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    /// Path or URL as given by the caller.
    pub origin: String,
    /// Full UTF-8 content.
    pub text: String,
}

/// Check if the input string looks like a URL.
pub fn is_url(input: &str) -> bool {
    input.starts_with("http://") || input.starts_with("https://")
}

/// Read the input (local file or HTTP/HTTPS URL) as UTF-8 text.
pub async fn read_source(input: &str, timeout_secs: u64) -> Result<SourceDocument, Md2PagesError> {
    if input.trim().is_empty() {
        return Err(Md2PagesError::InvalidInput {
            input: input.to_string(),
        });
    }
    let text = if is_url(input) {
        download_url(input, timeout_secs).await?
    } else {
        read_local(input).await?
    };
    Ok(SourceDocument {
        origin: input.to_string(),
        text,
    })
}

/// Read a local file, mapping I/O failures to user-facing errors.
async fn read_local(path_str: &str) -> Result<String, Md2PagesError> {
    let path = PathBuf::from(path_str);

    let bytes = match tokio::fs::read(&path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            return Err(Md2PagesError::PermissionDenied { path });
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(Md2PagesError::FileNotFound { path });
        }
        Err(e) => {
            return Err(Md2PagesError::Internal(format!(
                "Failed to read '{}': {}",
                path.display(),
                e
            )));
        }
    };

    debug!("Read {} bytes from {}", bytes.len(), path.display());
    decode_text(bytes, path_str)
}

/// Download a URL and return its body as text.
async fn download_url(url: &str, timeout_secs: u64) -> Result<String, Md2PagesError> {
    info!("Downloading markdown from: {}", url);

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| Md2PagesError::DownloadFailed {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

    let response = client.get(url).send().await.map_err(|e| {
        if e.is_timeout() {
            Md2PagesError::DownloadTimeout {
                url: url.to_string(),
                secs: timeout_secs,
            }
        } else {
            Md2PagesError::DownloadFailed {
                url: url.to_string(),
                reason: e.to_string(),
            }
        }
    })?;

    if !response.status().is_success() {
        return Err(Md2PagesError::DownloadFailed {
            url: url.to_string(),
            reason: format!("HTTP {}", response.status()),
        });
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| Md2PagesError::DownloadFailed {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

    info!("Downloaded {} bytes", bytes.len());
    decode_text(bytes.to_vec(), url)
}

/// Accept the bytes only if they are valid UTF-8. `origin` is the path or
/// URL named in the error.
pub fn decode_text(bytes: Vec<u8>, origin: &str) -> Result<String, Md2PagesError> {
    String::from_utf8(bytes).map_err(|e| Md2PagesError::NotText {
        origin: origin.to_string(),
        valid_up_to: e.utf8_error().valid_up_to(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_url() {
        assert!(is_url("https://example.com/book.md"));
        assert!(is_url("http://example.com/book.md"));
        assert!(!is_url("/tmp/book.md"));
        assert!(!is_url("book.md"));
        assert!(!is_url(""));
    }

    #[test]
    fn test_decode_text_accepts_utf8() {
        let text = decode_text("ตอนที่ 1".as_bytes().to_vec(), "a.md").unwrap();
        assert_eq!(text, "ตอนที่ 1");
    }

    #[test]
    fn test_decode_text_rejects_binary() {
        let err = decode_text(vec![b'o', b'k', 0xFF, 0xFE], "a.png").unwrap_err();
        match err {
            Md2PagesError::NotText { valid_up_to, .. } => assert_eq!(valid_up_to, 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_decode_text_names_url_origin() {
        let url = "https://example.org/cover.png";
        let err = decode_text(vec![0x89, b'P', b'N', b'G', 0xFF], url).unwrap_err();
        match err {
            Md2PagesError::NotText { origin, valid_up_to } => {
                assert_eq!(origin, url);
                assert_eq!(valid_up_to, 0);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_read_missing_file() {
        let err = read_source("/definitely/not/here.md", 5).await.unwrap_err();
        assert!(matches!(err, Md2PagesError::FileNotFound { .. }), "got: {err}");
    }

    #[tokio::test]
    async fn test_read_blank_input() {
        let err = read_source("  ", 5).await.unwrap_err();
        assert!(matches!(err, Md2PagesError::InvalidInput { .. }));
    }
}
