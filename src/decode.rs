//! Base64 content decoding.
//!
//! The contents API returns file bodies as standard base64, wrapped with a
//! newline every 60 characters. Line breaks are stripped before decoding
//! and the bytes are read as UTF-8, replacing invalid sequences.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use tracing::warn;

use crate::error::DecodeError;

const LINE_WIDTH: usize = 60;

pub fn decode_content(encoded: &str) -> Result<String, DecodeError> {
    let compact: String = encoded
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    let bytes = STANDARD.decode(compact.as_bytes())?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Like [`decode_content`], but logs and yields an empty string on failure.
///
/// An empty result is indistinguishable from an empty file; callers that
/// need the difference use [`decode_content`].
pub fn decode_content_or_empty(encoded: &str) -> String {
    decode_content(encoded).unwrap_or_else(|e| {
        warn!(error = %e, "failed to decode file content, treating as empty");
        String::new()
    })
}

/// Encodes text the way the contents API does, wrapped at 60 columns.
pub fn encode_content(text: &str) -> String {
    let encoded = STANDARD.encode(text.as_bytes());
    let mut wrapped = String::with_capacity(encoded.len() + encoded.len() / LINE_WIDTH + 1);
    for (i, c) in encoded.chars().enumerate() {
        if i > 0 && i % LINE_WIDTH == 0 {
            wrapped.push('\n');
        }
        wrapped.push(c);
    }
    wrapped.push('\n');
    wrapped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_plain_base64() {
        assert_eq!(decode_content("aGVsbG8=").unwrap(), "hello");
    }

    #[test]
    fn test_decodes_wrapped_base64() {
        let text = "---\ntitle: \"Hooks\"\n---\n".repeat(10);
        let encoded = encode_content(&text);
        assert!(encoded.lines().count() > 1);
        assert_eq!(decode_content(&encoded).unwrap(), text);
    }

    #[test]
    fn test_decodes_utf8() {
        let text = "# 리액트 훅 가이드";
        assert_eq!(decode_content(&encode_content(text)).unwrap(), text);
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        // 0xff is never valid UTF-8.
        let encoded = STANDARD.encode([b'a', 0xff, b'b']);
        assert_eq!(decode_content(&encoded).unwrap(), "a\u{fffd}b");
    }

    #[test]
    fn test_malformed_base64_is_an_error() {
        assert!(decode_content("not*base64!").is_err());
    }

    #[test]
    fn test_malformed_base64_recovers_to_empty() {
        assert_eq!(decode_content_or_empty("not*base64!"), "");
    }

    #[test]
    fn test_empty_input_is_empty_text() {
        assert_eq!(decode_content("").unwrap(), "");
    }
}
