// SPDX-License-Identifier: MIT
//!
//! Brotli transparent compression
//! Supports
//!   Content-Encoding: br
//!
use http::header::{HeaderMap, CONTENT_ENCODING, CONTENT_TYPE};

///
/// Trait to check if reponse should be compressed
///
pub(crate) trait ResponseCompression {
    /// Content-Encoding header value
    fn content_encoding(&self) -> Option<&str>;

    /// Content-Type header value
    fn content_type(&self) -> Option<&str>;

    /// Can this response be compressed?
    #[cfg(feature = "br")]
    fn can_brotli_compress(&self) -> bool {
        // Check already compressed
        if self.content_encoding().is_some() {
            // Already compressed
            return false;
        }

        // Get Content-type header value
        if let Some(header_val) = self.content_type() {
            let ctype = header_val.trim().to_ascii_lowercase();

            // Compress when text types
            ctype.starts_with("text/")
                || ctype.starts_with("application/json")
                || ctype.starts_with("application/javascript")
                || ctype.starts_with("application/xhtml")
                || ctype.starts_with("application/xml")
                || ctype.starts_with("application/wasm")
                || ctype.starts_with("image/svg")
        } else {
            // No content-type
            false
        }
    }

    // Without Brotli support, always returns false
    #[cfg(not(feature = "br"))]
    fn can_brotli_compress(&self) -> bool {
        false
    }
}

impl ResponseCompression for HeaderMap {
    fn content_encoding(&self) -> Option<&str> {
        self.get(CONTENT_ENCODING).and_then(|val| val.to_str().ok())
    }

    fn content_type(&self) -> Option<&str> {
        self.get(CONTENT_TYPE).and_then(|val| val.to_str().ok())
    }
}

/// Does the client accept `Content-Encoding: br`?
#[cfg(feature = "br")]
pub(crate) fn client_supports_brotli(accept_encoding: Option<&str>) -> bool {
    accept_encoding
        .map(|val| {
            val.split(',').any(|coding| {
                let mut params = coding.split(';');
                let name = params.next().unwrap_or_default().trim();
                // "br;q=0" explicitly refuses
                let refused = params.any(|p| {
                    let p = p.trim();
                    p == "q=0" || p == "q=0.0" || p == "q=0.00" || p == "q=0.000"
                });
                name.eq_ignore_ascii_case("br") && !refused
            })
        })
        .unwrap_or(false)
}

#[cfg(not(feature = "br"))]
pub(crate) fn client_supports_brotli(_accept_encoding: Option<&str>) -> bool {
    false
}

/// Compress response body using Brotli.
/// Returns None when the encoder fails, the body is then sent as is.
#[cfg(feature = "br")]
pub(crate) fn compress_response_body(body: &[u8]) -> Option<Vec<u8>> {
    // Compress parameter
    let cfg = brotli::enc::BrotliEncoderParams {
        quality: 4,
        ..Default::default()
    };

    // Do Brotli compression
    let mut body_reader = std::io::Cursor::new(body);
    let mut compressed = Vec::with_capacity(body.len() / 2);
    match brotli::BrotliCompress(&mut body_reader, &mut compressed, &cfg) {
        Ok(_sz) => Some(compressed),
        Err(err) => {
            tracing::warn!("Brotli compression failed: {}", err);
            None
        }
    }
}

#[cfg(not(feature = "br"))]
pub(crate) fn compress_response_body(_body: &[u8]) -> Option<Vec<u8>> {
    None
}

#[cfg(all(test, feature = "br"))]
mod tests {
    use super::*;
    use http::HeaderValue;

    #[test]
    fn test_client_supports_brotli() {
        assert!(client_supports_brotli(Some("gzip, deflate, br")));
        assert!(client_supports_brotli(Some("BR;q=0.8")));
        assert!(!client_supports_brotli(Some("gzip, deflate")));
        assert!(!client_supports_brotli(Some("br;q=0, gzip")));
        assert!(!client_supports_brotli(None));
    }

    #[test]
    fn test_can_brotli_compress() {
        let mut headers = HeaderMap::new();
        assert!(!headers.can_brotli_compress());

        headers.insert(CONTENT_TYPE, HeaderValue::from_static("text/html; charset=utf-8"));
        assert!(headers.can_brotli_compress());

        headers.insert(CONTENT_ENCODING, HeaderValue::from_static("gzip"));
        assert!(!headers.can_brotli_compress());

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("image/png"));
        assert!(!headers.can_brotli_compress());
    }

    #[test]
    fn test_compress_response_body() {
        let body = "hello brotli ".repeat(64);
        let compressed = compress_response_body(body.as_bytes()).unwrap();
        assert!(compressed.len() < body.len());

        let mut decompressed = Vec::new();
        brotli::BrotliDecompress(&mut std::io::Cursor::new(&compressed), &mut decompressed)
            .unwrap();
        assert_eq!(decompressed, body.as_bytes());
    }
}
