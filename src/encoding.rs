// SPDX-License-Identifier: MIT
//!
//! Response body encoding rules
//!
//! Lambda response envelopes carry the body as a JSON string.
//! Binary bodies must be base64 encoded and flagged with `isBase64Encoded`.
//!
use serde::Deserialize;
use std::collections::HashMap;

/// How a response body is placed into the Lambda response envelope
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ResponseContentEncoding {
    /// Body as UTF-8 text
    #[default]
    Default,
    /// Body base64 encoded, `isBase64Encoded: true`
    Base64,
}

/// User supplied encoding configuration
///
/// Immutable once built. Registered into the adapter's [`EncodingRules`]
/// when the server is constructed.
///
/// ```
/// use lambda_web_hosting::{EncodingOptions, ResponseContentEncoding};
///
/// let options = EncodingOptions::builder()
///     .content_type("application/x-msgpack", ResponseContentEncoding::Base64)
///     .content_encoding("zstd", ResponseContentEncoding::Base64)
///     .build();
/// assert_eq!(options.content_types().map(|m| m.len()), Some(1));
/// ```
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EncodingOptions {
    #[serde(default)]
    content_types: Option<HashMap<String, ResponseContentEncoding>>,
    #[serde(default)]
    content_encodings: Option<HashMap<String, ResponseContentEncoding>>,
    #[serde(default)]
    default_encoding: Option<ResponseContentEncoding>,
}

impl EncodingOptions {
    pub fn builder() -> EncodingOptionsBuilder {
        EncodingOptionsBuilder::default()
    }

    /// Content-Type to encoding mapping, if configured
    pub fn content_types(&self) -> Option<&HashMap<String, ResponseContentEncoding>> {
        self.content_types.as_ref()
    }

    /// Content-Encoding to encoding mapping, if configured
    pub fn content_encodings(&self) -> Option<&HashMap<String, ResponseContentEncoding>> {
        self.content_encodings.as_ref()
    }

    /// Treatment for responses matching no rule, if overridden
    pub fn default_encoding(&self) -> Option<ResponseContentEncoding> {
        self.default_encoding
    }
}

/// Builder for [`EncodingOptions`]
#[derive(Debug, Default)]
pub struct EncodingOptionsBuilder {
    options: EncodingOptions,
}

impl EncodingOptionsBuilder {
    pub fn content_type(mut self, content_type: &str, encoding: ResponseContentEncoding) -> Self {
        self.options
            .content_types
            .get_or_insert_with(HashMap::new)
            .insert(content_type.to_string(), encoding);
        self
    }

    pub fn content_encoding(
        mut self,
        content_encoding: &str,
        encoding: ResponseContentEncoding,
    ) -> Self {
        self.options
            .content_encodings
            .get_or_insert_with(HashMap::new)
            .insert(content_encoding.to_string(), encoding);
        self
    }

    pub fn default_encoding(mut self, encoding: ResponseContentEncoding) -> Self {
        self.options.default_encoding = Some(encoding);
        self
    }

    pub fn build(self) -> EncodingOptions {
        self.options
    }
}

// Content types a browser or client expects as raw bytes
const BINARY_CONTENT_TYPES: &[&str] = &[
    "application/octet-stream",
    "application/pdf",
    "application/zip",
    "application/gzip",
    "application/wasm",
    "application/x-protobuf",
    "image/png",
    "image/jpeg",
    "image/jpg",
    "image/gif",
    "image/webp",
    "image/avif",
    "image/x-icon",
    "image/vnd.microsoft.icon",
    "audio/mpeg",
    "video/mp4",
    "font/woff",
    "font/woff2",
];

// Compressed payloads are never valid text
const BINARY_CONTENT_ENCODINGS: &[&str] = &["gzip", "deflate", "br", "compress", "zstd"];

///
/// Lookup table deciding the treatment of each response
///
/// Starts with the built-in rules. Keys are stored lowercased.
///
#[derive(Debug, Clone)]
pub struct EncodingRules {
    content_types: HashMap<String, ResponseContentEncoding>,
    content_encodings: HashMap<String, ResponseContentEncoding>,
    default_encoding: ResponseContentEncoding,
}

impl Default for EncodingRules {
    fn default() -> Self {
        let content_types = BINARY_CONTENT_TYPES
            .iter()
            .map(|ct| (ct.to_string(), ResponseContentEncoding::Base64))
            .collect();
        let content_encodings = BINARY_CONTENT_ENCODINGS
            .iter()
            .map(|ce| (ce.to_string(), ResponseContentEncoding::Base64))
            .collect();
        Self {
            content_types,
            content_encodings,
            default_encoding: ResponseContentEncoding::Default,
        }
    }
}

impl EncodingRules {
    pub fn register_content_type(&mut self, content_type: &str, encoding: ResponseContentEncoding) {
        self.content_types.insert(media_type(content_type), encoding);
    }

    pub fn register_content_encoding(
        &mut self,
        content_encoding: &str,
        encoding: ResponseContentEncoding,
    ) {
        self.content_encodings
            .insert(content_encoding.trim().to_ascii_lowercase(), encoding);
    }

    /// Register every entry of the user options.
    /// Absent mappings are skipped.
    pub fn apply(&mut self, options: &EncodingOptions) {
        if let Some(content_types) = options.content_types() {
            for (content_type, encoding) in content_types {
                self.register_content_type(content_type, *encoding);
            }
        }
        if let Some(content_encodings) = options.content_encodings() {
            for (content_encoding, encoding) in content_encodings {
                self.register_content_encoding(content_encoding, *encoding);
            }
        }
        if let Some(default_encoding) = options.default_encoding() {
            self.default_encoding = default_encoding;
        }
    }

    /// Registered treatment for a Content-Type header value.
    /// Media type parameters such as `charset` are ignored.
    pub fn for_content_type(&self, content_type: &str) -> Option<ResponseContentEncoding> {
        self.content_types.get(&media_type(content_type)).copied()
    }

    /// Registered treatment for a Content-Encoding header value
    pub fn for_content_encoding(&self, content_encoding: &str) -> Option<ResponseContentEncoding> {
        self.content_encodings
            .get(&content_encoding.trim().to_ascii_lowercase())
            .copied()
    }

    /// Treatment of a response.
    /// Content-Encoding rule wins over Content-Type rule, then default.
    pub fn resolve(
        &self,
        content_type: Option<&str>,
        content_encoding: Option<&str>,
    ) -> ResponseContentEncoding {
        content_encoding
            .and_then(|ce| self.for_content_encoding(ce))
            .or_else(|| content_type.and_then(|ct| self.for_content_type(ct)))
            .unwrap_or(self.default_encoding)
    }
}

// "Text/CSV; charset=utf-8" -> "text/csv"
fn media_type(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}
