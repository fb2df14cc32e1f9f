// SPDX-License-Identifier: MIT
//!
//! Event-source adapter
//!
//! One adapter per process. The [`EventSource`] tag decides which envelope
//! schema is decoded and which response envelope is produced.
//!
use crate::brotli::{self, ResponseCompression};
use crate::encoding::{EncodingOptions, EncodingRules, ResponseContentEncoding};
use crate::error::{HostingError, Result};
use crate::request::{Alb, ApiGatewayRest, ApiGatewayV2, LambdaHttpEvent, RequestBody};
use base64::Engine as _;
use bytes::Bytes;
use serde::Deserialize;
use serde_json::json;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Lambda trigger the function is deployed behind
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(try_from = "String")]
pub enum EventSource {
    /// API Gateway REST API, payload format 1.0
    RestApi,
    /// API Gateway HTTP API, payload format 2.0
    HttpApi,
    /// Application Load Balancer target group
    ApplicationLoadBalancer,
}

impl EventSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventSource::RestApi => "RestApi",
            EventSource::HttpApi => "HttpApi",
            EventSource::ApplicationLoadBalancer => "ApplicationLoadBalancer",
        }
    }
}

impl fmt::Display for EventSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognized event source name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown event source {0:?}, expected RestApi, HttpApi or ApplicationLoadBalancer")]
pub struct ParseEventSourceError(String);

impl FromStr for EventSource {
    type Err = ParseEventSourceError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "restapi" | "rest" => Ok(EventSource::RestApi),
            "httpapi" | "http" | "httpapiv2" => Ok(EventSource::HttpApi),
            "applicationloadbalancer" | "alb" => Ok(EventSource::ApplicationLoadBalancer),
            _ => Err(ParseEventSourceError(s.to_string())),
        }
    }
}

impl TryFrom<String> for EventSource {
    type Error = ParseEventSourceError;

    fn try_from(s: String) -> std::result::Result<Self, Self::Error> {
        s.parse()
    }
}

/// Per-request facts the response encoder needs from the incoming event
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct ResponseContext {
    /// Client sent `Accept-Encoding: br`
    pub(crate) accepts_brotli: bool,
    /// ALB target group has multi value headers enabled
    pub(crate) multi_value_headers: bool,
}

///
/// Translates between one trigger's envelopes and HTTP messages
///
#[derive(Debug, Clone)]
pub struct EventAdapter {
    source: EventSource,
    rules: EncodingRules,
}

impl EventAdapter {
    /// Adapter with the built-in encoding rules
    pub fn new(source: EventSource) -> Self {
        Self {
            source,
            rules: EncodingRules::default(),
        }
    }

    /// Adapter with user options registered over the built-in rules
    pub fn with_encoding_options(source: EventSource, options: Option<&EncodingOptions>) -> Self {
        let mut adapter = Self::new(source);
        if let Some(options) = options {
            adapter.rules.apply(options);
        }
        adapter
    }

    pub fn source(&self) -> EventSource {
        self.source
    }

    pub fn encoding_rules(&self) -> &EncodingRules {
        &self.rules
    }

    pub fn register_content_type(&mut self, content_type: &str, encoding: ResponseContentEncoding) {
        self.rules.register_content_type(content_type, encoding);
    }

    pub fn register_content_encoding(
        &mut self,
        content_encoding: &str,
        encoding: ResponseContentEncoding,
    ) {
        self.rules.register_content_encoding(content_encoding, encoding);
    }

    /// Decode the Lambda payload with this adapter's schema
    pub(crate) fn decode_event(&self, payload: serde_json::Value) -> Result<LambdaHttpEvent> {
        let source_kind = self.source.as_str();
        let wrap = |error| HostingError::Event { source_kind, error };
        let event = match self.source {
            EventSource::RestApi => {
                LambdaHttpEvent::from(serde_json::from_value::<ApiGatewayRest>(payload).map_err(wrap)?)
            }
            EventSource::HttpApi => {
                LambdaHttpEvent::from(serde_json::from_value::<ApiGatewayV2>(payload).map_err(wrap)?)
            }
            EventSource::ApplicationLoadBalancer => {
                LambdaHttpEvent::from(serde_json::from_value::<Alb>(payload).map_err(wrap)?)
            }
        };
        Ok(event)
    }

    /// Lambda payload to http::Request, with the facts needed to encode its response
    pub(crate) fn to_http_request(
        &self,
        payload: serde_json::Value,
    ) -> Result<(http::Request<RequestBody>, ResponseContext)> {
        let event = self.decode_event(payload)?;
        let context = ResponseContext {
            accepts_brotli: brotli::client_supports_brotli(event.header("accept-encoding")),
            multi_value_headers: event.multi_value_headers,
        };
        let mut request = event.into_http_request()?;
        request.extensions_mut().insert(self.source);
        Ok((request, context))
    }

    /// HTTP response to this trigger's response envelope
    pub(crate) fn to_lambda_response(
        &self,
        context: &ResponseContext,
        mut parts: http::response::Parts,
        body: Bytes,
    ) -> serde_json::Value {
        use http::header::{HeaderValue, CONTENT_ENCODING, CONTENT_LENGTH};

        // check if response should be compressed
        let body = if context.accepts_brotli && !body.is_empty() && parts.headers.can_brotli_compress()
        {
            match brotli::compress_response_body(&body) {
                Some(compressed) => {
                    parts
                        .headers
                        .insert(CONTENT_ENCODING, HeaderValue::from_static("br"));
                    parts.headers.remove(CONTENT_LENGTH);
                    Bytes::from(compressed)
                }
                None => body,
            }
        } else {
            body
        };

        let encoding = self
            .rules
            .resolve(parts.headers.content_type(), parts.headers.content_encoding());
        let (body, is_base64_encoded) = encode_body(body, encoding);
        let status_code = parts.status.as_u16();

        debug!(
            "{} response: status {}, base64 {}",
            self.source, status_code, is_base64_encoded
        );

        match self.source {
            EventSource::RestApi => json!({
                "isBase64Encoded": is_base64_encoded,
                "statusCode": status_code,
                "multiValueHeaders": multi_value_headers(&parts.headers),
                "body": body
            }),
            EventSource::HttpApi => {
                let (headers, cookies) = headers_and_cookies(&parts.headers);
                json!({
                    "isBase64Encoded": is_base64_encoded,
                    "statusCode": status_code,
                    "headers": headers,
                    "cookies": cookies,
                    "body": body
                })
            }
            EventSource::ApplicationLoadBalancer => {
                let status_description = match parts.status.canonical_reason() {
                    Some(reason) => format!("{} {}", status_code, reason),
                    None => status_code.to_string(),
                };
                let mut response = json!({
                    "isBase64Encoded": is_base64_encoded,
                    "statusCode": status_code,
                    "statusDescription": status_description,
                    "body": body
                });
                // Response must mirror the target group's multi value setting
                if context.multi_value_headers {
                    response["multiValueHeaders"] = multi_value_headers(&parts.headers);
                } else {
                    response["headers"] = joined_headers(&parts.headers);
                }
                response
            }
        }
    }
}

// Body string and isBase64Encoded flag.
// Bodies that are not UTF-8 are always base64 encoded.
fn encode_body(body: Bytes, encoding: ResponseContentEncoding) -> (String, bool) {
    match encoding {
        ResponseContentEncoding::Base64 => {
            (base64::engine::general_purpose::STANDARD.encode(&body), true)
        }
        ResponseContentEncoding::Default => match String::from_utf8(body.to_vec()) {
            Ok(text) => (text, false),
            Err(_) => (base64::engine::general_purpose::STANDARD.encode(&body), true),
        },
    }
}

// Convert header to JSON map, every value kept
fn multi_value_headers(headers: &http::HeaderMap) -> serde_json::Value {
    let mut map = serde_json::Map::new();
    for (k, v) in headers {
        if let Ok(value_str) = v.to_str() {
            let values = map.entry(k.as_str().to_string()).or_insert_with(|| json!([]));
            if let Some(values) = values.as_array_mut() {
                values.push(json!(value_str));
            }
        }
    }
    serde_json::Value::Object(map)
}

// Convert header to JSON map, repeated values joined with comma
fn joined_headers(headers: &http::HeaderMap) -> serde_json::Value {
    let mut map = serde_json::Map::new();
    for k in headers.keys() {
        let joined = headers
            .get_all(k)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .collect::<Vec<_>>()
            .join(",");
        map.insert(k.as_str().to_string(), json!(joined));
    }
    serde_json::Value::Object(map)
}

// HTTP API v2 wants Set-Cookie values in a separate array
fn headers_and_cookies(headers: &http::HeaderMap) -> (serde_json::Value, serde_json::Value) {
    let cookies: Vec<&str> = headers
        .get_all(http::header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .collect();
    let mut without_cookies = headers.clone();
    without_cookies.remove(http::header::SET_COOKIE);
    (joined_headers(&without_cookies), json!(cookies))
}
