// SPDX-License-Identifier: MIT
//!
//! Lambda event deserialize
//!
//! Each trigger delivers its own JSON envelope. They are decoded here and
//! normalized into [`LambdaHttpEvent`], which converts to an `http::Request`.
//!
use crate::error::Result;
use base64::Engine as _;
use bytes::Bytes;
use http_body_util::Full;
use serde::Deserialize;
use std::collections::HashMap;
use std::net::IpAddr;
use std::str::FromStr;
use tracing::trace;

/// Request body type handed to the hosted web application
pub type RequestBody = Full<Bytes>;

/// Client address reported by the trigger, stored in request extensions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceIp(pub IpAddr);

/// API Gateway payload format version 2.0
/// https://docs.aws.amazon.com/apigateway/latest/developerguide/http-api-develop-integrations-lambda.html
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ApiGatewayV2 {
    // version: String,
    // route_key: String,
    pub(crate) raw_path: String,
    #[serde(default)]
    pub(crate) raw_query_string: String,
    pub(crate) cookies: Option<Vec<String>>,
    pub(crate) headers: Option<HashMap<String, String>>,
    pub(crate) body: Option<String>,
    #[serde(default)]
    pub(crate) is_base64_encoded: bool,
    pub(crate) request_context: ApiGatewayV2RequestContext,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ApiGatewayV2RequestContext {
    /// The full domain name used to invoke the API. This should be the same as the incoming Host header.
    pub(crate) domain_name: Option<String>,
    pub(crate) http: Http,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Http {
    /// The HTTP method used. Valid values include: DELETE, GET, HEAD, OPTIONS, PATCH, POST, and PUT.
    pub(crate) method: String,
    /// The source IP address of the TCP connection making the request to API Gateway.
    pub(crate) source_ip: Option<String>,
}

/// API Gateway REST API, payload format version 1.0
/// https://docs.aws.amazon.com/apigateway/latest/developerguide/set-up-lambda-proxy-integrations.html
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ApiGatewayRest {
    pub(crate) http_method: String,
    /// Percent decoded by API Gateway
    pub(crate) path: String,
    pub(crate) headers: Option<HashMap<String, String>>,
    pub(crate) multi_value_headers: Option<HashMap<String, Vec<String>>>,
    pub(crate) query_string_parameters: Option<HashMap<String, String>>,
    pub(crate) multi_value_query_string_parameters: Option<HashMap<String, Vec<String>>>,
    pub(crate) body: Option<String>,
    #[serde(default)]
    pub(crate) is_base64_encoded: bool,
    #[serde(default)]
    pub(crate) request_context: ApiGatewayRestRequestContext,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ApiGatewayRestRequestContext {
    pub(crate) domain_name: Option<String>,
    #[serde(default)]
    pub(crate) identity: ApiGatewayRestIdentity,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ApiGatewayRestIdentity {
    pub(crate) source_ip: Option<String>,
}

/// Application Load Balancer target group request
/// https://docs.aws.amazon.com/elasticloadbalancing/latest/application/lambda-functions.html
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Alb {
    pub(crate) http_method: String,
    /// Passed as received, already URL encoded
    pub(crate) path: String,
    pub(crate) headers: Option<HashMap<String, String>>,
    pub(crate) multi_value_headers: Option<HashMap<String, Vec<String>>>,
    pub(crate) query_string_parameters: Option<HashMap<String, String>>,
    pub(crate) multi_value_query_string_parameters: Option<HashMap<String, Vec<String>>>,
    pub(crate) body: Option<String>,
    #[serde(default)]
    pub(crate) is_base64_encoded: bool,
}

// Path in API Gateway events is percent decoded
// Path containing space or UTF-8 char is
// required to percent encoded again before passed to web frameworks
// See RFC3986 3.3 Path for valid chars.
const RFC3986_PATH_ESCAPE_SET: &percent_encoding::AsciiSet = &percent_encoding::CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'+')
    .add(b':')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'@')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

// Query keys and values: everything but RFC3986 unreserved chars
const RFC3986_QUERY_ESCAPE_SET: &percent_encoding::AsciiSet = &percent_encoding::NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

fn encode_path(path: &str) -> String {
    percent_encoding::utf8_percent_encode(path, RFC3986_PATH_ESCAPE_SET).to_string()
}

fn encode_query_component(component: &str) -> String {
    percent_encoding::utf8_percent_encode(component, RFC3986_QUERY_ESCAPE_SET).to_string()
}

// Multi-value form preferred, keys sorted so the query string is stable
fn query_pairs(
    single: Option<HashMap<String, String>>,
    multi: Option<HashMap<String, Vec<String>>>,
) -> Vec<(String, String)> {
    let mut pairs: Vec<(String, String)> = match (multi, single) {
        (Some(multi), _) if !multi.is_empty() => multi
            .into_iter()
            .flat_map(|(k, values)| values.into_iter().map(move |v| (k.clone(), v)))
            .collect(),
        (_, Some(single)) => single.into_iter().collect(),
        _ => Vec::new(),
    };
    // Stable sort keeps the order of repeated keys
    pairs.sort_by(|a, b| a.0.cmp(&b.0));
    pairs
}

fn header_pairs(
    single: Option<HashMap<String, String>>,
    multi: Option<HashMap<String, Vec<String>>>,
) -> Vec<(String, String)> {
    match (multi, single) {
        (Some(multi), _) if !multi.is_empty() => multi
            .into_iter()
            .flat_map(|(k, values)| values.into_iter().map(move |v| (k.clone(), v)))
            .collect(),
        (_, Some(single)) => single.into_iter().collect(),
        _ => Vec::new(),
    }
}

fn join_path_and_query(path: String, query: String) -> String {
    if query.is_empty() {
        path
    } else {
        format!("{}?{}", path, query)
    }
}

///
/// Trigger independent view of an incoming HTTP request
///
#[derive(Debug)]
pub(crate) struct LambdaHttpEvent {
    pub(crate) method: String,
    /// Percent encoded path with optional `?query`
    pub(crate) path_and_query: String,
    /// Authority when the trigger reports one
    pub(crate) domain_name: Option<String>,
    pub(crate) headers: Vec<(String, String)>,
    pub(crate) body: Option<String>,
    pub(crate) is_base64_encoded: bool,
    pub(crate) source_ip: Option<String>,
    /// Request arrived with `multiValueHeaders`
    pub(crate) multi_value_headers: bool,
}

impl From<ApiGatewayV2> for LambdaHttpEvent {
    fn from(event: ApiGatewayV2) -> Self {
        let mut headers: Vec<(String, String)> =
            event.headers.unwrap_or_default().into_iter().collect();
        if let Some(cookies) = event.cookies.filter(|c| !c.is_empty()) {
            headers.push(("cookie".to_string(), cookies.join("; ")));
        }

        Self {
            method: event.request_context.http.method,
            path_and_query: join_path_and_query(
                encode_path(&event.raw_path),
                event.raw_query_string,
            ),
            domain_name: event.request_context.domain_name,
            headers,
            body: event.body,
            is_base64_encoded: event.is_base64_encoded,
            source_ip: event.request_context.http.source_ip,
            multi_value_headers: false,
        }
    }
}

impl From<ApiGatewayRest> for LambdaHttpEvent {
    fn from(event: ApiGatewayRest) -> Self {
        let query = query_pairs(
            event.query_string_parameters,
            event.multi_value_query_string_parameters,
        )
        .iter()
        .map(|(k, v)| format!("{}={}", encode_query_component(k), encode_query_component(v)))
        .collect::<Vec<_>>()
        .join("&");
        let multi_value_headers = event.multi_value_headers.is_some();

        Self {
            method: event.http_method,
            path_and_query: join_path_and_query(encode_path(&event.path), query),
            domain_name: event.request_context.domain_name,
            headers: header_pairs(event.headers, event.multi_value_headers),
            body: event.body,
            is_base64_encoded: event.is_base64_encoded,
            source_ip: event.request_context.identity.source_ip,
            multi_value_headers,
        }
    }
}

impl From<Alb> for LambdaHttpEvent {
    fn from(event: Alb) -> Self {
        let query = query_pairs(
            event.query_string_parameters,
            event.multi_value_query_string_parameters,
        )
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");
        let multi_value_headers = event.multi_value_headers.is_some();

        Self {
            method: event.http_method,
            path_and_query: join_path_and_query(event.path, query),
            domain_name: None,
            headers: header_pairs(event.headers, event.multi_value_headers),
            body: event.body,
            is_base64_encoded: event.is_base64_encoded,
            source_ip: None,
            multi_value_headers,
        }
    }
}

impl LambdaHttpEvent {
    /// First value of a header, case insensitive
    pub(crate) fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Client address, X-Forwarded-For used when the trigger has no source IP field
    pub(crate) fn client_ip(&self) -> Option<IpAddr> {
        self.source_ip
            .as_deref()
            .or_else(|| {
                self.header("x-forwarded-for")
                    .and_then(|xff| xff.split(',').next())
            })
            .and_then(|ip| IpAddr::from_str(ip.trim()).ok())
    }

    /// URI scheme from X-Forwarded-Proto, first hop only, https unless it says http
    fn scheme(&self) -> &'static str {
        match self
            .header("x-forwarded-proto")
            .and_then(|proto| proto.split(',').next())
            .map(str::trim)
        {
            Some(proto) if proto.eq_ignore_ascii_case("http") => "http",
            _ => "https",
        }
    }

    /// http::Request from Lambda event
    pub(crate) fn into_http_request(self) -> Result<http::Request<RequestBody>> {
        use http::header::{HeaderName, HeaderValue};
        use http::Method;

        // URI
        let authority = self
            .domain_name
            .clone()
            .or_else(|| self.header("host").map(str::to_string));
        let uri = match authority {
            Some(authority) => {
                format!("{}://{}{}", self.scheme(), authority, self.path_and_query)
            }
            None => self.path_and_query.clone(),
        };

        // Method
        let method = Method::from_bytes(self.method.as_bytes())?;
        let source_ip = self.client_ip();

        // Construct request
        let mut reqbuilder = http::Request::builder().method(method).uri(&uri);

        // headers
        if let Some(headers_mut) = reqbuilder.headers_mut() {
            for (k, v) in &self.headers {
                if let (Ok(k), Ok(v)) = (
                    HeaderName::from_str(k.as_str()),
                    HeaderValue::from_str(v.as_str()),
                ) {
                    headers_mut.append(k, v);
                } else {
                    trace!("Skipping unrepresentable header {}", k);
                }
            }
        }

        if let Some(ip) = source_ip {
            reqbuilder = reqbuilder.extension(SourceIp(ip));
        }

        // Body
        let body = match self.body {
            Some(eventbody) if self.is_base64_encoded => {
                // base64 decode
                let binarybody = base64::engine::general_purpose::STANDARD.decode(&eventbody)?;
                Bytes::from(binarybody)
            }
            Some(eventbody) => Bytes::from(eventbody),
            None => Bytes::new(),
        };

        Ok(reqbuilder.body(Full::new(body))?)
    }
}
