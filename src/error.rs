// SPDX-License-Identifier: MIT
//!
//! Error type shared by the adapter, server and bootstrap helpers
//!
use thiserror::Error;

/// Boxed error as produced by tower services and http bodies
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Result type for hosting operations
pub type Result<T> = std::result::Result<T, HostingError>;

/// Errors raised while translating Lambda events or bootstrapping a handler
#[derive(Error, Debug)]
pub enum HostingError {
    /// Lambda payload does not match the configured event source schema
    #[error("event does not match {source_kind} schema: {error}")]
    Event {
        source_kind: &'static str,
        #[source]
        error: serde_json::Error,
    },

    /// HTTP method in the event is not a valid token
    #[error("invalid HTTP method: {0}")]
    Method(#[from] http::method::InvalidMethod),

    /// Request or response could not be assembled
    #[error("HTTP error: {0}")]
    Http(#[from] http::Error),

    /// Request body flagged as base64 but not decodable
    #[error("invalid base64 request body: {0}")]
    Base64(#[from] base64::DecodeError),

    /// Response body stream failed
    #[error("response body error: {0}")]
    Body(#[source] BoxError),

    /// The hosted web application returned an error
    #[error("web application error: {0}")]
    Service(#[source] BoxError),

    /// A required service was not registered in the container
    #[error("service not registered: {0}")]
    MissingService(&'static str),

    /// A service depends on itself, directly or through other services
    #[error("circular dependency while resolving {0}")]
    CircularDependency(&'static str),

    /// Bootstrap template input rejected
    #[error("invalid bootstrap template: {0}")]
    Template(String),
}
