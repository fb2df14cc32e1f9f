// SPDX-License-Identifier: MIT
//!
//! Host tower/hyper web applications on AWS Lambda
//!
//! The function is deployed behind one trigger, API Gateway REST API,
//! API Gateway HTTP API or an Application Load Balancer. Events from that
//! trigger are translated into `http::Request`s for the application and its
//! responses back into the trigger's response envelope.
//!
mod brotli;
mod request;
#[cfg(test)]
mod test_consts;

pub mod adapter;
pub mod bootstrap;
pub mod encoding;
pub mod error;
pub mod server;
pub mod services;

pub use adapter::{EventAdapter, EventSource, ParseEventSourceError};
pub use encoding::{EncodingOptions, EncodingOptionsBuilder, EncodingRules, ResponseContentEncoding};
pub use error::{HostingError, Result};
pub use request::{RequestBody, SourceIp};
pub use server::{run_on_lambda, LambdaHost, LambdaServer};

pub use lambda_runtime::{self, Context as LambdaContext, Error as LambdaError, LambdaEvent};
pub use serde_json;

/// Returns true if it is running on AWS Lambda
pub fn is_running_on_lambda() -> bool {
    std::env::var("AWS_LAMBDA_RUNTIME_API").is_ok()
}
