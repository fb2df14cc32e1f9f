// SPDX-License-Identifier: MIT
//!
//! Run a tower/hyper web application on AWS Lambda
//!
use crate::adapter::{EventAdapter, EventSource};
use crate::encoding::EncodingOptions;
use crate::error::{BoxError, HostingError, Result};
use crate::request::RequestBody;
use http_body_util::BodyExt;
use lambda_runtime::{service_fn, Error as LambdaError, LambdaEvent};
use std::sync::Arc;
use tower::{Service, ServiceExt};
use tracing::{debug, warn};

///
/// Hosting configuration, resolved once at process start
///
/// ```no_run
/// use lambda_web_hosting::{EncodingOptions, EventSource, LambdaHost, ResponseContentEncoding};
/// # async fn app(_req: http::Request<lambda_web_hosting::RequestBody>)
/// #     -> Result<http::Response<String>, std::convert::Infallible> { unimplemented!() }
///
/// # async fn run() -> Result<(), lambda_web_hosting::LambdaError> {
/// let options = EncodingOptions::builder()
///     .content_type("application/x-msgpack", ResponseContentEncoding::Base64)
///     .build();
/// LambdaHost::new(EventSource::RestApi)
///     .encoding_options(options)
///     .build(tower::service_fn(app))
///     .start()
///     .await
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct LambdaHost {
    source: EventSource,
    encoding_options: Option<EncodingOptions>,
}

impl LambdaHost {
    pub fn new(source: EventSource) -> Self {
        Self {
            source,
            encoding_options: None,
        }
    }

    pub fn encoding_options(mut self, options: EncodingOptions) -> Self {
        self.encoding_options = Some(options);
        self
    }

    /// Adapter for the configured trigger, encoding options registered
    pub fn adapter(&self) -> EventAdapter {
        EventAdapter::with_encoding_options(self.source, self.encoding_options.as_ref())
    }

    pub fn build<S>(self, service: S) -> LambdaServer<S> {
        LambdaServer::new(self.adapter(), service)
    }
}

///
/// Server bridging a web application to the Lambda invoke loop
///
/// Holds exactly one adapter and one service.
/// [`LambdaServer::start`] consumes the server, so it runs at most once.
///
pub struct LambdaServer<S> {
    adapter: Arc<EventAdapter>,
    service: S,
}

impl<S> LambdaServer<S> {
    pub fn new(adapter: EventAdapter, service: S) -> Self {
        Self {
            adapter: Arc::new(adapter),
            service,
        }
    }

    pub fn adapter(&self) -> &EventAdapter {
        &self.adapter
    }
}

impl<S, B> LambdaServer<S>
where
    S: Service<http::Request<RequestBody>, Response = http::Response<B>> + Clone + Send + Sync + 'static,
    S::Error: Into<BoxError>,
    S::Future: Send,
    B: http_body::Body + Send,
    B::Data: Send,
    B::Error: Into<BoxError>,
{
    /// Lambda handler function
    /// Parse Lambda event as HTTP request,
    /// serialize the web application's response to Lambda JSON response
    pub async fn handle(&self, event: LambdaEvent<serde_json::Value>) -> Result<serde_json::Value> {
        let (payload, context) = event.into_parts();
        let request_id = context.request_id.clone();

        // Parse request
        let (mut request, response_context) = self.adapter.to_http_request(payload)?;
        request.extensions_mut().insert(context);
        debug!(
            "{} request {}: {} {}",
            self.adapter.source(),
            request_id,
            request.method(),
            request.uri()
        );

        // Call web application
        let response = self
            .service
            .clone()
            .oneshot(request)
            .await
            .map_err(|err| HostingError::Service(err.into()))?;

        // Collect body
        let (parts, body) = response.into_parts();
        let body = body
            .collect()
            .await
            .map_err(|err| HostingError::Body(err.into()))?
            .to_bytes();

        Ok(self
            .adapter
            .to_lambda_response(&response_context, parts, body))
    }

    /// Register the handler with the Lambda invoke loop and run until it exits
    pub async fn start(self) -> std::result::Result<(), LambdaError> {
        let server = Arc::new(self);
        lambda_runtime::run(service_fn(move |event: LambdaEvent<serde_json::Value>| {
            let server = server.clone();
            async move {
                server.handle(event).await.map_err(|err| {
                    warn!("Invocation failed: {}", err);
                    LambdaError::from(err)
                })
            }
        }))
        .await
    }
}

/// Run web application on AWS Lambda
///
/// ```no_run
/// use axum::{routing::get, Router};
/// use lambda_web_hosting::{is_running_on_lambda, run_on_lambda, EventSource, LambdaError};
///
/// #[tokio::main]
/// async fn main() -> Result<(), LambdaError> {
///     let app = Router::new().route("/", get(|| async { "Hello" }));
///     if is_running_on_lambda() {
///         // Run on AWS Lambda
///         run_on_lambda(EventSource::HttpApi, app).await?;
///     }
///     Ok(())
/// }
/// ```
///
pub async fn run_on_lambda<S, B>(source: EventSource, service: S) -> std::result::Result<(), LambdaError>
where
    S: Service<http::Request<RequestBody>, Response = http::Response<B>> + Clone + Send + Sync + 'static,
    S::Error: Into<BoxError>,
    S::Future: Send,
    B: http_body::Body + Send,
    B::Data: Send,
    B::Error: Into<BoxError>,
{
    LambdaHost::new(source).build(service).start().await
}
