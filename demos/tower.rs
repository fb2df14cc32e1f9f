use bytes::Bytes;
use http::header::{HeaderValue, CONTENT_TYPE};
use http_body_util::Full;
use lambda_web_hosting::{
    EncodingOptions, EventSource, LambdaError, LambdaHost, RequestBody, ResponseContentEncoding,
    SourceIp,
};
use std::convert::Infallible;
use tracing_subscriber::EnvFilter;

// Reports the client address, served as CSV
async fn whoami(req: http::Request<RequestBody>) -> Result<http::Response<Full<Bytes>>, Infallible> {
    let ip = req
        .extensions()
        .get::<SourceIp>()
        .map(|SourceIp(ip)| ip.to_string())
        .unwrap_or_default();
    let mut response = http::Response::new(Full::new(Bytes::from(format!("ip\n{}\n", ip))));
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("text/csv"));
    Ok(response)
}

#[tokio::main]
async fn main() -> Result<(), LambdaError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_ansi(false)
        .without_time()
        .init();

    // Trigger chosen at deploy time, e.g. LAMBDA_EVENT_SOURCE=alb
    let source: EventSource = std::env::var("LAMBDA_EVENT_SOURCE")
        .unwrap_or_else(|_| "RestApi".to_string())
        .parse()?;

    // API Gateway must see CSV as binary to serve it as a download
    let options = EncodingOptions::builder()
        .content_type("text/csv", ResponseContentEncoding::Base64)
        .build();

    LambdaHost::new(source)
        .encoding_options(options)
        .build(tower::service_fn(whoami))
        .start()
        .await
}
