use axum::{routing::get, Router};
use lambda_web_hosting::{is_running_on_lambda, run_on_lambda, EventSource, LambdaError};
use tracing_subscriber::EnvFilter;

// basic handler that responds with a static string
async fn root() -> &'static str {
    "Hello, World!"
}

#[tokio::main]
async fn main() -> Result<(), LambdaError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_ansi(false)
        .without_time()
        .init();

    // build our application with a route
    let app = Router::new()
        // `GET /` goes to `root`
        .route("/", get(root));

    if is_running_on_lambda() {
        // Run app on AWS Lambda behind an HTTP API
        run_on_lambda(EventSource::HttpApi, app).await?;
    } else {
        // Run app on local server
        let listener = tokio::net::TcpListener::bind("127.0.0.1:8080").await?;
        axum::serve(listener, app).await?;
    }
    Ok(())
}
