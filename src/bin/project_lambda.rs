//! AWS Lambda handler answering projection queries over HTTP
//!
//! POST a JSON body `{"symbol": "ACME", "event_type": "inflation", "expected_rate": 3.65}`.
//! Reference tables are loaded once per cold start and shared by every invocation.

use std::path::PathBuf;

use event_projection::{
    config::{DataConfig, CONFIG_ENV_VAR},
    error::LookupError,
    DataSource, ProjectionRequest,
};
use lambda_http::{run, service_fn, Body, Error, Request, Response};
use log::{info, warn};
use serde_json::json;

fn json_response(status: u16, body: String) -> Result<Response<Body>, Error> {
    let response = Response::builder()
        .status(status)
        .header("content-type", "application/json")
        .body(Body::from(body))?;
    Ok(response)
}

async fn handle(source: &DataSource, event: Request) -> Result<Response<Body>, Error> {
    let request: ProjectionRequest = match serde_json::from_slice(event.body()) {
        Ok(request) => request,
        Err(err) => {
            warn!("Rejecting malformed request: {}", err);
            let body = json!({ "error": format!("invalid request body: {err}") });
            return json_response(400, body.to_string());
        }
    };

    match request.run(source) {
        Ok(projection) => json_response(200, serde_json::to_string(&projection)?),
        Err(err @ LookupError::NotFound { .. }) => {
            warn!("{}", err);
            json_response(404, json!({ "error": err.to_string() }).to_string())
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();

    let config_path = std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from);
    let config = DataConfig::load_or_default(config_path.as_deref())?;
    let source = DataSource::load(&config)?;
    info!("Reference tables loaded, waiting for requests");

    let source = &source;
    run(service_fn(move |event: Request| async move { handle(source, event).await })).await
}
