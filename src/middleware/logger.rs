use axum::{http::Request, middleware::Next, response::Response};
use std::time::Instant;
use tracing::{Instrument, info, info_span, warn};
use uuid::Uuid;

/// Wraps each request in a span carrying its trace id and logs the outcome.
pub async fn logger<B>(req: Request<B>, next: Next<B>) -> Response {
    let trace_id = Uuid::new_v4();
    let method = req.method().clone();
    let uri = req.uri().clone();
    let start = Instant::now();

    let span = info_span!("request", trace_id = %trace_id, method = %method, uri = %uri);
    let response = next.run(req).instrument(span).await;
    let status = response.status().as_u16();
    let elapsed_ms = start.elapsed().as_millis();

    if response.status().is_server_error() {
        warn!(trace_id = %trace_id, method = %method, uri = %uri, status, elapsed_ms, "Request failed");
    } else {
        info!(trace_id = %trace_id, method = %method, uri = %uri, status, elapsed_ms, "Request log");
    }
    response
}
