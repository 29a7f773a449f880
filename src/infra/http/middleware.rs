use std::time::Instant;

use axum::{
    body::Body,
    http::{Request, Uri, uri::PathAndQuery},
    middleware::Next,
    response::Response,
};
use tracing::{debug, error, warn};
use uuid::Uuid;

use crate::application::error::ErrorReport;

#[derive(Clone)]
pub struct RequestContext {
    pub request_id: String,
}

pub async fn set_request_context(mut request: Request<Body>, next: Next) -> Response {
    let request_id = Uuid::new_v4().to_string();
    let ctx = RequestContext {
        request_id: request_id.clone(),
    };
    request.extensions_mut().insert(ctx.clone());

    let mut response = next.run(request).await;
    response.extensions_mut().insert(ctx);
    response
}

/// Leading path segments that route to a page or a static mount.
const ROUTED_SEGMENTS: [&str; 7] = ["about", "contact", "post", "_health", "css", "js", "assets"];

/// Lowercase the first path segment when it names a route, so `/About` and
/// `/POST/hello-world` reach their handlers. Slugs and file names keep their case.
pub fn fold_route_case(mut request: Request<Body>) -> Request<Body> {
    let Some(rewritten) = folded_path_and_query(request.uri()) else {
        return request;
    };

    let mut parts = request.uri().clone().into_parts();
    parts.path_and_query = Some(rewritten);
    if let Ok(uri) = Uri::from_parts(parts) {
        *request.uri_mut() = uri;
    }
    request
}

fn folded_path_and_query(uri: &Uri) -> Option<PathAndQuery> {
    let rest = uri.path().strip_prefix('/')?;
    let (head, tail) = match rest.find('/') {
        Some(index) => rest.split_at(index),
        None => (rest, ""),
    };

    let segment = ROUTED_SEGMENTS
        .iter()
        .find(|segment| head.eq_ignore_ascii_case(segment))?;
    if head == *segment {
        return None;
    }

    let rewritten = match uri.query() {
        Some(query) => format!("/{segment}{tail}?{query}"),
        None => format!("/{segment}{tail}"),
    };
    rewritten.parse().ok()
}

pub async fn log_responses(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = Instant::now();

    let request_id = request
        .extensions()
        .get::<RequestContext>()
        .map(|ctx| ctx.request_id.clone())
        .unwrap_or_default();

    let mut response = next.run(request).await;
    let status = response.status();
    let elapsed_ms = start.elapsed().as_millis();

    if !(status.is_client_error() || status.is_server_error()) {
        debug!(
            target = "slate::http::response",
            status = status.as_u16(),
            method = %method,
            path = %uri.path(),
            elapsed_ms = elapsed_ms,
            request_id = request_id,
            "request served",
        );
        return response;
    }

    let report = response.extensions_mut().remove::<ErrorReport>();
    let (source, messages) = match report {
        Some(report) => (report.source, report.messages),
        None => ("unknown", Vec::new()),
    };
    let detail = messages
        .first()
        .cloned()
        .unwrap_or_else(|| "no diagnostic available".to_string());

    if status.is_server_error() {
        error!(
            target = "slate::http::response",
            status = status.as_u16(),
            method = %method,
            path = %uri.path(),
            query = uri.query().unwrap_or(""),
            elapsed_ms = elapsed_ms,
            source = source,
            detail = %detail,
            chain = ?messages,
            request_id = request_id,
            "request failed",
        );
    } else {
        warn!(
            target = "slate::http::response",
            status = status.as_u16(),
            method = %method,
            path = %uri.path(),
            query = uri.query().unwrap_or(""),
            elapsed_ms = elapsed_ms,
            source = source,
            detail = %detail,
            chain = ?messages,
            request_id = request_id,
            "client request error",
        );
    }

    response
}
