use crate::app::server::SharedState;
use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderMap, HeaderValue, Method, Request, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::time::Instant;
use tracing::Instrument;

const ALLOW_METHODS: &str = "GET,POST,OPTIONS";
const ALLOW_HEADERS: &str = "content-type";

fn header_value(headers: &HeaderMap, name: &str, max_len: usize) -> Option<String> {
    let raw = headers.get(name)?.to_str().ok()?.trim();
    if raw.is_empty() || raw.len() > max_len {
        return None;
    }
    Some(raw.to_string())
}

/// `*` in the allow-list answers every request; otherwise only listed origins
/// are echoed back.
pub(crate) fn allowed_origin(allowed: &[String], origin: Option<&str>) -> Option<String> {
    if allowed.iter().any(|o| o == "*") {
        return Some("*".to_string());
    }
    let origin = origin?;
    allowed
        .iter()
        .any(|o| o == origin)
        .then(|| origin.to_string())
}

fn apply_cors_headers(resp: &mut Response, allow: &str, preflight: bool) {
    if let Ok(v) = HeaderValue::from_str(allow) {
        resp.headers_mut().insert("access-control-allow-origin", v);
    }
    if allow != "*" {
        resp.headers_mut()
            .insert("vary", HeaderValue::from_static("Origin"));
    }
    if preflight {
        resp.headers_mut().insert(
            "access-control-allow-methods",
            HeaderValue::from_static(ALLOW_METHODS),
        );
        resp.headers_mut().insert(
            "access-control-allow-headers",
            HeaderValue::from_static(ALLOW_HEADERS),
        );
    }
}

pub(crate) async fn cors_middleware(
    State(state): State<SharedState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let origin = header_value(req.headers(), "origin", 256);
    let allow = allowed_origin(state.allowed_origins(), origin.as_deref());

    if *req.method() == Method::OPTIONS {
        let mut resp = StatusCode::NO_CONTENT.into_response();
        if let Some(allow) = allow {
            apply_cors_headers(&mut resp, &allow, true);
        }
        return resp;
    }

    let mut resp = next.run(req).await;
    if let Some(allow) = allow {
        apply_cors_headers(&mut resp, &allow, false);
    }
    resp
}

pub(crate) async fn request_tracing_middleware(req: Request<Body>, next: Next) -> Response {
    let started = Instant::now();
    let method = req.method().to_string();
    let route = req.uri().path().to_string();

    let span = tracing::info_span!("http.request", method = %method, route = %route);
    let resp = next.run(req).instrument(span).await;

    tracing::debug!(
        method = %method,
        route = %route,
        status = resp.status().as_u16(),
        latency_ms = started.elapsed().as_millis() as u64,
        "request completed"
    );
    resp
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wildcard_allows_missing_origin() {
        let allowed = vec!["*".to_string()];
        assert_eq!(allowed_origin(&allowed, None).as_deref(), Some("*"));
        assert_eq!(
            allowed_origin(&allowed, Some("http://x.example")).as_deref(),
            Some("*")
        );
    }

    #[test]
    fn test_allow_list_echoes_matching_origin() {
        let allowed = vec!["http://localhost:5173".to_string()];
        assert_eq!(
            allowed_origin(&allowed, Some("http://localhost:5173")).as_deref(),
            Some("http://localhost:5173")
        );
        assert_eq!(allowed_origin(&allowed, Some("http://evil.example")), None);
        assert_eq!(allowed_origin(&allowed, None), None);
    }
}
