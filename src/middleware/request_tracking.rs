use axum::{
    http::{HeaderMap, HeaderName, HeaderValue, Request},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Makes sure every request carries an `x-request-id`, reusing the caller's
/// when present, and echoes it on the response.
pub async fn request_tracking_middleware<B>(mut request: Request<B>, next: Next<B>) -> Response {
    let request_id = extract_request_id(request.headers())
        .and_then(|id| HeaderValue::from_str(&id).ok())
        .unwrap_or_else(generate_request_id);

    request
        .headers_mut()
        .insert(HeaderName::from_static(REQUEST_ID_HEADER), request_id.clone());

    let mut response = next.run(request).await;
    response
        .headers_mut()
        .insert(HeaderName::from_static(REQUEST_ID_HEADER), request_id);
    response
}

fn generate_request_id() -> HeaderValue {
    let id = Uuid::new_v4().to_string();
    HeaderValue::from_str(&id).unwrap_or_else(|_| HeaderValue::from_static("unknown"))
}

pub fn extract_request_id(headers: &HeaderMap) -> Option<String> {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_id_is_read_from_headers() {
        let mut headers = HeaderMap::new();
        assert_eq!(extract_request_id(&headers), None);

        headers.insert(REQUEST_ID_HEADER, HeaderValue::from_static("req-7"));
        assert_eq!(extract_request_id(&headers).as_deref(), Some("req-7"));
    }

    #[test]
    fn generated_ids_are_uuids() {
        let id = generate_request_id();
        assert!(Uuid::parse_str(id.to_str().unwrap()).is_ok());
    }
}
