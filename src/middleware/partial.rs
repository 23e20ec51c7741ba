use axum::{
    Json, async_trait,
    extract::FromRequestParts,
    http::{HeaderMap, StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::convert::Infallible;

use crate::{db::models::api::ApiResponse, error::AppError};

pub const HX_REQUEST_HEADER: &str = "hx-request";

/// Whether the caller asked for a partial-page refresh (`HX-Request: true`).
/// Such callers get short plain-text acknowledgements instead of JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartialRefresh(pub bool);

impl PartialRefresh {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let enabled = headers
            .get(HX_REQUEST_HEADER)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.eq_ignore_ascii_case("true"));
        Self(enabled)
    }

    /// Renders an error: its message as plain text for partial refreshes,
    /// the JSON envelope otherwise.
    pub fn reject(self, err: AppError) -> Response {
        if self.0 {
            err.into_plain_response()
        } else {
            err.into_response()
        }
    }

    /// Renders a mutation result: the acknowledgement text for partial
    /// refreshes, the JSON envelope otherwise.
    pub fn respond<T: Serialize>(
        self,
        status: StatusCode,
        message: &str,
        result: Result<T, AppError>,
    ) -> Response {
        match (self.0, result) {
            (true, Ok(_)) => (status, message.to_string()).into_response(),
            (_, Err(err)) => self.reject(err),
            (false, Ok(data)) => {
                let response = if status == StatusCode::CREATED {
                    ApiResponse::created(data, message)
                } else {
                    ApiResponse::success(data, message)
                };
                (status, Json(response)).into_response()
            }
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for PartialRefresh
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_headers(&parts.headers))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn only_true_enables_partial_refresh() {
        let mut headers = HeaderMap::new();
        assert_eq!(PartialRefresh::from_headers(&headers), PartialRefresh(false));

        headers.insert(HX_REQUEST_HEADER, HeaderValue::from_static("true"));
        assert_eq!(PartialRefresh::from_headers(&headers), PartialRefresh(true));

        headers.insert(HX_REQUEST_HEADER, HeaderValue::from_static("false"));
        assert_eq!(PartialRefresh::from_headers(&headers), PartialRefresh(false));
    }

    #[test]
    fn partial_errors_keep_status_and_message() {
        let response = PartialRefresh(true).respond::<()>(
            StatusCode::OK,
            "Plan reviewed successfully!",
            Err(AppError::forbidden("You are not assigned to this project.")),
        );
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn rejections_follow_the_requested_format() {
        use axum::http::header::CONTENT_TYPE;

        let plain = PartialRefresh(true).reject(AppError::auth("Missing bearer token"));
        assert_eq!(plain.status(), StatusCode::UNAUTHORIZED);
        assert!(
            plain.headers()[CONTENT_TYPE]
                .to_str()
                .unwrap()
                .starts_with("text/plain")
        );

        let json = PartialRefresh(false).reject(AppError::auth("Missing bearer token"));
        assert_eq!(json.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(json.headers()[CONTENT_TYPE], "application/json");
    }

    #[test]
    fn json_mode_uses_created_envelope() {
        let response =
            PartialRefresh(false).respond(StatusCode::CREATED, "Plan submitted successfully!", Ok(1));
        assert_eq!(response.status(), StatusCode::CREATED);
    }
}
