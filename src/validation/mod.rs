pub mod project;
pub mod record;

use axum::{
    Json, async_trait,
    extract::FromRequest,
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::{
    db::models::api::{ApiResponse, ErrorDetail},
    error::AppError,
    middleware::PartialRefresh,
};

/// 验证的 JSON 提取器
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S, axum::body::Body> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request<axum::body::Body>, state: &S) -> Result<Self, Self::Rejection> {
        let partial = PartialRefresh::from_headers(req.headers());
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|rejection| {
            partial.reject(AppError::validation(format!(
                "Invalid JSON format: {}",
                rejection.body_text()
            )))
        })?;

        value.validate().map_err(|errors| {
            let error_details: Vec<ErrorDetail> = errors
                .field_errors()
                .iter()
                .flat_map(|(field, field_errors)| {
                    field_errors.iter().map(move |error| ErrorDetail {
                        field: Some(field.to_string()),
                        code: error.code.to_string(),
                        message: error
                            .message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| format!("Validation failed for field: {}", field)),
                    })
                })
                .collect();

            if partial.0 {
                let message = error_details
                    .iter()
                    .map(|detail| match &detail.field {
                        Some(field) => format!("{}: {}", field, detail.message),
                        None => detail.message.clone(),
                    })
                    .collect::<Vec<_>>()
                    .join("; ");
                (StatusCode::BAD_REQUEST, message).into_response()
            } else {
                validation_error_response(error_details).into_response()
            }
        })?;

        Ok(ValidatedJson(value))
    }
}

/// 验证错误响应辅助函数
pub fn validation_error_response(errors: Vec<ErrorDetail>) -> (StatusCode, Json<ApiResponse<()>>) {
    let response = ApiResponse::validation_error(errors);
    (StatusCode::BAD_REQUEST, Json(response))
}
