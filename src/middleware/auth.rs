use crate::{
    AppState, cache,
    config::AuthConfig,
    db::{models::AuthUser, repositories::AuthRepo},
    error::AppError,
    middleware::PartialRefresh,
    workflow::Actor,
};
use axum::{
    async_trait,
    extract::{FromRequestParts, State},
    http::{Request, header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i32, // user_id
    pub username: String,
    pub exp: u64,    // expiration time
    pub iat: u64,    // issued at
    pub jti: String, // JWT ID
}

#[derive(Clone)]
pub struct AuthService {
    config: Arc<AuthConfig>,
}

impl AuthService {
    pub fn new(config: AuthConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    pub fn access_token_expires_in(&self) -> u64 {
        self.config.access_token_expires_in
    }

    pub fn generate_access_token(
        &self,
        user: &AuthUser,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = chrono::Utc::now().timestamp().max(0) as u64;

        let claims = Claims {
            sub: user.id,
            username: user.username.clone(),
            exp: now + self.config.access_token_expires_in,
            iat: now,
            jti: uuid::Uuid::new_v4().to_string(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.jwt_secret.as_ref()),
        )
    }

    pub fn verify_token(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.jwt_secret.as_ref()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }
}

/// Authenticated caller attached to the request by [`auth_middleware`].
#[derive(Clone, Debug)]
pub struct AuthUserInfo {
    pub user: AuthUser,
    pub actor: Actor,
    pub jti: String,
    pub expires_at: u64,
}

impl AuthUserInfo {
    /// Seconds until the token expires, at least one.
    pub fn remaining_ttl(&self) -> u64 {
        let now = chrono::Utc::now().timestamp().max(0) as u64;
        self.expires_at.saturating_sub(now).max(1)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUserInfo
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUserInfo>()
            .cloned()
            .ok_or_else(|| AppError::auth("Unauthorized"))
    }
}

fn bearer_token<B>(request: &Request<B>) -> Option<&str> {
    request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|auth_header| auth_header.to_str().ok())
        .and_then(|auth_str| auth_str.strip_prefix("Bearer "))
}

/// Resolves the bearer token to an active user and its roles.
async fn authenticate<B>(state: &AppState, request: &Request<B>) -> Result<AuthUserInfo, AppError> {
    let token = bearer_token(request).ok_or_else(|| AppError::auth("Missing bearer token"))?;

    // 验证token
    let claims = state
        .auth_service
        .verify_token(token)
        .map_err(|_| AppError::auth("Invalid token"))?;

    if cache::is_token_revoked(&state.redis, &claims.jti).await? {
        return Err(AppError::auth("Token has been revoked"));
    }

    // 从数据库获取用户及其角色
    let mut conn = state.db.get()?;
    let user = AuthRepo::find_active_by_id(&mut conn, claims.sub)?
        .ok_or_else(|| AppError::auth("User not found or inactive"))?;
    let roles = AuthRepo::roles_for_user(&mut conn, user.id)?;
    drop(conn);

    let actor = Actor::new(user.id, roles);
    tracing::debug!(user_id = user.id, roles = ?actor.roles(), "Authenticated request");

    Ok(AuthUserInfo {
        user: AuthUser::from(user),
        actor,
        jti: claims.jti,
        expires_at: claims.exp,
    })
}

pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<axum::body::Body>,
    next: Next<axum::body::Body>,
) -> Response {
    let partial = PartialRefresh::from_headers(request.headers());
    match authenticate(&state, &request).await {
        Ok(auth_info) => {
            request.extensions_mut().insert(auth_info);
            next.run(request).await
        }
        Err(err) => partial.reject(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> AuthService {
        AuthService::new(AuthConfig {
            jwt_secret: "test-secret".to_string(),
            access_token_expires_in: 3600,
        })
    }

    fn user() -> AuthUser {
        AuthUser {
            id: 42,
            email: "ana@example.com".to_string(),
            username: "ana".to_string(),
            name: "Ana".to_string(),
        }
    }

    #[test]
    fn issued_tokens_verify() {
        let service = service();
        let token = service.generate_access_token(&user()).unwrap();
        let claims = service.verify_token(&token).unwrap();
        assert_eq!(claims.sub, 42);
        assert_eq!(claims.username, "ana");
        assert_eq!(claims.exp - claims.iat, 3600);
        assert!(!claims.jti.is_empty());
    }

    #[test]
    fn tokens_signed_with_another_secret_are_rejected() {
        let other = AuthService::new(AuthConfig {
            jwt_secret: "other-secret".to_string(),
            access_token_expires_in: 3600,
        });
        let token = other.generate_access_token(&user()).unwrap();
        assert!(service().verify_token(&token).is_err());
    }

    fn state() -> AppState {
        use diesel::{PgConnection, r2d2::ConnectionManager};

        let config: crate::config::Config = serde_json::from_value(serde_json::json!({
            "database_url": "postgres://localhost/audit",
            "redis_url": "redis://127.0.0.1/",
            "jwt_secret": "test-secret",
        }))
        .unwrap();
        let db = diesel::r2d2::Pool::builder()
            .min_idle(Some(0))
            .build_unchecked(ConnectionManager::<PgConnection>::new(&config.database_url));
        let redis = redis::Client::open(config.redis_url.as_str()).unwrap();
        AppState::new(db, redis, config)
    }

    #[tokio::test]
    async fn missing_token_is_rejected_as_plain_text_for_partial_refresh() {
        use axum::http::{StatusCode, header::CONTENT_TYPE};

        let request = Request::builder()
            .header("HX-Request", "true")
            .body(())
            .unwrap();
        let err = authenticate(&state(), &request).await.unwrap_err();
        assert!(matches!(err, AppError::Auth { .. }));

        let response = PartialRefresh::from_headers(request.headers()).reject(err);
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let content_type = response.headers().get(CONTENT_TYPE).unwrap();
        assert!(content_type.to_str().unwrap().starts_with("text/plain"));
    }

    #[tokio::test]
    async fn forged_token_is_rejected_before_any_lookup() {
        let other = AuthService::new(AuthConfig {
            jwt_secret: "other-secret".to_string(),
            access_token_expires_in: 3600,
        });
        let token = other.generate_access_token(&user()).unwrap();
        let request = Request::builder()
            .header(AUTHORIZATION, format!("Bearer {}", token))
            .body(())
            .unwrap();

        let err = authenticate(&state(), &request).await.unwrap_err();
        assert_eq!(err.to_string(), AppError::auth("Invalid token").to_string());
    }

    #[test]
    fn bearer_prefix_is_required() {
        let request = Request::builder()
            .header(AUTHORIZATION, "Bearer abc.def")
            .body(())
            .unwrap();
        assert_eq!(bearer_token(&request), Some("abc.def"));

        let request = Request::builder()
            .header(AUTHORIZATION, "Basic abc")
            .body(())
            .unwrap();
        assert_eq!(bearer_token(&request), None);
    }
}
