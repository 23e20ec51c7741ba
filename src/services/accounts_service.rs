use bcrypt::verify;
use tokio::task;

use crate::{
    AppState, cache,
    db::models::auth::{AuthUser, LoginRequest, LoginResponse, UserProfile},
    db::repositories::AuthRepo,
    error::AppError,
    middleware::auth::AuthUserInfo,
};

pub struct AccountsService;

impl AccountsService {
    pub async fn login(state: &AppState, req: &LoginRequest) -> Result<LoginResponse, AppError> {
        let (user, roles) = {
            let mut conn = state.db.get()?;
            let user = AuthRepo::find_by_username(&mut conn, &req.username)?
                .filter(|user| user.is_active)
                .ok_or_else(|| AppError::auth("Invalid username or password"))?;
            let roles = AuthRepo::roles_for_user(&mut conn, user.id)?;
            (user, roles)
        };

        // 使用异步任务来执行密码验证，避免阻塞主线程
        let password = req.password.clone();
        let hash = user.password_hash.clone();
        let is_valid = task::spawn_blocking(move || verify(password.as_bytes(), &hash))
            .await
            .map_err(|e| AppError::internal(format!("Password verification task failed: {}", e)))??;

        if !is_valid {
            tracing::warn!(username = %req.username, "Login failed - invalid password");
            return Err(AppError::auth("Invalid username or password"));
        }

        let auth_user = AuthUser::from(user);
        let access_token = state.auth_service.generate_access_token(&auth_user)?;
        tracing::info!(user_id = auth_user.id, "User logged in");

        Ok(LoginResponse {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: state.auth_service.access_token_expires_in() as i64,
            user: auth_user,
            roles,
        })
    }

    /// Revokes the presented token for the rest of its lifetime.
    pub async fn logout(state: &AppState, auth_info: &AuthUserInfo) -> Result<(), AppError> {
        cache::revoke_token(&state.redis, &auth_info.jti, auth_info.remaining_ttl()).await?;
        tracing::info!(user_id = auth_info.user.id, "User logged out");
        Ok(())
    }

    pub fn profile(auth_info: &AuthUserInfo) -> UserProfile {
        UserProfile {
            id: auth_info.user.id,
            email: auth_info.user.email.clone(),
            username: auth_info.user.username.clone(),
            name: auth_info.user.name.clone(),
            roles: auth_info.actor.roles().to_vec(),
            primary_role: auth_info.actor.primary_role(),
        }
    }
}
