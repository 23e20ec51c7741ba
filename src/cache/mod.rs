//! Redis operations used by authentication and health checks.

use ::redis::{AsyncCommands, Client, cmd};
use crate::error::AppError;

fn revoked_token_key(jti: &str) -> String {
    format!("revoked_token:{}", jti)
}

async fn connection(
    redis_client: &Client,
) -> Result<::redis::aio::MultiplexedConnection, AppError> {
    redis_client
        .get_multiplexed_async_connection()
        .await
        .map_err(|e| AppError::Internal(format!("Failed to get Redis connection: {}", e)))
}

/// 吊销令牌，直到其自然过期
pub async fn revoke_token(redis_client: &Client, jti: &str, ttl: u64) -> Result<(), AppError> {
    let mut conn = connection(redis_client).await?;

    let _: () = conn
        .set_ex(revoked_token_key(jti), 1, ttl.max(1))
        .await
        .map_err(|e| AppError::Internal(format!("Failed to revoke token: {}", e)))?;

    Ok(())
}

pub async fn is_token_revoked(redis_client: &Client, jti: &str) -> Result<bool, AppError> {
    let mut conn = connection(redis_client).await?;

    let revoked: bool = conn
        .exists(revoked_token_key(jti))
        .await
        .map_err(|e| AppError::Internal(format!("Failed to check token revocation: {}", e)))?;

    Ok(revoked)
}

/// Redis健康检查
pub async fn redis_health_check(redis_client: &Client) -> Result<bool, AppError> {
    let mut conn = connection(redis_client).await?;

    let pong: String = cmd("PING")
        .query_async(&mut conn)
        .await
        .map_err(|e| AppError::Internal(format!("Redis health check failed: {}", e)))?;

    Ok(pong == "PONG")
}
