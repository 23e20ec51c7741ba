use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::db::enums::Role;

// User models
#[derive(Queryable, Selectable, Serialize, Deserialize, Clone, Debug)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub name: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub is_active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Queryable, Selectable, Insertable, Serialize, Clone, Debug)]
#[diesel(table_name = crate::schema::user_roles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRole {
    pub user_id: i32,
    pub role: Role,
}

// Authentication DTOs
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct AuthUser {
    pub id: i32,
    pub email: String,
    pub username: String,
    pub name: String,
}

impl From<User> for AuthUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            username: user.username,
            name: user.name,
        }
    }
}

#[derive(Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 150, message = "Username is required"))]
    pub username: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: AuthUser,
    pub roles: Vec<Role>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct UserBasicInfo {
    pub id: i32,
    pub name: String,
    pub username: String,
    pub email: String,
}

impl From<User> for UserBasicInfo {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            username: user.username,
            email: user.email,
        }
    }
}

#[derive(Serialize)]
pub struct UserProfile {
    pub id: i32,
    pub email: String,
    pub username: String,
    pub name: String,
    pub roles: Vec<Role>,
    pub primary_role: Option<Role>,
}
