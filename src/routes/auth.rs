use axum::{
    extract::State,
    http::StatusCode,
    response::Response,
};

use crate::{
    AppState,
    db::models::auth::LoginRequest,
    middleware::{PartialRefresh, auth::AuthUserInfo},
    routes::respond,
    services::AccountsService,
    validation::ValidatedJson,
};

pub async fn login(
    State(state): State<AppState>,
    partial: PartialRefresh,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> Response {
    let result = AccountsService::login(&state, &payload).await;
    partial.respond(StatusCode::OK, "Login successful", result)
}

pub async fn logout(
    State(state): State<AppState>,
    partial: PartialRefresh,
    auth_info: AuthUserInfo,
) -> Response {
    let result = AccountsService::logout(&state, &auth_info).await;
    partial.respond(StatusCode::OK, "Logged out successfully", result)
}

pub async fn get_profile(auth_info: AuthUserInfo) -> Response {
    respond(
        Ok(AccountsService::profile(&auth_info)),
        "Profile retrieved successfully",
    )
}
