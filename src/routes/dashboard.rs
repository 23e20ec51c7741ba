use axum::{extract::State, response::Response};

use crate::{
    AppState,
    middleware::auth::AuthUserInfo,
    routes::{respond, with_conn},
    services::{DashboardService, RequestContext},
};

pub async fn get_dashboard(State(state): State<AppState>, auth_info: AuthUserInfo) -> Response {
    let ctx = RequestContext::from(&auth_info);
    let result = with_conn(&state, |conn| DashboardService::for_user(conn, &ctx));
    respond(result, "Dashboard retrieved successfully")
}
