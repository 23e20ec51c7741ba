use axum::{
    extract::State,
    http::HeaderMap,
    response::Response,
};

use crate::{AppState, routes::{respond_list, with_conn}, services::DirectoryService};

pub async fn get_departments(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let result = with_conn(&state, DirectoryService::departments);
    respond_list(&headers, result, "Departments retrieved successfully")
}

pub async fn get_auditors(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let result = with_conn(&state, DirectoryService::auditors);
    respond_list(&headers, result, "Auditors retrieved successfully")
}
