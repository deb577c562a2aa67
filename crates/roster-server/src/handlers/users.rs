use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use roster_types::{ListUsersResult, User, UserQueryParams};
use roster_validate::{check_user, validate_create_user, validate_user_query, ValidationError};
use serde_json::Value;
use tracing::{debug, info};

use super::{json_body, HandlerContext};
use crate::error::ApiError;

pub async fn handle_list_users(
    State(ctx): State<Arc<HandlerContext>>,
    params: Result<Query<UserQueryParams>, QueryRejection>,
) -> Result<Json<ListUsersResult>, ApiError> {
    let Query(params) = params.map_err(|e| ValidationError::single("", e.body_text()))?;
    let query = validate_user_query(&params)?;

    let result = ctx.store.find_all(&query);
    for user in &result.users {
        check_user(user)?;
    }

    debug!(
        "Listed {} of {} users (page {}, limit {})",
        result.users.len(),
        result.pagination.total,
        result.pagination.page,
        result.pagination.limit
    );
    Ok(Json(result))
}

pub async fn handle_create_user(
    State(ctx): State<Arc<HandlerContext>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let new_user = validate_create_user(&json_body(body)?)?;

    let user = ctx.store.create(new_user);
    check_user(&user)?;

    info!("Created user {} ({})", user.id, user.role);
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn handle_get_user(
    State(ctx): State<Arc<HandlerContext>>,
    id: Result<Path<String>, PathRejection>,
) -> Result<Json<User>, ApiError> {
    let Path(id) = id.map_err(|e| ValidationError::single("", e.body_text()))?;
    let user = ctx.store.find_by_id(&id)?;
    check_user(&user)?;
    Ok(Json(user))
}
