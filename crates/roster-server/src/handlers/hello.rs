use axum::extract::rejection::JsonRejection;
use axum::Json;
use roster_types::{HelloBody, HelloParams, HelloResult};
use roster_validate::validate_hello;
use serde_json::Value;

use super::json_body;
use crate::error::ApiError;

pub fn hello(params: HelloParams) -> HelloResult {
    HelloResult {
        a: format!("Hello World! x={}", params.x),
        b: HelloBody { c: params.y },
    }
}

pub async fn handle_get_hello() -> Json<HelloResult> {
    Json(hello(HelloParams::stub()))
}

pub async fn handle_post_hello(
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<HelloResult>, ApiError> {
    let params = validate_hello(&json_body(body)?)?;
    Ok(Json(hello(params)))
}
