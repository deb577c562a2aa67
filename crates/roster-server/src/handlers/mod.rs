use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::http::{Method, Uri};
use axum::routing::get;
use axum::{Json, Router};
use roster_store::UserStore;
use roster_validate::ValidationError;
use serde_json::Value;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::error::ApiError;

mod health;
mod hello;
mod users;

pub use health::handle_health;
pub use hello::{handle_get_hello, handle_post_hello};
pub use users::{handle_create_user, handle_get_user, handle_list_users};

pub struct HandlerContext {
    pub store: Arc<UserStore>,
}

impl HandlerContext {
    pub fn new(store: Arc<UserStore>) -> Self {
        Self { store }
    }
}

pub fn router(ctx: Arc<HandlerContext>, cors: bool) -> Router {
    let app = Router::new()
        .route(
            "/",
            get(handle_get_hello)
                .post(handle_post_hello)
                .fallback(handle_not_found),
        )
        .route("/health", get(handle_health).fallback(handle_not_found))
        .route(
            "/users",
            get(handle_list_users)
                .post(handle_create_user)
                .fallback(handle_not_found),
        )
        .route("/users/:id", get(handle_get_user).fallback(handle_not_found))
        .fallback(handle_not_found)
        .with_state(ctx)
        .layer(TraceLayer::new_for_http());

    if cors {
        app.layer(CorsLayer::permissive())
    } else {
        app
    }
}

async fn handle_not_found(method: Method, uri: Uri) -> ApiError {
    ApiError::RouteNotFound {
        method: method.to_string(),
        path: uri.path().to_string(),
    }
}

/// Unwraps a JSON body, turning a malformed or missing body into a
/// validation failure instead of axum's plain-text rejection.
pub(crate) fn json_body(body: Result<Json<Value>, JsonRejection>) -> Result<Value, ValidationError> {
    body.map(|Json(value)| value)
        .map_err(|rejection| ValidationError::single("", rejection.body_text()))
}
