// src/routes/mod.rs
pub mod chat;

use std::any::Any;

use crate::{error::AppError, state::SharedState};
use axum::{
    Router,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chat::{chat_handler, root_handler};
use tower::ServiceBuilder;
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};

pub fn create_router() -> Router<SharedState> {
    Router::new()
        .route("/", get(root_handler))
        .route("/api/chat", post(chat_handler))
        .route("/health", get(|| async { "OK" }))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CatchPanicLayer::custom(handle_panic)),
        )
        .layer(CorsLayer::very_permissive())
}

fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "Internal server error".to_string()
    };

    AppError::Internal(detail).into_response()
}
