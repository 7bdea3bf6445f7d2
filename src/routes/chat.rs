use axum::{Json, extract::State, extract::rejection::JsonRejection};

use crate::{
    error::AppError,
    message::{ChatRequest, ChatResponse, RootResponse},
    state::SharedState,
};

pub async fn chat_handler(
    State(state): State<SharedState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, AppError> {
    let Json(payload) = payload?;

    let response = state
        .orchestrator
        .handle_chat(payload.message.as_deref())
        .await?;

    Ok(Json(response))
}

pub async fn root_handler(State(state): State<SharedState>) -> Json<RootResponse> {
    Json(RootResponse {
        message: format!("{} is running", state.service_name),
    })
}
