// src/state.rs
use std::sync::Arc;

use crate::services::orchestrator::ChatOrchestrator;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub service_name: String,
    pub orchestrator: ChatOrchestrator,
}

impl AppState {
    pub fn new(service_name: impl Into<String>, orchestrator: ChatOrchestrator) -> Self {
        Self {
            service_name: service_name.into(),
            orchestrator,
        }
    }
}
