use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use thiserror::Error;
use tracing::info;

use liftlab_agent::{ChatRuntime, GeminiClient, ToolRegistry, WorkoutGenerator};
use liftlab_core::admission::AdmissionController;
use liftlab_core::config::AppConfig;
use liftlab_core::ChatError;

use crate::{chat, health};

/// Fixed at construction: 10 requests per identity per 60-second window.
pub const ADMISSION_LIMIT: usize = 10;
pub const ADMISSION_WINDOW: Duration = Duration::from_secs(60);

pub struct Application {
    pub config: AppConfig,
    pub runtime: Arc<ChatRuntime>,
    pub admission: Arc<AdmissionController>,
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("model client initialization failed: {0}")]
    ModelClient(#[source] ChatError),
}

pub fn bootstrap_with_config(config: AppConfig) -> Result<Application, BootstrapError> {
    info!("starting application bootstrap");

    let client =
        Arc::new(GeminiClient::new(&config.llm).map_err(BootstrapError::ModelClient)?);
    info!(model = %config.llm.model, "model client initialized");

    let mut tools = ToolRegistry::default();
    tools.register(WorkoutGenerator::new(client.clone()));
    info!(tool_count = tools.len(), "tool registry initialized");

    let runtime = Arc::new(ChatRuntime::new(client, Arc::new(tools)));

    let admission = Arc::new(AdmissionController::new(ADMISSION_LIMIT, ADMISSION_WINDOW));
    info!(
        limit = ADMISSION_LIMIT,
        window_secs = ADMISSION_WINDOW.as_secs(),
        "admission controller initialized"
    );

    Ok(Application { config, runtime, admission })
}

impl Application {
    pub fn router(&self) -> Router {
        chat::router(self.runtime.clone(), self.admission.clone()).merge(health::router())
    }
}
