use std::sync::Arc;

use anyhow::Context;
use loki_voice_backend::{
    config::Config,
    routes,
    services::{
        generator::GeminiGenerator, orchestrator::ChatOrchestrator, persona::Persona, synthesizer,
    },
    state::AppState,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env().context("loading configuration")?;
    let persona = Persona::load(&config.persona)?;

    let client = reqwest::Client::builder()
        .connect_timeout(std::time::Duration::from_secs(10))
        .build()
        .context("building HTTP client")?;

    let generator = Arc::new(GeminiGenerator::new(client.clone(), &config.gemini));
    let synthesizer = synthesizer::from_config(client, &config.tts);

    let orchestrator = ChatOrchestrator::new(persona, generator, synthesizer)
        .with_timeouts(config.generation_timeout, config.synthesis_timeout)
        .speak_degraded_text(config.speak_degraded_text);

    let state = Arc::new(AppState::new(config.service_name.clone(), orchestrator));

    let app = routes::create_router().with_state(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {}", addr))?;

    tracing::info!("{} running at http://{}", config.service_name, addr);
    axum::serve(listener, app).await?;
    Ok(())
}
