mod config;
mod errors;
mod llm_client;
mod profile;
mod resume;
mod rewrite;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::profile::retriever::{HttpProfileSource, ProfileSource};
use crate::profile::store::ProfileStore;
use crate::resume::document::load_example_text;
use crate::resume::index::InMemoryIndex;
use crate::routes::build_router;
use crate::rewrite::seo::{GoogleEntityAnnotator, KeywordAnnotator};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting LinkedIn optimizer v{}", env!("CARGO_PKG_VERSION"));

    let timeout = Duration::from_secs(config.oracle_timeout_secs);

    let llm = LlmClient::new(config.openai_api_key.clone(), timeout)?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let profiles: Option<Arc<dyn ProfileSource>> = match HttpProfileSource::new(
        config.profile_api_url.clone(),
        config.profile_api_token.clone(),
        timeout,
    ) {
        Ok(source) => Some(Arc::new(source)),
        Err(e) => {
            warn!("Profile retrieval disabled: {e}");
            None
        }
    };

    let annotator: Option<Arc<dyn KeywordAnnotator>> =
        match GoogleEntityAnnotator::new(config.google_nlp_api_key.clone(), timeout) {
            Ok(annotator) => Some(Arc::new(annotator)),
            Err(e) => {
                if config.enable_seo_keywords {
                    anyhow::bail!("ENABLE_SEO_KEYWORDS is set but {e}");
                }
                info!("SEO keyword enrichment unavailable: {e}");
                None
            }
        };

    let example_text = match &config.example_experience_path {
        Some(path) => load_example_text(path)?,
        None => {
            warn!("EXAMPLE_EXPERIENCE_PATH not set; EXPERIENCE sections use the default policy");
            String::new()
        }
    };

    let state = AppState {
        llm: Arc::new(llm),
        index: Arc::new(InMemoryIndex),
        annotator,
        profiles,
        store: Arc::new(ProfileStore::new()),
        example_text: Arc::from(example_text),
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
