use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::GenerationOracle;
use crate::profile::retriever::ProfileSource;
use crate::profile::store::ProfileStore;
use crate::resume::index::VectorIndex;
use crate::rewrite::seo::KeywordAnnotator;

/// Shared application state injected into all route handlers via Axum extractors.
/// Every client is built once in `main`; nothing reaches for globals.
#[derive(Clone)]
pub struct AppState {
    pub llm: Arc<dyn GenerationOracle>,
    pub index: Arc<dyn VectorIndex>,
    /// Present only when `GOOGLE_NLP_API_KEY` is configured.
    pub annotator: Option<Arc<dyn KeywordAnnotator>>,
    /// Present only when the profile API credentials are configured.
    pub profiles: Option<Arc<dyn ProfileSource>>,
    pub store: Arc<ProfileStore>,
    /// Example experience text used when a request does not supply its own.
    pub example_text: Arc<str>,
    pub config: Config,
}
