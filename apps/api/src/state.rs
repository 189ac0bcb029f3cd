use std::sync::Arc;

use crate::config::Config;
use crate::generation::store::DocumentStore;
use crate::layout::PageConfig;
use crate::llm_client::GenerationClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Gemini in production; swapped for a fake in tests.
    pub generator: Arc<dyn GenerationClient>,
    pub config: Config,
    /// Page geometry for the document formatter. A4, Helvetica.
    pub page_config: PageConfig,
    pub documents: DocumentStore,
}
