use std::sync::Arc;

use crate::analysis::Analyzer;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Analysis pipeline with its read-only tables and grammar backend.
    pub analyzer: Arc<Analyzer>,
}
