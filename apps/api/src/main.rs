mod analysis;
mod config;
mod errors;
mod grammar;
mod models;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::{Analyzer, AnalyzerConfig};
use crate::config::Config;
use crate::grammar::{DisabledGrammarChecker, GrammarChecker, LanguageToolChecker};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume Critique API v{}", env!("CARGO_PKG_VERSION"));

    // Vocabularies are fixed; only the stopword list is read from disk
    let analyzer_config = AnalyzerConfig::load(&config.stopwords_path, config.skill_matching)?;
    info!(
        "Analyzer config loaded: {} skills, {} roles, {} stopwords, {:?} matching",
        analyzer_config.skills.len(),
        analyzer_config.roles.len(),
        analyzer_config.stopwords.len(),
        analyzer_config.skill_matching
    );

    let grammar_timeout = Duration::from_secs(config.grammar_timeout_secs);
    let grammar = build_grammar_checker(&config, grammar_timeout)?;
    info!("Grammar checker initialized (backend: {})", grammar.backend());

    let analyzer = Analyzer::new(Arc::new(analyzer_config), grammar, grammar_timeout);

    // Build app state
    let state = AppState {
        config: config.clone(),
        analyzer: Arc::new(analyzer),
    };

    // Build router
    let app = build_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    );

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// LanguageTool when `GRAMMAR_URL` is set, otherwise a checker that reports nothing.
fn build_grammar_checker(config: &Config, timeout: Duration) -> Result<Arc<dyn GrammarChecker>> {
    match &config.grammar_url {
        Some(url) => {
            let checker =
                LanguageToolChecker::new(url.clone(), config.grammar_language.clone(), timeout)?;
            Ok(Arc::new(checker))
        }
        None => Ok(Arc::new(DisabledGrammarChecker)),
    }
}
