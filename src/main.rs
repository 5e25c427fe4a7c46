use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use speedrabble::{
    config::Config,
    core::{Dictionary, RandomSource},
    routes::create_router,
    services::GameEngine,
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "speedrabble=info,tower_http=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Speedrabble server starting...");

    let config = Config::from_env()?;
    tracing::info!("Configuration loaded");

    let dictionary = match Dictionary::load(
        &config.game.dictionary_path,
        config.game.max_word_length,
    )
    .await
    {
        Ok(dict) => dict,
        Err(e) if config.game.allow_empty_dictionary => {
            tracing::warn!(
                "Failed to load dictionary: {:#}. Every guess will be rejected.",
                e
            );
            Dictionary::empty()
        }
        Err(e) => return Err(e),
    };

    if dictionary.is_empty() && !config.game.allow_empty_dictionary {
        bail!(
            "dictionary {} has no usable words (set ALLOW_EMPTY_DICTIONARY=true to start anyway)",
            config.game.dictionary_path
        );
    }

    let random = match config.game.rng_seed {
        Some(seed) => {
            tracing::info!(seed, "Using seeded random source");
            RandomSource::seeded(seed)
        }
        None => RandomSource::from_entropy(),
    };

    let engine = GameEngine::new(dictionary, config.engine_settings(), random);
    let state = AppState::new(engine).with_frontend_dir(&config.server.frontend_dir);

    let ttl = time::Duration::try_from(Duration::from_secs(config.game.game_ttl_seconds))
        .context("GAME_TTL_SECONDS is out of range")?;
    let cleanup_engine = state.engine.clone();
    let cleanup_every = Duration::from_secs(config.game.cleanup_interval_seconds);
    tokio::spawn(async move {
        stale_game_cleanup_task(cleanup_engine, cleanup_every, ttl).await;
    });

    let app = create_router(state);

    let addr = config.server_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind to {}", addr))?;

    tracing::info!("Server listening on http://{}", addr);
    tracing::info!("Game frontend: {}", config.server.frontend_dir);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Background task that drops games nobody finished
async fn stale_game_cleanup_task(engine: Arc<GameEngine>, every: Duration, ttl: time::Duration) {
    let mut interval = tokio::time::interval(every);

    loop {
        interval.tick().await;
        engine.cleanup_stale_games(ttl);
    }
}
