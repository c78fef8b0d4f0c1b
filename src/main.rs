use clap::Parser;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use creatorbrief_gateway::cache::ResponseCache;
use creatorbrief_gateway::clock::SystemClock;
use creatorbrief_gateway::config::Args;
use creatorbrief_gateway::gateway::{Gateway, sweeper};
use creatorbrief_gateway::handlers::router;
use creatorbrief_gateway::provider::build_provider;
use creatorbrief_gateway::rate_limit::RateLimiter;
use creatorbrief_gateway::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // parse cli arguments
    let args = Args::parse();

    let provider = build_provider(args.provider_config()?)?;
    let clock = Arc::new(SystemClock);
    let gateway = Arc::new(Gateway::new(
        provider,
        ResponseCache::new(args.cache_ttl(), clock.clone()),
        RateLimiter::new(args.rate_limit, args.rate_window(), clock),
    ));

    // spawn the background sweeper
    tokio::spawn(sweeper(gateway.clone(), args.sweep_interval()));

    let app = router(Arc::new(AppState::new(gateway.clone())));

    let addr = format!("0.0.0.0:{}", args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!(addr = %addr, "gateway listening");
    tracing::info!(provider = gateway.provider_name(), "using provider");
    tracing::info!(cache_ttl_secs = args.cache_ttl, "cache configured");
    tracing::info!(
        rate_limit = args.rate_limit,
        rate_window_secs = args.rate_window,
        "rate limit configured"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
