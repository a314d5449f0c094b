use std::sync::Arc;

use courtside::{
    config::Config,
    gateway::offline::{LogDispatcher, OfflineProcessor},
    scheduler::Scheduler,
    startup,
};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let db = match startup::connect_to_database(&config).await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("Database error: {}", e);
            std::process::exit(1);
        }
    };

    let processor = Arc::new(OfflineProcessor);
    let dispatcher = Arc::new(LogDispatcher);

    let scheduler = match Scheduler::new(db, config, processor, dispatcher).await {
        Ok(scheduler) => scheduler,
        Err(e) => {
            eprintln!("Scheduler error: {}", e);
            std::process::exit(1);
        }
    };
    if let Err(e) = scheduler.start().await {
        eprintln!("Scheduler error: {}", e);
        std::process::exit(1);
    }

    tracing::info!("Scheduler started, waiting for shutdown signal");

    if let Err(e) = tokio::signal::ctrl_c().await {
        eprintln!("Signal error: {}", e);
        std::process::exit(1);
    }
}
