//! Contacts server entry point.
//!
//! # Responsibility
//! - Read configuration from the environment and start logging.
//! - Open the contact store, optionally seed demo data, then serve HTTP.

use contacts_core::{init_logging, open_location};
use contacts_web::{AppState, ServerConfig};
use log::{error, info};
use std::error::Error;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=server_exit module=cli status=error error={err}");
            eprintln!("contacts: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Box<dyn Error>> {
    let config = ServerConfig::from_env()?;
    init_logging(&config.log_level, &config.log_dir)?;
    info!(
        "event=server_config module=cli status=ok bind={} db={} seed_demo={}",
        config.bind_addr, config.db_location, config.seed_demo
    );

    let state = AppState::new(open_location(&config.db_location)?);
    if config.seed_demo {
        let seeded = state
            .with_service(|service| service.seed_demo_contacts())
            .await?;
        info!("event=seed_demo module=cli status=ok count={seeded}");
    }

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    contacts_web::serve(listener, state).await?;
    Ok(())
}
