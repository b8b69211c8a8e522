use std::{env, sync::Arc};

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use microservice::{
    api,
    config::Config,
    database::{Postgres, Queries},
};

mod command_parser;
mod server;

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = command_parser::arg_parser().get_matches_from(env::args_os());

    // A missing .env file is not an error.
    dotenvy::dotenv().ok();
    let config = Config::read().context("Failed to read configuration")?;

    if args.get_flag("print-config") {
        println!("{}", config.redacted()?);
        return Ok(());
    }

    init_tracing();

    let postgres = Postgres::connect(&config.postgres)
        .await
        .context("Failed to connect to postgres")?;
    let queries = Queries::new(postgres.pool);
    queries
        .create_table()
        .await
        .context("Failed to create the authors table")?;
    info!("Schema ready.");

    server::start(api::router(Arc::new(queries)), config.server.address()).await
}
