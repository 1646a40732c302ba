mod config;
mod entity;
mod error;
mod plugins;
mod prelude;
mod schema;
mod state;
mod store;
mod sv;
mod utils;

use tracing_subscriber::{
  EnvFilter, layer::SubscriberExt, util::SubscriberInitExt,
};

use crate::{config::Config, prelude::*, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  dotenvy::dotenv().ok();

  tracing_subscriber::registry()
    .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
      "deals=debug,tower_http=debug,sea_orm=warn".into()
    }))
    .with(tracing_subscriber::fmt::layer())
    .init();

  info!("Starting Deals Finder v{}", env!("CARGO_PKG_VERSION"));

  let config = Config::from_env();
  let app = Arc::new(AppState::new(config).await);

  let started =
    plugins::App::new().register(plugins::server::Plugin).run(app).await;
  if !started {
    anyhow::bail!("Failed to start");
  }

  tokio::signal::ctrl_c().await?;
  info!("Shutting down");

  Ok(())
}
