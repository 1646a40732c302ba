use anyhow::Context;
use migration::{Migrator, MigratorTrait};

use crate::{
  config::Config,
  prelude::*,
  store::{DealStore, MemoryStore, SeaStore},
  sv,
};

pub struct AppState {
  pub config: Config,
  store: Option<Arc<dyn DealStore>>,
}

impl AppState {
  /// Connects to the configured store. Any failure is logged and the state
  /// is built without a store.
  pub async fn new(config: Config) -> Self {
    let store = match config.database_url.as_deref() {
      None => {
        warn!("DATABASE_URL not set, running without a database");
        None
      }
      Some(url) => match connect(url).await {
        Ok(store) => Some(store),
        Err(err) => {
          error!("Database unavailable: {err:#}");
          None
        }
      },
    };

    Self { config, store }
  }

  #[cfg(test)]
  pub fn with_store(config: Config, store: Option<Arc<dyn DealStore>>) -> Self {
    Self { config, store }
  }

  pub fn store(&self) -> Option<&dyn DealStore> {
    self.store.as_deref()
  }

  pub fn deals(&self) -> sv::Deals<'_> {
    sv::Deals::new(self.store())
  }
}

async fn connect(url: &str) -> anyhow::Result<Arc<dyn DealStore>> {
  if url == "memory" {
    info!("Using in-memory deal store");
    return Ok(Arc::new(MemoryStore::new()));
  }

  let db = Database::connect(url)
    .await
    .with_context(|| format!("Failed to connect to {url}"))?;
  Migrator::up(&db, None).await.context("Failed to run migrations")?;

  info!("Connected to database");
  Ok(Arc::new(SeaStore::new(db)))
}
