use std::env;

pub const DEFAULT_PORT: u16 = 8000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
  /// sea-orm URL, or `memory` for a process-local store.
  pub database_url: Option<String>,
  pub database_name: Option<String>,
  pub port: u16,
}

impl Default for Config {
  fn default() -> Self {
    Self { database_url: None, database_name: None, port: DEFAULT_PORT }
  }
}

impl Config {
  pub fn from_env() -> Self {
    Self::from_lookup(|key| env::var(key).ok())
  }

  fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
    let set = |key| get(key).filter(|v: &String| !v.trim().is_empty());

    Self {
      database_url: set("DATABASE_URL"),
      database_name: set("DATABASE_NAME"),
      port: set("PORT").and_then(|p| p.parse().ok()).unwrap_or(DEFAULT_PORT),
    }
  }
}

#[cfg(test)]
mod tests {
  use std::collections::HashMap;

  use super::*;

  fn config(vars: &[(&str, &str)]) -> Config {
    let vars: HashMap<_, _> = vars.iter().copied().collect();
    Config::from_lookup(|key| vars.get(key).map(|v| v.to_string()))
  }

  #[test]
  fn defaults_without_env() {
    assert_eq!(config(&[]), Config::default());
  }

  #[test]
  fn reads_all_variables() {
    let config = config(&[
      ("DATABASE_URL", "sqlite:deals.db?mode=rwc"),
      ("DATABASE_NAME", "deals"),
      ("PORT", "9000"),
    ]);

    assert_eq!(config.database_url.as_deref(), Some("sqlite:deals.db?mode=rwc"));
    assert_eq!(config.database_name.as_deref(), Some("deals"));
    assert_eq!(config.port, 9000);
  }

  #[test]
  fn bad_port_and_blank_values_fall_back() {
    let config = config(&[("DATABASE_URL", "  "), ("PORT", "http")]);
    assert_eq!(config.database_url, None);
    assert_eq!(config.port, DEFAULT_PORT);
  }
}
