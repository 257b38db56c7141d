use gamus_config::{ConfigBackend, ConfigError, TomlConfigBackend};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const ENV_CLIENT_ID: &str = "GAMUS_CATALOG_CLIENT_ID";
pub const ENV_CLIENT_SECRET: &str = "GAMUS_CATALOG_CLIENT_SECRET";

/// Máximo que acepta el endpoint de búsqueda por petición.
const MAX_RESULT_LIMIT: u32 = 50;

#[derive(Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct CatalogConfig {
  pub client_id: String,
  pub client_secret: String,
  pub token_url: String,
  pub api_base_url: String,
  /// Resultados por búsqueda. Son los candidatos entre los que se elige.
  pub result_limit: u32,
}

impl Default for CatalogConfig {
  fn default() -> Self {
    CatalogConfig {
      client_id: String::new(),
      client_secret: String::new(),
      token_url: "https://accounts.spotify.com/api/token".to_string(),
      api_base_url: "https://api.spotify.com/v1".to_string(),
      result_limit: 5,
    }
  }
}

// A mano para no volcar el secreto en los logs.
impl fmt::Debug for CatalogConfig {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("CatalogConfig")
      .field("client_id", &self.client_id)
      .field("client_secret", &"<redacted>")
      .field("token_url", &self.token_url)
      .field("api_base_url", &self.api_base_url)
      .field("result_limit", &self.result_limit)
      .finish()
  }
}

impl CatalogConfig {
  /// Carga `[catalog]` y aplica las credenciales del entorno por encima.
  pub fn load(backend: &TomlConfigBackend) -> Result<Self, ConfigError> {
    let mut cfg: CatalogConfig = backend.load_section_with_default("catalog")?;
    cfg.apply_env(|key| std::env::var(key).ok());
    cfg.validate()?;
    Ok(cfg)
  }

  pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(id) = lookup(ENV_CLIENT_ID).filter(|v| !v.is_empty()) {
      self.client_id = id;
    }
    if let Some(secret) = lookup(ENV_CLIENT_SECRET).filter(|v| !v.is_empty()) {
      self.client_secret = secret;
    }
  }

  pub fn validate(&self) -> Result<(), ConfigError> {
    if self.client_id.is_empty() || self.client_secret.is_empty() {
      return Err(ConfigError::Other(format!(
        "catalog credentials missing: set [catalog] client_id/client_secret or {ENV_CLIENT_ID}/{ENV_CLIENT_SECRET}"
      )));
    }
    if !(1..=MAX_RESULT_LIMIT).contains(&self.result_limit) {
      return Err(ConfigError::Other(format!(
        "catalog.result_limit must be between 1 and {MAX_RESULT_LIMIT}, got {}",
        self.result_limit
      )));
    }
    for (key, value) in [("token_url", &self.token_url), ("api_base_url", &self.api_base_url)] {
      Url::parse(value).map_err(|e| ConfigError::Other(format!("catalog.{key} is not a valid URL ({value:?}): {e}")))?;
    }
    Ok(())
  }
}
