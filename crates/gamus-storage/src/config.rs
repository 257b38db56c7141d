use gamus_config::{ConfigBackend, ConfigError, TomlConfigBackend};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::warn;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct StorageConfig {
  /// Ruta del archivo SQLite. Si es relativa, cuelga del directorio de datos.
  pub db_path: PathBuf,
  pub journal_mode: Option<String>,
  /// Conexiones máximas del pool.
  pub pool_size: u32,
  pub busy_timeout_ms: u32,
}

impl Default for StorageConfig {
  fn default() -> Self {
    StorageConfig {
      db_path: PathBuf::from("gamus.db"),
      journal_mode: Some("WAL".to_string()),
      pool_size: 4,
      busy_timeout_ms: 5_000,
    }
  }
}

impl StorageConfig {
  /// Carga `[storage]` y la vuelve a escribir con todos sus campos, para que
  /// el archivo muestre los valores efectivos. La ruta se guarda tal cual;
  /// solo el valor devuelto la resuelve contra el directorio de datos.
  pub fn load(backend: &TomlConfigBackend) -> Result<Self, ConfigError> {
    let mut cfg: StorageConfig = backend.load_section_with_default("storage")?;

    if cfg.pool_size == 0 {
      return Err(ConfigError::Other("storage.pool_size must be at least 1".into()));
    }

    if let Err(e) = backend.save_section("storage", &cfg) {
      warn!(error = %e, "could not write [storage] back to the config file");
    }

    if cfg.db_path.is_relative() {
      cfg.db_path = backend.paths().data_dir.join(&cfg.db_path);
    }

    Ok(cfg)
  }
}
