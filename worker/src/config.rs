use gamus_catalog::CatalogConfig;
use gamus_config::{ConfigBackend, ConfigError, TomlConfigBackend};
use gamus_storage::StorageConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::warn;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct WorkerSettings {
  /// Tiempo máximo para despachar un mensaje (lectura, búsqueda y escritura).
  pub message_deadline_secs: u64,
}

impl Default for WorkerSettings {
  fn default() -> Self {
    WorkerSettings { message_deadline_secs: 30 }
  }
}

impl WorkerSettings {
  pub fn load(backend: &TomlConfigBackend) -> Result<Self, ConfigError> {
    let cfg: WorkerSettings = backend.load_section_with_default("worker")?;
    if cfg.message_deadline_secs == 0 {
      return Err(ConfigError::Other("worker.message_deadline_secs must be greater than zero".into()));
    }
    if let Err(e) = backend.save_section("worker", &cfg) {
      warn!(error = %e, "could not write [worker] back to the config file");
    }
    Ok(cfg)
  }

  pub fn message_deadline(&self) -> Duration {
    Duration::from_secs(self.message_deadline_secs)
  }
}

/// Configuración completa del proceso, una sección por adapter.
///
/// `[storage]` y `[worker]` se reescriben al cargar; `[catalog]` no, para no
/// volcar credenciales que solo vengan del entorno.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
  pub storage: StorageConfig,
  pub catalog: CatalogConfig,
  pub worker: WorkerSettings,
}

impl WorkerConfig {
  pub fn load(backend: &TomlConfigBackend) -> Result<Self, ConfigError> {
    Ok(WorkerConfig {
      storage: StorageConfig::load(backend)?,
      catalog: CatalogConfig::load(backend)?,
      worker: WorkerSettings::load(backend)?,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use gamus_config::GamusPaths;
  use tempfile::tempdir;

  #[test]
  fn loads_every_section_from_one_file() {
    let tmp = tempdir().unwrap();
    let paths = GamusPaths::from_base(tmp.path()).unwrap();
    std::fs::write(
      paths.config_file(),
      r#"
[storage]
db_path = "/var/lib/gamus/artists.db"

[catalog]
client_id = "id"
client_secret = "secret"

[worker]
message_deadline_secs = 12
"#,
    )
    .unwrap();

    let cfg = WorkerConfig::load(&TomlConfigBackend::new(paths)).unwrap();

    assert_eq!(cfg.storage.db_path, std::path::PathBuf::from("/var/lib/gamus/artists.db"));
    assert_eq!(cfg.catalog.result_limit, 5);
    assert_eq!(cfg.worker.message_deadline(), Duration::from_secs(12));
  }

  #[test]
  fn loading_writes_back_storage_and_worker_only() {
    let tmp = tempdir().unwrap();
    let paths = GamusPaths::from_base(tmp.path()).unwrap();
    std::fs::write(paths.config_file(), "[catalog]\nresult_limit = 7\n").unwrap();
    let backend = TomlConfigBackend::new(paths);

    StorageConfig::load(&backend).unwrap();
    WorkerSettings::load(&backend).unwrap();

    let content = std::fs::read_to_string(backend.paths().config_file()).unwrap();
    assert!(content.contains("[storage]"));
    assert!(content.contains("message_deadline_secs = 30"));
    assert!(content.contains("[catalog]\nresult_limit = 7\n"));
    assert!(!content.contains("client_secret"));
  }

  #[test]
  fn zero_deadline_is_rejected() {
    let tmp = tempdir().unwrap();
    let paths = GamusPaths::from_base(tmp.path()).unwrap();
    std::fs::write(paths.config_file(), "[worker]\nmessage_deadline_secs = 0\n").unwrap();

    assert!(WorkerSettings::load(&TomlConfigBackend::new(paths)).is_err());
  }
}
