use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("io error: {0}")]
  Io(#[from] std::io::Error),
  #[error("toml error: {0}")]
  Toml(#[from] toml::de::Error),
  #[error("directories error: could not determine home directory")]
  Directories,
  #[error("other: {0}")]
  Other(String),
}

/// Directorios del worker.
///
/// `GAMUS_BASE_DIR` fuerza un layout "portable" bajo un único directorio
/// (contenedores, tests); si no, se usan los directorios del sistema.
#[derive(Debug, Clone)]
pub struct GamusPaths {
  pub base_dir: PathBuf,
  pub config_dir: PathBuf,
  pub data_dir: PathBuf,
}

impl GamusPaths {
  pub fn detect() -> Result<Self, ConfigError> {
    if let Ok(env_base) = std::env::var("GAMUS_BASE_DIR") {
      return Self::from_base(env_base);
    }

    let proj_dirs = ProjectDirs::from("com", "gamus", "gamus-worker").ok_or(ConfigError::Directories)?;
    Self::create(
      proj_dirs.config_dir().to_path_buf(),
      proj_dirs.config_dir().to_path_buf(),
      proj_dirs.data_dir().to_path_buf(),
    )
  }

  /// Layout portable: `<base>/config` y `<base>/data`.
  pub fn from_base(base: impl AsRef<Path>) -> Result<Self, ConfigError> {
    let base = base.as_ref().to_path_buf();
    Self::create(base.clone(), base.join("config"), base.join("data"))
  }

  fn create(base_dir: PathBuf, config_dir: PathBuf, data_dir: PathBuf) -> Result<Self, ConfigError> {
    std::fs::create_dir_all(&config_dir)?;
    std::fs::create_dir_all(&data_dir)?;

    Ok(Self { base_dir, config_dir, data_dir })
  }

  pub fn config_file(&self) -> PathBuf {
    self.config_dir.join("worker.toml")
  }
}
