use crate::io::atomic_write_str;
use crate::paths::{ConfigError, GamusPaths};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::io::ErrorKind;
use toml_edit::{DocumentMut, Item};
use tracing::debug;

/// Acceso por secciones (`[storage]`, `[worker]`, ...) a la configuración.
pub trait ConfigBackend {
  /// Lee `section`. Sin archivo o sin sección devuelve `T::default()`; los
  /// campos ausentes los completa `serde(default)`.
  fn load_section_with_default<T>(&self, section: &str) -> Result<T, ConfigError>
  where
    T: DeserializeOwned + Default;

  /// Reescribe `section` conservando el resto del archivo y sus comentarios.
  fn save_section<T: Serialize>(&self, section: &str, value: &T) -> Result<(), ConfigError>;
}

pub struct TomlConfigBackend {
  paths: GamusPaths,
}

impl TomlConfigBackend {
  pub fn new(paths: GamusPaths) -> Self {
    Self { paths }
  }

  pub fn paths(&self) -> &GamusPaths {
    &self.paths
  }
}

impl ConfigBackend for TomlConfigBackend {
  fn load_section_with_default<T>(&self, section: &str) -> Result<T, ConfigError>
  where
    T: DeserializeOwned + Default,
  {
    let path = self.paths.config_file();
    let content = match fs::read_to_string(&path) {
      Ok(c) => c,
      Err(e) if e.kind() == ErrorKind::NotFound => {
        debug!(path = %path.display(), section, "no config file, using defaults");
        return Ok(T::default());
      }
      Err(e) => return Err(e.into()),
    };

    let toml_val: toml::Value = toml::from_str(&content)?;

    let Some(table) = toml_val.get(section) else {
      debug!(section, "section missing, using defaults");
      return Ok(T::default());
    };

    table.clone().try_into().map_err(|e| ConfigError::Other(format!("decode section [{section}]: {e}")))
  }

  fn save_section<T: Serialize>(&self, section: &str, value: &T) -> Result<(), ConfigError> {
    let path = self.paths.config_file();

    // Documento actual (con sus comentarios) o uno vacío.
    let mut doc: DocumentMut = match fs::read_to_string(&path) {
      Ok(content) => content
        .parse::<DocumentMut>()
        .map_err(|e| ConfigError::Other(format!("parse toml_edit doc: {e}")))?,
      Err(e) if e.kind() == ErrorKind::NotFound => DocumentMut::new(),
      Err(e) => return Err(e.into()),
    };

    let section_str = toml::to_string(value)
      .map_err(|e| ConfigError::Other(format!("encode section [{section}]: {e}")))?;

    let section_item: Item = section_str
      .parse::<DocumentMut>()
      .map_err(|e| ConfigError::Other(format!("parse section as doc: {e}")))?
      .into_item();

    // Solo se reemplaza la sección; el resto del documento queda intacto.
    doc[section] = section_item;

    atomic_write_str(&path, &doc.to_string())?;
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde::Deserialize;
  use tempfile::tempdir;

  #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
  #[serde(default)]
  struct Sample {
    limit: u32,
    name: String,
  }

  fn backend() -> (tempfile::TempDir, TomlConfigBackend) {
    let tmp = tempdir().unwrap();
    let paths = GamusPaths::from_base(tmp.path()).unwrap();
    (tmp, TomlConfigBackend::new(paths))
  }

  #[test]
  fn missing_file_yields_defaults() {
    let (_tmp, backend) = backend();

    let sample: Sample = backend.load_section_with_default("sample").unwrap();

    assert_eq!(sample, Sample::default());
    assert!(!backend.paths().config_file().exists());
  }

  #[test]
  fn saved_section_loads_back() {
    let (_tmp, backend) = backend();
    let value = Sample { limit: 5, name: "catalog".into() };

    backend.save_section("sample", &value).unwrap();

    assert_eq!(backend.load_section_with_default::<Sample>("sample").unwrap(), value);
  }

  #[test]
  fn saving_keeps_other_sections_and_comments() {
    let (_tmp, backend) = backend();
    let path = backend.paths().config_file();
    fs::write(&path, "# worker settings\n[worker]\nmessage_deadline_secs = 10\n").unwrap();

    backend.save_section("sample", &Sample { limit: 1, name: "x".into() }).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains("# worker settings"));
    assert!(content.contains("message_deadline_secs = 10"));
    assert!(content.contains("[sample]"));
  }

  #[test]
  fn partial_section_fills_defaults() {
    let (_tmp, backend) = backend();
    fs::write(backend.paths().config_file(), "[sample]\nlimit = 9\n").unwrap();

    let sample: Sample = backend.load_section_with_default("sample").unwrap();

    assert_eq!(sample, Sample { limit: 9, name: String::new() });
  }
}
