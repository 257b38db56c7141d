use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Marcas de tiempo de enriquecimiento de un registro.
///
/// - `created_at` se fija una única vez, en el primer enriquecimiento.
/// - `updated_at` se refresca en cada pasada.
///
/// Ambas se guardan como texto RFC 3339 en UTC. Un texto vacío cuenta como
/// marca sin fijar.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
  pub created_at: Option<String>,
  pub updated_at: Option<String>,
}

impl Metadata {
  /// Sella el registro con `now`.
  pub fn touch(&mut self, now: DateTime<Utc>) {
    let stamp = format_timestamp(now);

    if self.created_at.as_deref().is_none_or(str::is_empty) {
      self.created_at = Some(stamp.clone());
    }

    self.updated_at = Some(stamp);
  }

  /// Convierte las marcas vacías en `None`.
  pub fn normalize(&mut self) {
    clear_if_empty(&mut self.created_at);
    clear_if_empty(&mut self.updated_at);
  }
}

/// `Some("")` pasa a `None`; cualquier otro valor queda igual.
pub fn clear_if_empty(field: &mut Option<String>) {
  if field.as_deref() == Some("") {
    *field = None;
  }
}

pub fn format_timestamp(at: DateTime<Utc>) -> String {
  at.to_rfc3339_opts(SecondsFormat::Millis, true)
}
