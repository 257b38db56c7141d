use thiserror::Error;

use crate::domain::{ArtistId, EventKind};
use crate::ports::{SearchError, StoreError};

/// Fallo terminal de una pasada de enriquecimiento.
///
/// Ningún paso se reintenta: el primer error corta la pasada y sube tal cual.
#[derive(Debug, Error)]
pub enum EnrichError {
  #[error("artist {0} not found")]
  NotFound(ArtistId),

  #[error(transparent)]
  Store(StoreError),

  #[error(transparent)]
  Search(#[from] SearchError),
}

impl From<StoreError> for EnrichError {
  fn from(err: StoreError) -> Self {
    match err {
      StoreError::NotFound(id) => EnrichError::NotFound(id),
      other => EnrichError::Store(other),
    }
  }
}

#[derive(Debug, Error)]
pub enum DispatchError {
  /// Tipo de evento reconocido pero sin implementar (p. ej. borrados).
  /// Nunca debe confundirse con un éxito.
  #[error("event type {0} is not implemented")]
  Unsupported(EventKind),

  #[error(transparent)]
  Enrich(#[from] EnrichError),
}
