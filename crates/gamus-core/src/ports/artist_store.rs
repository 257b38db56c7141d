use async_trait::async_trait;

use crate::domain::{Artist, ArtistId};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
  /// No existe registro para el id. Es un resultado esperado, no un fallo
  /// del almacén.
  #[error("artist {0} not found")]
  NotFound(ArtistId),

  /// El registro existe pero no se pudo (de)serializar.
  #[error("codec error: {0}")]
  Codec(String),

  #[error("storage error: {0}")]
  Storage(String),
}

/// Port del almacén de entidades: get/put por clave primaria.
///
/// `put_artist` sobrescribe el registro completo. No hay merge ni control de
/// concurrencia optimista: si dos escritores compiten por el mismo id, gana
/// el último.
#[async_trait]
pub trait ArtistStore: Send + Sync {
  async fn get_artist(&self, id: ArtistId) -> Result<Artist, StoreError>;
  async fn put_artist(&self, artist: &Artist) -> Result<(), StoreError>;
}
