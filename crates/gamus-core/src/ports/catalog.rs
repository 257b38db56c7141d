use async_trait::async_trait;

use crate::domain::CatalogCandidate;

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
  #[error("catalog auth error: {0}")]
  Auth(String),

  #[error("catalog transport error: {0}")]
  Transport(String),

  #[error("catalog returned status {status}: {message}")]
  Remote { status: u16, message: String },

  #[error("catalog response could not be decoded: {0}")]
  Decode(String),
}

/// Port del catálogo externo de artistas.
///
/// Una búsqueda sin resultados devuelve `Ok(vec![])`; los errores quedan para
/// fallos de transporte, autenticación o respuesta.
///
/// Implementaciones posibles:
/// - Spotify Web API
/// - dobles de test en memoria
#[async_trait]
pub trait CatalogClient: Send + Sync {
  async fn search_artist(&self, term: &str) -> Result<Vec<CatalogCandidate>, SearchError>;
}
