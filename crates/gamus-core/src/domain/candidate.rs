use serde::{Deserialize, Serialize};

/// Imagen asociada a un candidato del catálogo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateImage {
  pub url: String,
}

/// Un resultado de búsqueda del catálogo externo.
///
/// Es efímero: solo vive durante una pasada de enriquecimiento y nunca se
/// persiste tal cual, únicamente se copian algunos campos al [`Artist`].
///
/// [`Artist`]: crate::domain::artist::Artist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogCandidate {
  pub name: String,
  pub uri: String,
  pub genres: Vec<String>,
  pub images: Vec<CandidateImage>,
  /// Señal de desambiguación cuando varios resultados comparten nombre.
  pub popularity: u32,
}

impl CatalogCandidate {
  pub fn first_image_url(&self) -> Option<&str> {
    self.images.first().map(|img| img.url.as_str())
  }
}
