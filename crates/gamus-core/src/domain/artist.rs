use crate::domain::candidate::CatalogCandidate;
use crate::domain::ids::ArtistId;
use crate::domain::metadata::{Metadata, clear_if_empty};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Registro de artista tal como vive en el almacén de entidades.
///
/// El flujo de creación aguas arriba deja un registro mínimo (`id` + `name`);
/// el resto de campos los completa el enriquecimiento.
///
/// Un campo opcional sin valor es `None`, nunca `Some("")`: los almacenes
/// guardan el registro ya normalizado (ver [`Artist::normalize`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
  /// Identificador único del artista.
  pub id: ArtistId,

  /// Nombre canónico. Es el término de búsqueda en el catálogo.
  pub name: String,

  /// Géneros, en el orden que devuelve el catálogo.
  pub genres: Vec<String>,

  /// URI del artista en el catálogo externo.
  pub spotify_url: Option<String>,

  /// URL de la imagen principal.
  pub image: Option<String>,

  pub metadata: Metadata,
}

impl Artist {
  /// Registro recién creado, todavía sin enriquecer.
  pub fn new(id: ArtistId, name: impl Into<String>) -> Self {
    Self {
      id,
      name: name.into(),
      genres: Vec::new(),
      spotify_url: None,
      image: None,
      metadata: Metadata::default(),
    }
  }

  /// Pasa a `None` los campos opcionales con texto vacío.
  pub fn normalize(&mut self) {
    clear_if_empty(&mut self.spotify_url);
    clear_if_empty(&mut self.image);
    self.metadata.normalize();
  }

  /// Copia en el registro los campos del candidato elegido y sella las fechas.
  ///
  /// Si el candidato no trae imágenes, la imagen actual se conserva.
  pub fn absorb(&mut self, candidate: &CatalogCandidate, now: DateTime<Utc>) {
    self.genres = candidate.genres.clone();
    self.spotify_url = Some(candidate.uri.clone());

    if let Some(url) = candidate.first_image_url() {
      self.image = Some(url.to_owned());
    }

    self.metadata.touch(now);
    self.normalize();
  }
}
