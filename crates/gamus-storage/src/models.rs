use crate::schema::artists;

use diesel::prelude::*;
use gamus_core::domain::{Artist, ArtistId, Metadata};
use gamus_core::ports::StoreError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Queryable)]
#[diesel(table_name = artists)]
pub struct ArtistRow {
  pub id: String,
  pub document: String,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = artists)]
pub struct NewArtistRow {
  pub id: String,
  pub document: String,
}

/// Registro completo como mapa de atributos.
///
/// Las claves siguen el formato que usa el resto de servicios que leen la
/// tabla (`Id`, `Name`, `SpotifyUrl`, ...). Un texto vacío equivale a campo
/// sin valor.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ArtistDocument {
  pub id: String,
  pub name: String,
  #[serde(default)]
  pub genres: Vec<String>,
  #[serde(default)]
  pub spotify_url: String,
  #[serde(default)]
  pub image: String,
  #[serde(default)]
  pub metadata: MetadataDocument,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MetadataDocument {
  #[serde(default)]
  pub created_at: String,
  #[serde(default)]
  pub updated_at: String,
}

impl From<&Artist> for ArtistDocument {
  fn from(artist: &Artist) -> Self {
    ArtistDocument {
      id: artist.id.to_string(),
      name: artist.name.clone(),
      genres: artist.genres.clone(),
      spotify_url: artist.spotify_url.clone().unwrap_or_default(),
      image: artist.image.clone().unwrap_or_default(),
      metadata: MetadataDocument {
        created_at: artist.metadata.created_at.clone().unwrap_or_default(),
        updated_at: artist.metadata.updated_at.clone().unwrap_or_default(),
      },
    }
  }
}

impl TryFrom<ArtistDocument> for Artist {
  type Error = StoreError;

  fn try_from(doc: ArtistDocument) -> Result<Self, Self::Error> {
    let id: ArtistId =
      doc.id.parse().map_err(|e| StoreError::Codec(format!("invalid id {:?}: {e}", doc.id)))?;

    Ok(Artist {
      id,
      name: doc.name,
      genres: doc.genres,
      spotify_url: non_empty(doc.spotify_url),
      image: non_empty(doc.image),
      metadata: Metadata {
        created_at: non_empty(doc.metadata.created_at),
        updated_at: non_empty(doc.metadata.updated_at),
      },
    })
  }
}

impl TryFrom<&Artist> for NewArtistRow {
  type Error = StoreError;

  fn try_from(artist: &Artist) -> Result<Self, Self::Error> {
    let document = serde_json::to_string(&ArtistDocument::from(artist))
      .map_err(|e| StoreError::Codec(e.to_string()))?;
    Ok(NewArtistRow { id: artist.id.to_string(), document })
  }
}

pub fn row_to_artist(row: ArtistRow) -> Result<Artist, StoreError> {
  let doc: ArtistDocument = serde_json::from_str(&row.document)
    .map_err(|e| StoreError::Codec(format!("artist {}: {e}", row.id)))?;

  if doc.id != row.id {
    return Err(StoreError::Codec(format!("document id {} does not match key {}", doc.id, row.id)));
  }

  Artist::try_from(doc)
}

fn non_empty(s: String) -> Option<String> {
  if s.is_empty() { None } else { Some(s) }
}
