use gamus_core::domain::{CandidateImage, CatalogCandidate};
use serde::Deserialize;

use crate::error::CatalogError;

#[derive(Debug, Deserialize)]
struct SearchResponse {
  artists: Option<Paging<ArtistObject>>,
}

#[derive(Debug, Deserialize)]
struct Paging<T> {
  #[serde(default = "Vec::new")]
  items: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct ArtistObject {
  name: String,
  uri: String,
  #[serde(default)]
  genres: Vec<String>,
  #[serde(default)]
  images: Vec<ImageObject>,
  #[serde(default)]
  popularity: u32,
}

#[derive(Debug, Deserialize)]
struct ImageObject {
  url: String,
}

impl From<ArtistObject> for CatalogCandidate {
  fn from(obj: ArtistObject) -> Self {
    CatalogCandidate {
      name: obj.name,
      uri: obj.uri,
      genres: obj.genres,
      images: obj.images.into_iter().map(|img| CandidateImage { url: img.url }).collect(),
      popularity: obj.popularity,
    }
  }
}

/// Convierte el cuerpo de `/search?type=artist` en candidatos, respetando el
/// orden del catálogo. Sin objeto `artists` no hay candidatos.
pub(crate) fn parse_search_response(body: &[u8]) -> Result<Vec<CatalogCandidate>, CatalogError> {
  let resp: SearchResponse = serde_json::from_slice(body)?;

  Ok(resp.artists.map(|page| page.items.into_iter().map(CatalogCandidate::from).collect()).unwrap_or_default())
}
