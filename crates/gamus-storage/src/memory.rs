use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use gamus_core::domain::{Artist, ArtistId};
use gamus_core::ports::{ArtistStore, StoreError};

/// Almacén en memoria, para ejecuciones locales y tests.
///
/// Guarda los registros normalizados, igual que el documento de SQLite.
#[derive(Debug, Default)]
pub struct InMemoryArtistStore {
  artists: RwLock<HashMap<ArtistId, Artist>>,
}

impl InMemoryArtistStore {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_artists(artists: impl IntoIterator<Item = Artist>) -> Self {
    let map = artists.into_iter().map(|a| (a.id, a)).collect();
    Self { artists: RwLock::new(map) }
  }

  pub fn len(&self) -> usize {
    self.artists.read().map(|m| m.len()).unwrap_or(0)
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }
}

fn poisoned() -> StoreError {
  StoreError::Storage("in-memory store lock poisoned".to_string())
}

#[async_trait]
impl ArtistStore for InMemoryArtistStore {
  async fn get_artist(&self, id: ArtistId) -> Result<Artist, StoreError> {
    let guard = self.artists.read().map_err(|_| poisoned())?;
    guard.get(&id).cloned().ok_or(StoreError::NotFound(id))
  }

  async fn put_artist(&self, artist: &Artist) -> Result<(), StoreError> {
    let mut stored = artist.clone();
    stored.normalize();

    let mut guard = self.artists.write().map_err(|_| poisoned())?;
    guard.insert(stored.id, stored);
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn round_trip_and_not_found() {
    let store = InMemoryArtistStore::new();
    let artist = Artist::new(ArtistId::random(), "Justice");

    store.put_artist(&artist).await.unwrap();

    assert_eq!(store.get_artist(artist.id).await.unwrap(), artist);
    assert!(matches!(store.get_artist(ArtistId::random()).await, Err(StoreError::NotFound(_))));
    assert_eq!(store.len(), 1);
  }

  #[tokio::test]
  async fn empty_strings_read_back_as_unset() {
    let store = InMemoryArtistStore::new();
    let mut artist = Artist::new(ArtistId::random(), "Justice");
    artist.spotify_url = Some(String::new());
    artist.metadata.created_at = Some(String::new());

    store.put_artist(&artist).await.unwrap();

    let back = store.get_artist(artist.id).await.unwrap();
    assert_eq!(back.spotify_url, None);
    assert_eq!(back.metadata.created_at, None);
    assert_eq!(back, Artist::new(artist.id, "Justice"));
  }
}
