use crate::domain::ids::ArtistId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Discriminante de un [`Event`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
  ArtistCreated,
  ArtistDeleted,
  Unknown,
}

impl fmt::Display for EventKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let s = match self {
      EventKind::ArtistCreated => "artist_created",
      EventKind::ArtistDeleted => "artist_deleted",
      EventKind::Unknown => "unknown",
    };
    f.write_str(s)
  }
}

/// Cuerpo de un evento de creación de artista.
///
/// Lleva lo justo para localizar el registro; `name` es solo una pista.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistCreated {
  pub id: ArtistId,
  pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistDeleted {
  pub id: ArtistId,
}

/// Unidad de trabajo decodificada de un mensaje entrante.
///
/// Conjunto cerrado de variantes: cada una la atiende una rama concreta del
/// dispatcher. Los tipos que este worker aún no conoce llegan como
/// [`Event::Unknown`] con el discriminante en bruto.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
  ArtistCreated(ArtistCreated),
  ArtistDeleted(ArtistDeleted),
  Unknown(i32),
}

impl Event {
  pub fn kind(&self) -> EventKind {
    match self {
      Event::ArtistCreated(_) => EventKind::ArtistCreated,
      Event::ArtistDeleted(_) => EventKind::ArtistDeleted,
      Event::Unknown(_) => EventKind::Unknown,
    }
  }
}
