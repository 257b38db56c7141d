use gamus_core::domain::{ArtistCreated, ArtistDeleted, ArtistId, Event, EventKind};
use prost::Message;
use thiserror::Error;
use tracing::debug;

use crate::wire::event_envelope::Body;
use crate::wire::{ArtistCreatedBody, ArtistDeletedBody, EventEnvelope, EventType};

#[derive(Debug, Error)]
pub enum DecodeError {
  #[error("payload does not match the event schema: {0}")]
  Wire(#[from] prost::DecodeError),

  #[error("{0} event carries no body")]
  MissingBody(EventKind),

  #[error("invalid artist id {raw:?}: {source}")]
  InvalidId {
    raw: String,
    #[source]
    source: uuid::Error,
  },
}

/// Decodifica un payload binario en un [`Event`].
///
/// Los discriminantes que no conocemos (o `UNSPECIFIED`) se devuelven como
/// [`Event::Unknown`] sin mirar el cuerpo.
pub fn decode(payload: &[u8]) -> Result<Event, DecodeError> {
  let envelope = EventEnvelope::decode(payload)?;
  let raw_type = envelope.event_type;

  let event = match (EventType::try_from(raw_type), envelope.body) {
    (Ok(EventType::ArtistCreated), Some(Body::ArtistCreated(body))) => {
      Event::ArtistCreated(ArtistCreated { id: parse_id(&body.id)?, name: body.name })
    }
    (Ok(EventType::ArtistCreated), _) => return Err(DecodeError::MissingBody(EventKind::ArtistCreated)),
    (Ok(EventType::ArtistDeleted), Some(Body::ArtistDeleted(body))) => {
      Event::ArtistDeleted(ArtistDeleted { id: parse_id(&body.id)? })
    }
    (Ok(EventType::ArtistDeleted), _) => return Err(DecodeError::MissingBody(EventKind::ArtistDeleted)),
    (Ok(EventType::Unspecified), _) | (Err(_), _) => Event::Unknown(raw_type),
  };

  debug!(event_kind = %event.kind(), bytes = payload.len(), "event decoded");
  Ok(event)
}

/// Operación inversa de [`decode`]: produce los bytes que publicaría el
/// productor para este evento.
pub fn encode(event: &Event) -> Vec<u8> {
  let envelope = match event {
    Event::ArtistCreated(body) => EventEnvelope {
      event_type: EventType::ArtistCreated as i32,
      body: Some(Body::ArtistCreated(ArtistCreatedBody {
        id: body.id.to_string(),
        name: body.name.clone(),
      })),
    },
    Event::ArtistDeleted(body) => EventEnvelope {
      event_type: EventType::ArtistDeleted as i32,
      body: Some(Body::ArtistDeleted(ArtistDeletedBody { id: body.id.to_string() })),
    },
    Event::Unknown(raw) => EventEnvelope { event_type: *raw, body: None },
  };

  envelope.encode_to_vec()
}

fn parse_id(raw: &str) -> Result<ArtistId, DecodeError> {
  raw.parse().map_err(|source| DecodeError::InvalidId { raw: raw.to_owned(), source })
}
