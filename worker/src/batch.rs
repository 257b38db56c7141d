use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use gamus_core::services::DispatchOutcome;
use serde::Deserialize;

use crate::worker::MessageError;

/// Lote de notificaciones tal como lo entrega el topic.
///
/// ```json
/// {"Records": [{"EventSource": "aws:sns",
///               "Sns": {"MessageId": "...", "Timestamp": "...", "Message": "<base64>"}}]}
/// ```
#[derive(Debug, Deserialize)]
pub struct NotificationBatch {
  #[serde(rename = "Records", default)]
  pub records: Vec<NotificationRecord>,
}

#[derive(Debug, Deserialize)]
pub struct NotificationRecord {
  #[serde(rename = "EventSource", default)]
  pub event_source: String,
  #[serde(rename = "Sns")]
  pub notification: Notification,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Notification {
  #[serde(default)]
  pub message_id: String,
  #[serde(default)]
  pub timestamp: String,
  /// Evento protobuf codificado en base64.
  pub message: String,
}

impl Notification {
  pub fn payload(&self) -> Result<Vec<u8>, base64::DecodeError> {
    STANDARD.decode(self.message.trim())
  }
}

/// Resultado de un mensaje dentro del lote.
#[derive(Debug)]
pub struct MessageReport {
  pub message_id: String,
  pub result: Result<DispatchOutcome, MessageError>,
}

#[derive(Debug, Default)]
pub struct BatchReport {
  pub messages: Vec<MessageReport>,
}

impl BatchReport {
  pub fn len(&self) -> usize {
    self.messages.len()
  }

  pub fn is_empty(&self) -> bool {
    self.messages.is_empty()
  }

  pub fn enriched(&self) -> usize {
    self.count(|r| matches!(r, Ok(DispatchOutcome::Enriched(_))))
  }

  pub fn no_match(&self) -> usize {
    self.count(|r| matches!(r, Ok(DispatchOutcome::NoMatch(_))))
  }

  pub fn ignored(&self) -> usize {
    self.count(|r| matches!(r, Ok(DispatchOutcome::Ignored)))
  }

  pub fn failed(&self) -> usize {
    self.count(|r| r.is_err())
  }

  pub fn is_success(&self) -> bool {
    self.failed() == 0
  }

  fn count(&self, pred: impl Fn(&Result<DispatchOutcome, MessageError>) -> bool) -> usize {
    self.messages.iter().filter(|m| pred(&m.result)).count()
  }
}
