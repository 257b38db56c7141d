use std::time::Duration;

use gamus_core::DispatchError;
use gamus_core::ports::{ArtistStore, CatalogClient, Clock};
use gamus_core::services::{DispatchOutcome, EnrichmentService, EventDispatcher};
use gamus_events::DecodeError;
use thiserror::Error;
use tracing::{Instrument, error, info, info_span};

use crate::batch::{BatchReport, MessageReport, NotificationBatch, NotificationRecord};

#[derive(Debug, Error)]
pub enum MessageError {
  #[error("message is not valid base64: {0}")]
  Payload(#[from] base64::DecodeError),

  #[error("message could not be decoded: {0}")]
  Decode(#[from] DecodeError),

  #[error(transparent)]
  Dispatch(#[from] DispatchError),

  #[error("message processing exceeded its {0:?} deadline")]
  DeadlineExceeded(Duration),
}

/// Procesa lotes de notificaciones de uno en uno, en orden de entrega.
///
/// Los adapters viven aquí durante toda la vida del proceso; ningún mensaje
/// construye clientes propios ni comparte estado con los demás.
pub struct Worker<S, C, K>
where
  S: ArtistStore,
  C: CatalogClient,
  K: Clock,
{
  dispatcher: EventDispatcher<S, C, K>,
  deadline: Duration,
}

impl<S, C, K> Worker<S, C, K>
where
  S: ArtistStore,
  C: CatalogClient,
  K: Clock,
{
  pub fn new(store: S, catalog: C, clock: K, deadline: Duration) -> Self {
    let enrichment = EnrichmentService::new(store, catalog, clock);
    Self { dispatcher: EventDispatcher::new(enrichment), deadline }
  }

  /// Decodifica y despacha un payload. Si no decodifica, el dispatcher no
  /// llega a ejecutarse.
  ///
  /// El plazo cancela el despacho en el siguiente punto de espera, pero una
  /// escritura que ya esté en marcha en el almacén termina igualmente: un
  /// mensaje marcado `DeadlineExceeded` puede haber dejado el registro
  /// enriquecido.
  pub async fn process_message(&self, payload: &[u8]) -> Result<DispatchOutcome, MessageError> {
    let event = gamus_events::decode(payload)?;

    let outcome = tokio::time::timeout(self.deadline, self.dispatcher.dispatch(event))
      .await
      .map_err(|_| MessageError::DeadlineExceeded(self.deadline))??;

    Ok(outcome)
  }

  /// Un fallo en un mensaje no afecta a sus hermanos del lote.
  pub async fn process_batch(&self, batch: &NotificationBatch) -> BatchReport {
    let mut report = BatchReport::default();

    for record in &batch.records {
      let message_id = record.notification.message_id.clone();
      let span = info_span!("message", message_id = %message_id);

      let result = self.process_record(record).instrument(span).await;
      report.messages.push(MessageReport { message_id, result });
    }

    report
  }

  async fn process_record(&self, record: &NotificationRecord) -> Result<DispatchOutcome, MessageError> {
    let notification = &record.notification;
    info!(
      event_source = %record.event_source,
      timestamp = %notification.timestamp,
      "message received, beginning processing"
    );

    let payload = notification.payload()?;
    let result = self.process_message(&payload).await;

    match &result {
      Ok(outcome) => info!(?outcome, "message processed"),
      Err(e) => error!(error = %e, "message failed"),
    }
    result
  }
}
