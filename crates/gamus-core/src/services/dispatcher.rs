use tracing::{info, warn};

use crate::domain::{ArtistId, Event, EventKind};
use crate::errors::DispatchError;
use crate::ports::{ArtistStore, CatalogClient, Clock};
use crate::services::enrichment_service::{EnrichOutcome, EnrichmentService};

/// Qué pasó con un evento que se despachó sin error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
  Enriched(ArtistId),
  /// El catálogo no tenía coincidencias; nada que hacer, pero no es un fallo.
  NoMatch(ArtistId),
  /// Tipo de evento desconocido para este worker.
  Ignored,
}

/// Enruta cada [`Event`] a su handler.
pub struct EventDispatcher<S, C, K>
where
  S: ArtistStore,
  C: CatalogClient,
  K: Clock,
{
  enrichment: EnrichmentService<S, C, K>,
}

impl<S, C, K> EventDispatcher<S, C, K>
where
  S: ArtistStore,
  C: CatalogClient,
  K: Clock,
{
  pub fn new(enrichment: EnrichmentService<S, C, K>) -> Self {
    Self { enrichment }
  }

  pub async fn dispatch(&self, event: Event) -> Result<DispatchOutcome, DispatchError> {
    let kind = event.kind();

    match event {
      Event::ArtistCreated(body) => {
        info!(event_kind = %kind, id = %body.id, name = %body.name, "fetching artist information");
        self.handle_artist_created(body.id, &body.name).await
      }
      Event::ArtistDeleted(body) => {
        warn!(event_kind = %kind, id = %body.id, "artist deletion is not implemented");
        Err(DispatchError::Unsupported(EventKind::ArtistDeleted))
      }
      Event::Unknown(raw) => {
        info!(event_kind = %kind, raw_type = raw, "ignoring event of unknown type");
        Ok(DispatchOutcome::Ignored)
      }
    }
  }

  async fn handle_artist_created(&self, id: ArtistId, name: &str) -> Result<DispatchOutcome, DispatchError> {
    let outcome = self.enrichment.enrich(id, name).await?;

    Ok(match outcome {
      EnrichOutcome::Enriched(_) => DispatchOutcome::Enriched(id),
      EnrichOutcome::NoMatch => DispatchOutcome::NoMatch(id),
    })
  }
}
