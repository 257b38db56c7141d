use tracing::{debug, error, info, warn};

use crate::domain::{Artist, ArtistId};
use crate::errors::EnrichError;
use crate::ports::{ArtistStore, CatalogClient, Clock, StoreError};
use crate::services::selector::select_most_popular;

/// Resultado de una pasada que terminó sin error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnrichOutcome {
  /// Registro fusionado con el candidato elegido y persistido.
  Enriched(Artist),
  /// El catálogo no devolvió candidatos; el registro no se tocó.
  NoMatch,
}

/// Orquestador del enriquecimiento de artistas.
///
/// Los adapters se construyen una vez por proceso y se inyectan aquí; el
/// servicio solo toma `&self`, así que puede compartirse entre pasadas
/// concurrentes sin locks propios.
pub struct EnrichmentService<S, C, K>
where
  S: ArtistStore,
  C: CatalogClient,
  K: Clock,
{
  store: S,
  catalog: C,
  clock: K,
}

impl<S, C, K> EnrichmentService<S, C, K>
where
  S: ArtistStore,
  C: CatalogClient,
  K: Clock,
{
  pub fn new(store: S, catalog: C, clock: K) -> Self {
    Self { store, catalog, clock }
  }

  /// Enriquece el artista `id`:
  /// - lee el registro del almacén
  /// - busca en el catálogo por el nombre almacenado
  /// - elige el candidato más popular
  /// - fusiona campos, sella fechas y persiste
  ///
  /// `name_hint` viene del evento y solo se usa para trazas: el registro
  /// almacenado manda.
  pub async fn enrich(&self, id: ArtistId, name_hint: &str) -> Result<EnrichOutcome, EnrichError> {
    // 1) Leer
    let mut artist = match self.store.get_artist(id).await {
      Ok(artist) => artist,
      Err(StoreError::NotFound(_)) => {
        warn!(%id, "artist not found in store, nothing to enrich");
        return Err(EnrichError::NotFound(id));
      }
      Err(e) => {
        error!(%id, error = %e, "could not fetch artist");
        return Err(e.into());
      }
    };

    if artist.name != name_hint {
      debug!(%id, stored = %artist.name, hint = %name_hint, "event name differs from stored name");
    }

    // 2) Buscar
    let candidates = self.catalog.search_artist(&artist.name).await.inspect_err(|e| {
      error!(%id, search_term = %artist.name, error = %e, "catalog search failed");
    })?;

    info!(%id, search_term = %artist.name, results = candidates.len(), "catalog search finished");

    // 3) Elegir
    let Some(best) = select_most_popular(&candidates) else {
      warn!(%id, search_term = %artist.name, "no catalog match, artist was not updated");
      return Ok(EnrichOutcome::NoMatch);
    };

    info!(%id, matched = %best.name, popularity = best.popularity, "identified most popular candidate");

    // 4) Fusionar
    artist.absorb(best, self.clock.now());

    // 5) Persistir
    self.store.put_artist(&artist).await.inspect_err(|e| {
      error!(%id, error = %e, "could not persist enriched artist");
    })?;

    info!(%id, "artist enriched and persisted");
    Ok(EnrichOutcome::Enriched(artist))
  }
}
