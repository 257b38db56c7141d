use async_trait::async_trait;
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool};
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info};

use gamus_core::domain::{Artist, ArtistId};
use gamus_core::ports::{ArtistStore, StoreError};

use crate::config::StorageConfig;
use crate::models::{ArtistRow, NewArtistRow, row_to_artist};
use crate::schema::artists;

pub(crate) const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

type SqlitePool = Pool<ConnectionManager<SqliteConnection>>;

/// PRAGMAs que se aplican a cada conexión nueva del pool.
#[derive(Debug)]
struct ConnectionOptions {
  journal_mode: Option<String>,
  busy_timeout_ms: u32,
}

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ConnectionOptions {
  fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
    let mut pragmas = format!("PRAGMA busy_timeout = {};", self.busy_timeout_ms);
    if let Some(mode) = &self.journal_mode {
      pragmas.push_str(&format!(" PRAGMA journal_mode = {mode};"));
    }
    conn.batch_execute(&pragmas).map_err(diesel::r2d2::Error::QueryError)
  }
}

/// Almacén de artistas sobre SQLite: una fila por artista, clave = UUID,
/// valor = documento JSON con el registro completo.
///
/// diesel es síncrono; cada operación toma una conexión del pool dentro de
/// `spawn_blocking` para no bloquear el runtime.
#[derive(Clone)]
pub struct SqliteArtistStore {
  pool: SqlitePool,
}

impl SqliteArtistStore {
  pub fn new_from_config(cfg: &StorageConfig) -> Result<Self, StoreError> {
    let options = ConnectionOptions { journal_mode: cfg.journal_mode.clone(), busy_timeout_ms: cfg.busy_timeout_ms };
    Self::open(&cfg.db_path.to_string_lossy(), cfg.pool_size, options)
  }

  fn open(database_url: &str, pool_size: u32, options: ConnectionOptions) -> Result<Self, StoreError> {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    let pool = Pool::builder()
      .max_size(pool_size)
      .connection_customizer(Box::new(options))
      .build(manager)
      .map_err(|e| StoreError::Storage(format!("could not open {database_url}: {e}")))?;

    let mut conn = pool.get().map_err(storage_err)?;
    let applied = conn
      .run_pending_migrations(MIGRATIONS)
      .map_err(|e| StoreError::Storage(format!("migrations failed: {e}")))?;

    info!(database = database_url, migrations = applied.len(), "artist store ready");
    Ok(Self { pool })
  }

  async fn with_conn<T, F>(&self, f: F) -> Result<T, StoreError>
  where
    F: FnOnce(&mut SqliteConnection) -> Result<T, StoreError> + Send + 'static,
    T: Send + 'static,
  {
    let pool = self.pool.clone();

    tokio::task::spawn_blocking(move || {
      let mut conn = pool.get().map_err(storage_err)?;
      f(&mut conn)
    })
    .await
    .map_err(|e| StoreError::Storage(format!("blocking task failed: {e}")))?
  }
}

fn storage_err(e: impl std::fmt::Display) -> StoreError {
  StoreError::Storage(e.to_string())
}

#[async_trait]
impl ArtistStore for SqliteArtistStore {
  async fn get_artist(&self, artist_id: ArtistId) -> Result<Artist, StoreError> {
    let key = artist_id.to_string();

    let row = self
      .with_conn(move |conn| {
        artists::table.find(key).first::<ArtistRow>(conn).optional().map_err(storage_err)
      })
      .await?;

    let Some(row) = row else {
      debug!(id = %artist_id, "no artist found for id");
      return Err(StoreError::NotFound(artist_id));
    };

    let artist = row_to_artist(row)?;
    debug!(id = %artist_id, name = %artist.name, "artist found");
    Ok(artist)
  }

  async fn put_artist(&self, artist: &Artist) -> Result<(), StoreError> {
    // El documento guarda "" para los campos sin valor; se normaliza antes
    // para que lo que se lee después sea igual a lo escrito.
    let mut normalized = artist.clone();
    normalized.normalize();
    let row = NewArtistRow::try_from(&normalized)?;
    let artist_id = artist.id;

    self
      .with_conn(move |conn| {
        diesel::insert_into(artists::table)
          .values(&row)
          .on_conflict(artists::id)
          .do_update()
          .set(artists::document.eq(&row.document))
          .execute(conn)
          .map_err(storage_err)?;
        Ok(())
      })
      .await?;

    info!(id = %artist_id, "artist persisted");
    Ok(())
  }
}
