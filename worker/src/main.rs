use anyhow::Context;
use gamus_catalog::SpotifyCatalog;
use gamus_config::{GamusPaths, TomlConfigBackend};
use gamus_core::ports::SystemClock;
use gamus_storage::SqliteArtistStore;
use gamus_worker::{NotificationBatch, Worker, WorkerConfig, logging};
use tokio::io::AsyncReadExt;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  logging::init();

  // --- Wiring: un juego de adapters por proceso ---
  let paths = GamusPaths::detect().context("could not resolve worker directories")?;
  let backend = TomlConfigBackend::new(paths);
  let config = WorkerConfig::load(&backend).context("invalid worker configuration")?;

  let store = SqliteArtistStore::new_from_config(&config.storage).context("could not open artist store")?;
  let catalog = SpotifyCatalog::new(config.catalog.clone()).context("could not build catalog client")?;
  let worker = Worker::new(store, catalog, SystemClock, config.worker.message_deadline());

  // --- Un lote por invocación, leído de stdin ---
  let mut input = String::new();
  tokio::io::stdin().read_to_string(&mut input).await.context("could not read batch from stdin")?;
  let batch: NotificationBatch = serde_json::from_str(&input).context("stdin is not a notification batch")?;

  info!(records = batch.records.len(), "batch received");
  let report = worker.process_batch(&batch).await;

  info!(
    enriched = report.enriched(),
    no_match = report.no_match(),
    ignored = report.ignored(),
    failed = report.failed(),
    "batch finished"
  );

  if !report.is_success() {
    anyhow::bail!("{} of {} messages failed", report.failed(), report.len());
  }

  Ok(())
}
