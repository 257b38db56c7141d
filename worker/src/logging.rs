use tracing_subscriber::EnvFilter;

/// Instala el subscriber global. `RUST_LOG` manda; por defecto `info`.
///
/// Los logs van a stderr: stdout queda libre para la salida del proceso.
pub fn init() {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

  let _ = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_target(false)
    .with_writer(std::io::stderr)
    .try_init();
}
