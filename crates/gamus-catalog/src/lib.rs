//! Adapter del catálogo externo (Spotify Web API) para el port
//! [`CatalogClient`](gamus_core::ports::CatalogClient).

pub mod config;
pub mod error;
mod response;
mod spotify;
mod token;

pub use config::CatalogConfig;
pub use error::CatalogError;
pub use spotify::SpotifyCatalog;
