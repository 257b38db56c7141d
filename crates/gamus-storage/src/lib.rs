pub mod config;
pub mod memory;
pub mod models;
pub mod schema;
mod sqlite;

pub use config::StorageConfig;
pub use memory::InMemoryArtistStore;
pub use sqlite::SqliteArtistStore;
