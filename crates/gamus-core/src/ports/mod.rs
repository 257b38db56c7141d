pub mod artist_store;
pub mod catalog;
pub mod clock;

pub use artist_store::{ArtistStore, StoreError};
pub use catalog::{CatalogClient, SearchError};
pub use clock::{Clock, SystemClock};
