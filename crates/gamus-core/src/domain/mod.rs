pub mod artist;
pub mod candidate;
pub mod event;
pub mod ids;
pub mod metadata;

pub use artist::Artist;
pub use candidate::{CandidateImage, CatalogCandidate};
pub use event::{ArtistCreated, ArtistDeleted, Event, EventKind};
pub use ids::ArtistId;
pub use metadata::Metadata;
