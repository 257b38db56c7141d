pub mod dispatcher;
pub mod enrichment_service;
pub mod selector;

pub use dispatcher::{DispatchOutcome, EventDispatcher};
pub use enrichment_service::{EnrichOutcome, EnrichmentService};
pub use selector::select_most_popular;
