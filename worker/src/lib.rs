pub mod batch;
pub mod config;
pub mod logging;
mod worker;

pub use batch::{BatchReport, NotificationBatch};
pub use config::WorkerConfig;
pub use worker::{MessageError, Worker};
