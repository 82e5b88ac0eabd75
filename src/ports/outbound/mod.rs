/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (key/value store, console).
pub mod progress_reporter;
pub mod record_store;

pub use progress_reporter::ProgressReporter;
pub use record_store::{CommandBatch, RecordStore, StoreCommand};
