/// Mock implementations for testing
mod failing_store;
mod mock_progress_reporter;

pub use failing_store::FailingStore;
pub use mock_progress_reporter::MockProgressReporter;
