pub mod index_planner;
pub mod narrowing;
pub mod record_codec;

pub use index_planner::{IndexEntry, IndexPlanner};
pub use narrowing::{narrow_redhat_unfixed, ReleaseScoped};
pub use record_codec::RecordCodec;
