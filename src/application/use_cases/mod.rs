/// Use cases module containing application business logic orchestration
mod filter_cves;
mod insert_cves;
mod lookup_cves;

pub use filter_cves::FilterCvesUseCase;
pub use insert_cves::InsertCvesUseCase;
pub use lookup_cves::LookupCvesUseCase;
