//! cve-store - vendor CVE records on Redis
//!
//! This library stores normalized CVE records from Red Hat, Debian, Ubuntu
//! and Microsoft in a key/value + sorted-set store and answers point lookups
//! and "which CVEs affect package X on release Y" queries, following
//! hexagonal architecture and Domain-Driven Design principles.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`cve_tracking`): Vendor documents, key schema, codename
//!   tables, fix-status policies, codec and narrowing services
//! - **Application Layer** (`application`): Write pipeline, point/multi reader
//!   and filtered reader use cases
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Redis and in-memory stores, console progress,
//!   record files
//! - **Shared** (`shared`): Common error and result types
//!
//! # Example
//!
//! ```no_run
//! use cve_store::prelude::*;
//!
//! # async fn example(records: Vec<DebianCve>) -> Result<()> {
//! let store = RedisStore::open("redis://127.0.0.1:6379/0").await?;
//!
//! // Write with a one-day expiry
//! let insert = InsertCvesUseCase::new(
//!     store.clone(),
//!     RetentionPolicy::from_seconds(86_400),
//!     StderrProgressReporter::new(),
//! );
//! insert.insert(&records).await?;
//!
//! // Which CVEs are still open for bash on Debian 12?
//! let filter = FilterCvesUseCase::new(store.clone(), CodenameTables::default());
//! let open = filter.unfixed_debian("12", "bash").await?;
//! println!("{} open CVE(s)", open.len());
//!
//! store.close().await?;
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod config;
pub mod cve_tracking;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::RecordFileReader;
    pub use crate::adapters::outbound::storage::{InMemoryStore, RedisStore};
    pub use crate::application::dto::{InsertSummary, StatusQuery};
    pub use crate::application::use_cases::{
        FilterCvesUseCase, InsertCvesUseCase, LookupCvesUseCase,
    };
    pub use crate::cve_tracking::domain::{
        DebianCve, DebianPackage, DebianRelease, FixState, MicrosoftCve, MicrosoftKbId,
        MicrosoftProduct, PackageState, RedHatCve, RetentionPolicy, UbuntuCve, UbuntuPatch,
        UbuntuReleasePatch, Vendor, VendorDocument,
    };
    pub use crate::cve_tracking::policies::{CodenameTables, FixStatus, StatusSet};
    pub use crate::ports::outbound::{CommandBatch, ProgressReporter, RecordStore, StoreCommand};
    pub use crate::shared::error::{ExitCode, StoreError};
    pub use crate::shared::{Result, StoreResult};
}
