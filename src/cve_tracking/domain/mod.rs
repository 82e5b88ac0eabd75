pub mod debian;
pub mod document;
pub mod key_schema;
pub mod microsoft;
pub mod redhat;
pub mod retention;
pub mod ubuntu;
pub mod vendor;

pub use debian::{DebianCve, DebianPackage, DebianRelease};
pub use document::VendorDocument;
pub use microsoft::{MicrosoftCve, MicrosoftKbId, MicrosoftProduct};
pub use redhat::{AffectedRelease, FixState, PackageState, RedHatBugzilla, RedHatCve, RedHatCvss3};
pub use retention::RetentionPolicy;
pub use ubuntu::{UbuntuCve, UbuntuPatch, UbuntuReleasePatch};
pub use vendor::Vendor;
