use super::vendor::Vendor;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;

/// A normalized CVE document as published by one vendor.
///
/// Implementors are stored under the hash field `VENDOR.field_name()` of the
/// primary record and indexed under every term returned by `index_terms`.
pub trait VendorDocument:
    Serialize + DeserializeOwned + Clone + Debug + PartialEq + Send + Sync + 'static
{
    const VENDOR: Vendor;

    /// CVE identifier the primary record is keyed by
    fn cve_id(&self) -> &str;

    /// Package names (or KB ids) referenced by the document's sub-entries.
    /// May contain duplicates; the write pipeline de-duplicates them.
    fn index_terms(&self) -> Vec<&str>;
}
