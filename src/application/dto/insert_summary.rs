use crate::cve_tracking::domain::Vendor;
use serde::Serialize;
use std::fmt;

/// InsertSummary - Result DTO of the write pipeline
///
/// Counts what a successful insert wrote. Index memberships count every
/// ZADD issued, including members that were already present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InsertSummary {
    pub vendor: Vendor,
    pub records: usize,
    pub index_memberships: usize,
    /// Microsoft product index memberships (always 0 for other vendors)
    pub product_memberships: usize,
}

impl InsertSummary {
    pub fn new(vendor: Vendor) -> Self {
        Self {
            vendor,
            records: 0,
            index_memberships: 0,
            product_memberships: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.records == 0 && self.product_memberships == 0
    }
}

impl fmt::Display for InsertSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} record(s), {} index membership(s)",
            self.records, self.vendor, self.index_memberships
        )?;
        if self.product_memberships > 0 {
            write!(f, ", {} product name(s)", self.product_memberships)?;
        }
        Ok(())
    }
}
