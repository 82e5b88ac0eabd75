use crate::cve_tracking::policies::FixStatus;

/// StatusQuery - Request DTO for filtered reads
///
/// Asks which CVEs affect `package` on release `major` on one side of the
/// fix. `major` is the vendor's version ("12", "20.04"), not the codename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusQuery {
    pub major: String,
    pub package: String,
    pub status: FixStatus,
}

impl StatusQuery {
    pub fn new(major: impl Into<String>, package: impl Into<String>, status: FixStatus) -> Self {
        Self {
            major: major.into(),
            package: package.into(),
            status,
        }
    }

    pub fn unfixed(major: impl Into<String>, package: impl Into<String>) -> Self {
        Self::new(major, package, FixStatus::Unfixed)
    }

    pub fn fixed(major: impl Into<String>, package: impl Into<String>) -> Self {
        Self::new(major, package, FixStatus::Fixed)
    }
}
