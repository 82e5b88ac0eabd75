use crate::cve_tracking::domain::{FixState, Vendor};
use std::collections::BTreeSet;
use std::str::FromStr;

/// Which side of the fix a status query asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixStatus {
    Unfixed,
    Fixed,
}

impl FromStr for FixStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "unfixed" => Ok(FixStatus::Unfixed),
            "fixed" => Ok(FixStatus::Fixed),
            _ => Err(format!(
                "Invalid fix status: {}. Please specify 'unfixed' or 'fixed'",
                s
            )),
        }
    }
}

/// Set of release statuses a filtered query keeps
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatusSet(BTreeSet<String>);

impl StatusSet {
    pub fn new<I, S>(statuses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(statuses.into_iter().map(Into::into).collect())
    }

    /// Vendor status vocabulary for a fix side.
    /// Returns None for vendors without release-scoped statuses.
    pub fn for_vendor(vendor: Vendor, status: FixStatus) -> Option<Self> {
        let statuses: &[&str] = match (vendor, status) {
            (Vendor::Debian, FixStatus::Unfixed) => &["open"],
            (Vendor::Debian, FixStatus::Fixed) => &["resolved"],
            (Vendor::Ubuntu, FixStatus::Unfixed) => &["needed", "pending"],
            (Vendor::Ubuntu, FixStatus::Fixed) => &["released"],
            (Vendor::RedHat, _) | (Vendor::Microsoft, _) => return None,
        };
        Some(Self::new(statuses.iter().copied()))
    }

    pub fn contains(&self, status: &str) -> bool {
        self.0.contains(status)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Red Hat platform CPE for a major version
pub fn redhat_platform_cpe(major: &str) -> String {
    format!("cpe:/o:redhat:enterprise_linux:{}", major.trim())
}

/// Fix-state predicate for Red Hat "unfixed" queries.
///
/// "Not affected" and "New" never count as unfixed; "Will not fix" counts
/// unless `ignore_will_not_fix` is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RedHatUnfixedPolicy {
    pub ignore_will_not_fix: bool,
}

impl RedHatUnfixedPolicy {
    pub fn new(ignore_will_not_fix: bool) -> Self {
        Self {
            ignore_will_not_fix,
        }
    }

    pub fn admits(&self, state: &FixState) -> bool {
        match state {
            FixState::NotAffected | FixState::New => false,
            FixState::WillNotFix => !self.ignore_will_not_fix,
            _ => true,
        }
    }
}
