use super::document::VendorDocument;
use super::vendor::Vendor;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Red Hat CVE document (Security Data API shape)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RedHatCve {
    /// CVE identifier
    pub name: String,
    #[serde(default)]
    pub threat_severity: Option<String>,
    #[serde(default)]
    pub public_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub bugzilla: Option<RedHatBugzilla>,
    #[serde(default)]
    pub cvss3: Option<RedHatCvss3>,
    #[serde(default)]
    pub cwe: Option<String>,
    #[serde(default)]
    pub details: Vec<String>,
    #[serde(default)]
    pub statement: Option<String>,
    #[serde(default)]
    pub references: Vec<String>,
    /// Errata already shipped for the CVE
    #[serde(default)]
    pub affected_release: Vec<AffectedRelease>,
    /// Per-platform fix state of every package the CVE touches
    #[serde(default)]
    pub package_state: Vec<PackageState>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RedHatBugzilla {
    pub id: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RedHatCvss3 {
    /// Kept as text, the way the API publishes it ("7.5")
    pub base_score: String,
    pub scoring_vector: String,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AffectedRelease {
    pub product_name: String,
    #[serde(default)]
    pub release_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub advisory: Option<String>,
    #[serde(default)]
    pub package: Option<String>,
    pub cpe: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageState {
    pub product_name: String,
    pub fix_state: FixState,
    pub package_name: String,
    /// Platform CPE, e.g. `cpe:/o:redhat:enterprise_linux:8`
    pub cpe: String,
}

/// Fix state of a package on one Red Hat platform.
///
/// Serialized as the literal strings the vendor publishes; unknown values are
/// preserved verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FixState {
    Affected,
    Fixed,
    New,
    NotAffected,
    WillNotFix,
    FixDeferred,
    OutOfSupportScope,
    UnderInvestigation,
    Other(String),
}

impl FixState {
    pub fn as_str(&self) -> &str {
        match self {
            FixState::Affected => "Affected",
            FixState::Fixed => "Fixed",
            FixState::New => "New",
            FixState::NotAffected => "Not affected",
            FixState::WillNotFix => "Will not fix",
            FixState::FixDeferred => "Fix deferred",
            FixState::OutOfSupportScope => "Out of support scope",
            FixState::UnderInvestigation => "Under investigation",
            FixState::Other(raw) => raw,
        }
    }
}

impl From<String> for FixState {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "Affected" => FixState::Affected,
            "Fixed" => FixState::Fixed,
            "New" => FixState::New,
            "Not affected" => FixState::NotAffected,
            "Will not fix" => FixState::WillNotFix,
            "Fix deferred" => FixState::FixDeferred,
            "Out of support scope" => FixState::OutOfSupportScope,
            "Under investigation" => FixState::UnderInvestigation,
            _ => FixState::Other(raw),
        }
    }
}

impl From<FixState> for String {
    fn from(state: FixState) -> Self {
        match state {
            FixState::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for FixState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl VendorDocument for RedHatCve {
    const VENDOR: Vendor = Vendor::RedHat;

    fn cve_id(&self) -> &str {
        &self.name
    }

    fn index_terms(&self) -> Vec<&str> {
        self.package_state
            .iter()
            .map(|state| state.package_name.as_str())
            .collect()
    }
}
