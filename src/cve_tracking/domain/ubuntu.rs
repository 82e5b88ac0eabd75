use super::document::VendorDocument;
use super::vendor::Vendor;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Ubuntu CVE tracker document for one candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UbuntuCve {
    /// CVE identifier ("Candidate" in the tracker)
    pub candidate: String,
    #[serde(default)]
    pub public_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub ubuntu_description: Option<String>,
    #[serde(default)]
    pub references: Vec<String>,
    #[serde(default)]
    pub bugs: Vec<String>,
    #[serde(default)]
    pub patches: Vec<UbuntuPatch>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UbuntuPatch {
    pub package_name: String,
    #[serde(default)]
    pub release_patches: Vec<UbuntuReleasePatch>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UbuntuReleasePatch {
    /// Release codename ("focal")
    pub release_name: String,
    /// "needed", "pending", "released", "not-affected", "DNE", ...
    pub status: String,
    #[serde(default)]
    pub note: Option<String>,
}

impl VendorDocument for UbuntuCve {
    const VENDOR: Vendor = Vendor::Ubuntu;

    fn cve_id(&self) -> &str {
        &self.candidate
    }

    fn index_terms(&self) -> Vec<&str> {
        self.patches
            .iter()
            .map(|patch| patch.package_name.as_str())
            .collect()
    }
}
