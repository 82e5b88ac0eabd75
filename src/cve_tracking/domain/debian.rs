use super::document::VendorDocument;
use super::vendor::Vendor;
use serde::{Deserialize, Serialize};

/// Debian security tracker document for one CVE
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebianCve {
    pub cve_id: String,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub package: Vec<DebianPackage>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebianPackage {
    pub package_name: String,
    #[serde(default)]
    pub release: Vec<DebianRelease>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebianRelease {
    /// Release codename ("bookworm")
    pub product_name: String,
    /// "open", "resolved", "undetermined"
    pub status: String,
    #[serde(default)]
    pub fixed_version: Option<String>,
    #[serde(default)]
    pub urgency: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}

impl VendorDocument for DebianCve {
    const VENDOR: Vendor = Vendor::Debian;

    fn cve_id(&self) -> &str {
        &self.cve_id
    }

    fn index_terms(&self) -> Vec<&str> {
        self.package
            .iter()
            .map(|package| package.package_name.as_str())
            .collect()
    }
}
