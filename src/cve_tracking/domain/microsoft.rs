use super::document::VendorDocument;
use super::vendor::Vendor;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Microsoft Security Update Guide document for one CVE
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MicrosoftCve {
    pub cve_id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub published_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_update_date: Option<DateTime<Utc>>,
    /// Ids of the affected products, resolvable through the product index
    #[serde(default)]
    pub product_ids: Vec<String>,
    #[serde(default)]
    pub kb_ids: Vec<MicrosoftKbId>,
}

/// Knowledge Base article fixing the CVE
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MicrosoftKbId {
    pub kb_id: String,
    #[serde(default)]
    pub url: Option<String>,
}

/// Product id to display name mapping
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MicrosoftProduct {
    pub product_id: String,
    pub product_name: String,
}

impl VendorDocument for MicrosoftCve {
    const VENDOR: Vendor = Vendor::Microsoft;

    fn cve_id(&self) -> &str {
        &self.cve_id
    }

    fn index_terms(&self) -> Vec<&str> {
        self.kb_ids.iter().map(|kb| kb.kb_id.as_str()).collect()
    }
}
