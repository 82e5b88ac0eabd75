use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Upstream vendor a CVE document was normalized from.
///
/// The vendor decides the hash field a document is stored under and the
/// prefix of the secondary index it maintains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Vendor {
    RedHat,
    Debian,
    Ubuntu,
    Microsoft,
}

impl Vendor {
    pub const ALL: [Vendor; 4] = [
        Vendor::RedHat,
        Vendor::Debian,
        Vendor::Ubuntu,
        Vendor::Microsoft,
    ];

    /// Field name inside the primary record hash
    pub fn field_name(self) -> &'static str {
        match self {
            Vendor::RedHat => "RedHat",
            Vendor::Debian => "Debian",
            Vendor::Ubuntu => "Ubuntu",
            Vendor::Microsoft => "Microsoft",
        }
    }

    /// Single-letter tag used in secondary index keys.
    /// Microsoft indexes CVEs by KB id rather than package name.
    pub fn index_tag(self) -> char {
        match self {
            Vendor::RedHat => 'R',
            Vendor::Debian => 'D',
            Vendor::Ubuntu => 'U',
            Vendor::Microsoft => 'K',
        }
    }
}

impl fmt::Display for Vendor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.field_name())
    }
}

impl FromStr for Vendor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "redhat" | "red-hat" | "rhel" => Ok(Vendor::RedHat),
            "debian" => Ok(Vendor::Debian),
            "ubuntu" => Ok(Vendor::Ubuntu),
            "microsoft" | "ms" => Ok(Vendor::Microsoft),
            _ => Err(format!(
                "Invalid vendor: {}. Please specify 'redhat', 'debian', 'ubuntu' or 'microsoft'",
                s
            )),
        }
    }
}
