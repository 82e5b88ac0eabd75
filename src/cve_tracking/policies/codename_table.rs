use crate::cve_tracking::domain::Vendor;
use crate::shared::error::StoreError;
use crate::shared::StoreResult;

/// How a caller-supplied major version is normalized before lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MajorFormat {
    /// Looked up as given ("12")
    Exact,
    /// Dots are removed first, so "20.04" and "2004" are equivalent
    Dotless,
}

/// Immutable mapping from a vendor's major version to its release codename
#[derive(Debug, Clone, Copy)]
pub struct CodenameTable {
    vendor: Vendor,
    format: MajorFormat,
    entries: &'static [(&'static str, &'static str)],
}

pub const DEBIAN_CODENAMES: CodenameTable = CodenameTable::new(
    Vendor::Debian,
    MajorFormat::Exact,
    &[
        ("7", "wheezy"),
        ("8", "jessie"),
        ("9", "stretch"),
        ("10", "buster"),
        ("11", "bullseye"),
        ("12", "bookworm"),
        ("13", "trixie"),
    ],
);

pub const UBUNTU_CODENAMES: CodenameTable = CodenameTable::new(
    Vendor::Ubuntu,
    MajorFormat::Dotless,
    &[
        ("1404", "trusty"),
        ("1604", "xenial"),
        ("1804", "bionic"),
        ("1910", "eoan"),
        ("2004", "focal"),
        ("2010", "groovy"),
        ("2104", "hirsute"),
        ("2110", "impish"),
        ("2204", "jammy"),
        ("2210", "kinetic"),
        ("2304", "lunar"),
        ("2310", "mantic"),
        ("2404", "noble"),
    ],
);

impl CodenameTable {
    pub const fn new(
        vendor: Vendor,
        format: MajorFormat,
        entries: &'static [(&'static str, &'static str)],
    ) -> Self {
        Self {
            vendor,
            format,
            entries,
        }
    }

    pub fn vendor(&self) -> Vendor {
        self.vendor
    }

    /// Resolves a major version to the codename used in release entries
    ///
    /// # Errors
    /// Returns `UnsupportedRelease` if the major version is not in the table
    pub fn resolve(&self, major: &str) -> StoreResult<&'static str> {
        let normalized = match self.format {
            MajorFormat::Exact => major.trim().to_string(),
            MajorFormat::Dotless => major.trim().replace('.', ""),
        };

        self.entries
            .iter()
            .find(|(key, _)| *key == normalized)
            .map(|(_, codename)| *codename)
            .ok_or_else(|| StoreError::UnsupportedRelease {
                vendor: self.vendor,
                major: major.to_string(),
                supported: self.majors().collect::<Vec<_>>().join(", "),
            })
    }

    pub fn majors(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(major, _)| *major)
    }
}

/// The codename tables the filtered reader is constructed with
#[derive(Debug, Clone, Copy)]
pub struct CodenameTables {
    pub debian: CodenameTable,
    pub ubuntu: CodenameTable,
}

impl CodenameTables {
    pub fn for_vendor(&self, vendor: Vendor) -> Option<&CodenameTable> {
        match vendor {
            Vendor::Debian => Some(&self.debian),
            Vendor::Ubuntu => Some(&self.ubuntu),
            Vendor::RedHat | Vendor::Microsoft => None,
        }
    }
}

impl Default for CodenameTables {
    fn default() -> Self {
        Self {
            debian: DEBIAN_CODENAMES,
            ubuntu: UBUNTU_CODENAMES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debian_lookup() {
        assert_eq!(DEBIAN_CODENAMES.resolve("12").unwrap(), "bookworm");
        assert_eq!(DEBIAN_CODENAMES.resolve("10").unwrap(), "buster");
        assert_eq!(DEBIAN_CODENAMES.resolve(" 11 ").unwrap(), "bullseye");
    }

    #[test]
    fn test_ubuntu_lookup_accepts_dotted_and_dotless() {
        assert_eq!(UBUNTU_CODENAMES.resolve("20.04").unwrap(), "focal");
        assert_eq!(UBUNTU_CODENAMES.resolve("2004").unwrap(), "focal");
        assert_eq!(UBUNTU_CODENAMES.resolve("22.04").unwrap(), "jammy");
    }

    #[test]
    fn test_debian_does_not_strip_dots() {
        assert!(DEBIAN_CODENAMES.resolve("1.2").is_err());
    }

    #[test]
    fn test_unsupported_release() {
        let error = DEBIAN_CODENAMES.resolve("99").unwrap_err();
        match error {
            StoreError::UnsupportedRelease {
                vendor,
                major,
                supported,
            } => {
                assert_eq!(vendor, Vendor::Debian);
                assert_eq!(major, "99");
                assert!(supported.contains("12"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_tables_for_vendor() {
        let tables = CodenameTables::default();
        assert_eq!(
            tables.for_vendor(Vendor::Debian).unwrap().vendor(),
            Vendor::Debian
        );
        assert_eq!(
            tables.for_vendor(Vendor::Ubuntu).unwrap().vendor(),
            Vendor::Ubuntu
        );
        assert!(tables.for_vendor(Vendor::RedHat).is_none());
        assert!(tables.for_vendor(Vendor::Microsoft).is_none());
    }
}
