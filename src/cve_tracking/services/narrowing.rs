//! Narrowing of vendor documents to the sub-entries a query asks about.
//!
//! A narrowed document keeps its top-level fields but only the package
//! entries, and within them only the release entries, that match the query.
//! `None` means nothing survived and the document is left out of the result.

use crate::cve_tracking::domain::{DebianCve, RedHatCve, UbuntuCve, VendorDocument};
use crate::cve_tracking::policies::{RedHatUnfixedPolicy, StatusSet};

/// Documents whose sub-entries are scoped per release codename
pub trait ReleaseScoped: VendorDocument {
    fn narrow(&self, package: &str, codename: &str, wanted: &StatusSet) -> Option<Self>;
}

impl ReleaseScoped for DebianCve {
    fn narrow(&self, package: &str, codename: &str, wanted: &StatusSet) -> Option<Self> {
        let packages: Vec<_> = self
            .package
            .iter()
            .filter(|pkg| pkg.package_name == package)
            .filter_map(|pkg| {
                let releases: Vec<_> = pkg
                    .release
                    .iter()
                    .filter(|rel| rel.product_name == codename && wanted.contains(&rel.status))
                    .cloned()
                    .collect();
                if releases.is_empty() {
                    return None;
                }
                let mut narrowed = pkg.clone();
                narrowed.release = releases;
                Some(narrowed)
            })
            .collect();

        if packages.is_empty() {
            return None;
        }
        let mut narrowed = self.clone();
        narrowed.package = packages;
        Some(narrowed)
    }
}

impl ReleaseScoped for UbuntuCve {
    fn narrow(&self, package: &str, codename: &str, wanted: &StatusSet) -> Option<Self> {
        let patches: Vec<_> = self
            .patches
            .iter()
            .filter(|patch| patch.package_name == package)
            .filter_map(|patch| {
                let release_patches: Vec<_> = patch
                    .release_patches
                    .iter()
                    .filter(|rel| rel.release_name == codename && wanted.contains(&rel.status))
                    .cloned()
                    .collect();
                if release_patches.is_empty() {
                    return None;
                }
                let mut narrowed = patch.clone();
                narrowed.release_patches = release_patches;
                Some(narrowed)
            })
            .collect();

        if patches.is_empty() {
            return None;
        }
        let mut narrowed = self.clone();
        narrowed.patches = patches;
        Some(narrowed)
    }
}

/// Keeps the package states on `cpe` for `package` that the policy admits
pub fn narrow_redhat_unfixed(
    cve: &RedHatCve,
    cpe: &str,
    package: &str,
    policy: RedHatUnfixedPolicy,
) -> Option<RedHatCve> {
    let states: Vec<_> = cve
        .package_state
        .iter()
        .filter(|state| {
            state.cpe == cpe && state.package_name == package && policy.admits(&state.fix_state)
        })
        .cloned()
        .collect();

    if states.is_empty() {
        return None;
    }
    let mut narrowed = cve.clone();
    narrowed.package_state = states;
    Some(narrowed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cve_tracking::domain::{
        DebianPackage, DebianRelease, FixState, PackageState, UbuntuPatch, UbuntuReleasePatch,
    };

    fn release(codename: &str, status: &str) -> DebianRelease {
        DebianRelease {
            product_name: codename.to_string(),
            status: status.to_string(),
            fixed_version: None,
            urgency: None,
            version: None,
        }
    }

    fn bash_cve() -> DebianCve {
        DebianCve {
            cve_id: "CVE-2023-0001".to_string(),
            scope: None,
            description: Some("bash flaw".to_string()),
            package: vec![
                DebianPackage {
                    package_name: "bash".to_string(),
                    release: vec![
                        release("bookworm", "open"),
                        release("bookworm", "resolved"),
                        release("bullseye", "open"),
                    ],
                },
                DebianPackage {
                    package_name: "dash".to_string(),
                    release: vec![release("bookworm", "open")],
                },
            ],
        }
    }

    #[test]
    fn test_debian_narrow_keeps_matching_release_only() {
        let narrowed = bash_cve()
            .narrow("bash", "bookworm", &StatusSet::new(["open"]))
            .unwrap();

        assert_eq!(narrowed.cve_id, "CVE-2023-0001");
        assert_eq!(narrowed.description.as_deref(), Some("bash flaw"));
        assert_eq!(narrowed.package.len(), 1);
        assert_eq!(narrowed.package[0].package_name, "bash");
        assert_eq!(narrowed.package[0].release, vec![release("bookworm", "open")]);
    }

    #[test]
    fn test_debian_narrow_fixed_side() {
        let narrowed = bash_cve()
            .narrow("bash", "bookworm", &StatusSet::new(["resolved"]))
            .unwrap();
        assert_eq!(
            narrowed.package[0].release,
            vec![release("bookworm", "resolved")]
        );
    }

    #[test]
    fn test_debian_narrow_nothing_survives() {
        assert!(bash_cve()
            .narrow("bash", "buster", &StatusSet::new(["open"]))
            .is_none());
        assert!(bash_cve()
            .narrow("zsh", "bookworm", &StatusSet::new(["open"]))
            .is_none());
        assert!(bash_cve()
            .narrow("bash", "bookworm", &StatusSet::new(["undetermined"]))
            .is_none());
    }

    #[test]
    fn test_ubuntu_narrow_with_multiple_statuses() {
        let cve = UbuntuCve {
            candidate: "CVE-2023-0003".to_string(),
            public_date: None,
            priority: None,
            description: None,
            ubuntu_description: None,
            references: vec![],
            bugs: vec![],
            patches: vec![UbuntuPatch {
                package_name: "openssl".to_string(),
                release_patches: ["needed", "pending", "released"]
                    .iter()
                    .map(|status| UbuntuReleasePatch {
                        release_name: "focal".to_string(),
                        status: status.to_string(),
                        note: None,
                    })
                    .collect(),
            }],
        };

        let unfixed = cve
            .narrow("openssl", "focal", &StatusSet::new(["needed", "pending"]))
            .unwrap();
        let statuses: Vec<_> = unfixed.patches[0]
            .release_patches
            .iter()
            .map(|rel| rel.status.as_str())
            .collect();
        assert_eq!(statuses, vec!["needed", "pending"]);

        assert!(cve
            .narrow("openssl", "jammy", &StatusSet::new(["needed"]))
            .is_none());
    }

    fn redhat_cve() -> RedHatCve {
        let state = |package: &str, major: &str, fix_state: FixState| PackageState {
            product_name: format!("Red Hat Enterprise Linux {}", major),
            fix_state,
            package_name: package.to_string(),
            cpe: format!("cpe:/o:redhat:enterprise_linux:{}", major),
        };
        RedHatCve {
            name: "CVE-2023-0004".to_string(),
            threat_severity: None,
            public_date: None,
            bugzilla: None,
            cvss3: None,
            cwe: None,
            details: vec![],
            statement: None,
            references: vec![],
            affected_release: vec![],
            package_state: vec![
                state("bash", "8", FixState::WillNotFix),
                state("bash", "8", FixState::NotAffected),
                state("bash", "8", FixState::New),
                state("bash", "9", FixState::Affected),
                state("zsh", "8", FixState::Affected),
            ],
        }
    }

    #[test]
    fn test_redhat_narrow_keeps_will_not_fix_by_default() {
        let narrowed = narrow_redhat_unfixed(
            &redhat_cve(),
            "cpe:/o:redhat:enterprise_linux:8",
            "bash",
            RedHatUnfixedPolicy::new(false),
        )
        .unwrap();
        assert_eq!(narrowed.package_state.len(), 1);
        assert_eq!(narrowed.package_state[0].fix_state, FixState::WillNotFix);
    }

    #[test]
    fn test_redhat_narrow_ignoring_will_not_fix_leaves_nothing() {
        let narrowed = narrow_redhat_unfixed(
            &redhat_cve(),
            "cpe:/o:redhat:enterprise_linux:8",
            "bash",
            RedHatUnfixedPolicy::new(true),
        );
        assert!(narrowed.is_none());
    }

    #[test]
    fn test_redhat_narrow_matches_platform() {
        let narrowed = narrow_redhat_unfixed(
            &redhat_cve(),
            "cpe:/o:redhat:enterprise_linux:9",
            "bash",
            RedHatUnfixedPolicy::default(),
        )
        .unwrap();
        assert_eq!(narrowed.package_state[0].fix_state, FixState::Affected);
    }
}
