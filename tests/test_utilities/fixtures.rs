#![allow(dead_code)]

use cve_store::prelude::*;

pub fn debian_release(codename: &str, status: &str) -> DebianRelease {
    DebianRelease {
        product_name: codename.to_string(),
        status: status.to_string(),
        fixed_version: None,
        urgency: None,
        version: None,
    }
}

/// Debian record with one package and the given (codename, status) releases
pub fn debian_cve(cve_id: &str, package: &str, releases: &[(&str, &str)]) -> DebianCve {
    DebianCve {
        cve_id: cve_id.to_string(),
        scope: Some("local".to_string()),
        description: Some(format!("{} in {}", cve_id, package)),
        package: vec![DebianPackage {
            package_name: package.to_string(),
            release: releases
                .iter()
                .map(|(codename, status)| debian_release(codename, status))
                .collect(),
        }],
    }
}

pub fn ubuntu_cve(cve_id: &str, package: &str, releases: &[(&str, &str)]) -> UbuntuCve {
    UbuntuCve {
        candidate: cve_id.to_string(),
        public_date: None,
        priority: Some("medium".to_string()),
        description: None,
        ubuntu_description: None,
        references: vec![],
        bugs: vec![],
        patches: vec![UbuntuPatch {
            package_name: package.to_string(),
            release_patches: releases
                .iter()
                .map(|(codename, status)| UbuntuReleasePatch {
                    release_name: codename.to_string(),
                    status: status.to_string(),
                    note: None,
                })
                .collect(),
        }],
    }
}

pub fn redhat_state(package: &str, major: &str, fix_state: FixState) -> PackageState {
    PackageState {
        product_name: format!("Red Hat Enterprise Linux {}", major),
        fix_state,
        package_name: package.to_string(),
        cpe: format!("cpe:/o:redhat:enterprise_linux:{}", major),
    }
}

pub fn redhat_cve(name: &str, package_state: Vec<PackageState>) -> RedHatCve {
    RedHatCve {
        name: name.to_string(),
        threat_severity: Some("Moderate".to_string()),
        public_date: None,
        bugzilla: None,
        cvss3: None,
        cwe: None,
        details: vec![],
        statement: None,
        references: vec![],
        affected_release: vec![],
        package_state,
    }
}

pub fn microsoft_cve(cve_id: &str, kb_ids: &[&str]) -> MicrosoftCve {
    MicrosoftCve {
        cve_id: cve_id.to_string(),
        title: Some(format!("{} title", cve_id)),
        description: None,
        published_date: None,
        last_update_date: None,
        product_ids: vec!["11568".to_string()],
        kb_ids: kb_ids
            .iter()
            .map(|kb_id| MicrosoftKbId {
                kb_id: kb_id.to_string(),
                url: None,
            })
            .collect(),
    }
}
