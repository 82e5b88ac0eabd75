use super::lookup_cves::{load_documents, load_documents_each};
use crate::application::dto::StatusQuery;
use crate::cve_tracking::domain::key_schema::package_index_key;
use crate::cve_tracking::domain::{DebianCve, RedHatCve, UbuntuCve, Vendor, VendorDocument};
use crate::cve_tracking::policies::{
    redhat_platform_cpe, CodenameTables, RedHatUnfixedPolicy, StatusSet,
};
use crate::cve_tracking::services::{narrow_redhat_unfixed, ReleaseScoped};
use crate::ports::outbound::RecordStore;
use crate::shared::error::StoreError;
use crate::shared::StoreResult;
use std::collections::HashMap;

/// FilterCvesUseCase - "which CVEs affect package X on release Y, and in
/// what fix state"
///
/// Candidates come from the vendor's package index; each candidate document
/// is then narrowed to the package, the release and the wanted statuses.
/// Documents with nothing left after narrowing are not returned.
///
/// # Type Parameters
/// * `S` - RecordStore implementation
pub struct FilterCvesUseCase<S> {
    store: S,
    codenames: CodenameTables,
}

impl<S: RecordStore> FilterCvesUseCase<S> {
    pub fn new(store: S, codenames: CodenameTables) -> Self {
        Self { store, codenames }
    }

    /// Maps a vendor major version to its release codename
    ///
    /// # Errors
    /// `UnsupportedRelease` if the vendor has no codename table or the major
    /// version is not in it.
    pub fn resolve_codename(&self, vendor: Vendor, major: &str) -> StoreResult<&'static str> {
        match self.codenames.for_vendor(vendor) {
            Some(table) => table.resolve(major),
            None => Err(StoreError::UnsupportedRelease {
                vendor,
                major: major.to_string(),
                supported: String::new(),
            }),
        }
    }

    /// Documents with a release entry for `package` on release `major` whose
    /// status is in `wanted`, narrowed to those entries.
    ///
    /// An unsupported release yields an empty map.
    ///
    /// # Errors
    /// `ReadFailed` if the package index cannot be read, or a connection
    /// error. A candidate record that cannot be read is skipped.
    pub async fn cves_with_status<D: ReleaseScoped>(
        &self,
        major: &str,
        package: &str,
        wanted: &StatusSet,
    ) -> StoreResult<HashMap<String, D>> {
        let codename = match self.resolve_codename(D::VENDOR, major) {
            Ok(codename) => codename,
            Err(e) => {
                tracing::warn!(vendor = %D::VENDOR, major, error = %e, "Unsupported release");
                return Ok(HashMap::new());
            }
        };

        let candidates = self.candidates::<D>(package).await?;
        let narrowed: HashMap<String, D> = candidates
            .into_iter()
            .filter_map(|(cve_id, document)| {
                document
                    .narrow(package, codename, wanted)
                    .map(|narrowed| (cve_id, narrowed))
            })
            .collect();

        tracing::debug!(
            vendor = %D::VENDOR,
            package,
            codename,
            matched = narrowed.len(),
            "Filtered records"
        );
        Ok(narrowed)
    }

    /// Runs a status query against a release-scoped vendor
    pub async fn execute<D: ReleaseScoped>(
        &self,
        query: &StatusQuery,
    ) -> StoreResult<HashMap<String, D>> {
        let wanted = StatusSet::for_vendor(D::VENDOR, query.status).unwrap_or_default();
        self.cves_with_status(&query.major, &query.package, &wanted)
            .await
    }

    pub async fn unfixed_debian(
        &self,
        major: &str,
        package: &str,
    ) -> StoreResult<HashMap<String, DebianCve>> {
        self.execute(&StatusQuery::unfixed(major, package)).await
    }

    pub async fn fixed_debian(
        &self,
        major: &str,
        package: &str,
    ) -> StoreResult<HashMap<String, DebianCve>> {
        self.execute(&StatusQuery::fixed(major, package)).await
    }

    /// `major` may be given as "20.04" or "2004"
    pub async fn unfixed_ubuntu(
        &self,
        major: &str,
        package: &str,
    ) -> StoreResult<HashMap<String, UbuntuCve>> {
        self.execute(&StatusQuery::unfixed(major, package)).await
    }

    pub async fn fixed_ubuntu(
        &self,
        major: &str,
        package: &str,
    ) -> StoreResult<HashMap<String, UbuntuCve>> {
        self.execute(&StatusQuery::fixed(major, package)).await
    }

    /// Red Hat documents with an unfixed package state for `package` on
    /// RHEL `major`.
    ///
    /// "Not affected" and "New" states never match. "Will not fix" matches
    /// unless `ignore_will_not_fix` is set.
    pub async fn unfixed_redhat(
        &self,
        major: &str,
        package: &str,
        ignore_will_not_fix: bool,
    ) -> StoreResult<HashMap<String, RedHatCve>> {
        let cpe = redhat_platform_cpe(major);
        let policy = RedHatUnfixedPolicy::new(ignore_will_not_fix);

        let candidates = self.candidates::<RedHatCve>(package).await?;
        Ok(candidates
            .into_iter()
            .filter_map(|(cve_id, cve)| {
                narrow_redhat_unfixed(&cve, &cpe, package, policy)
                    .map(|narrowed| (cve_id, narrowed))
            })
            .collect())
    }

    async fn candidates<D: VendorDocument>(
        &self,
        package: &str,
    ) -> StoreResult<HashMap<String, D>> {
        let index_key = package_index_key(D::VENDOR, package);
        let cve_ids = self.store.sorted_set_members(&index_key).await?;
        let loaded = match load_documents::<S, D>(&self.store, &cve_ids).await {
            Ok(loaded) => loaded,
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => {
                tracing::warn!(
                    index = %index_key,
                    error = %e,
                    "Pipelined read failed, reading candidates one by one"
                );
                load_documents_each::<S, D>(&self.store, &cve_ids).await?
            }
        };

        for cve_id in &loaded.missing {
            tracing::warn!(
                index = %index_key,
                cve_id = %cve_id,
                "Index member has no matching record"
            );
        }
        Ok(loaded.found)
    }
}
