use crate::cve_tracking::domain::key_schema::{
    kb_index_key, package_index_key, product_index_key, record_key,
};
use crate::cve_tracking::domain::{Vendor, VendorDocument};
use crate::cve_tracking::services::RecordCodec;
use crate::ports::outbound::RecordStore;
use crate::shared::StoreResult;
use std::collections::{HashMap, HashSet};

/// Documents loaded by a multi-read, plus the ids that had no vendor field
pub(super) struct LoadedDocuments<D> {
    pub found: HashMap<String, D>,
    pub missing: Vec<String>,
}

/// Reads the vendor field of several primary records in one round trip.
///
/// Duplicate ids are read once. A document that fails to decode is logged
/// and left out; it is neither found nor missing.
pub(super) async fn load_documents<S, D>(
    store: &S,
    ids: &[String],
) -> StoreResult<LoadedDocuments<D>>
where
    S: RecordStore,
    D: VendorDocument,
{
    let mut seen = HashSet::new();
    let unique: Vec<&String> = ids.iter().filter(|id| seen.insert(id.as_str())).collect();

    let mut loaded = LoadedDocuments {
        found: HashMap::with_capacity(unique.len()),
        missing: Vec::new(),
    };
    if unique.is_empty() {
        return Ok(loaded);
    }

    let keys: Vec<String> = unique.iter().map(|id| record_key(id)).collect();
    let records = store.hash_get_all_many(&keys).await?;

    for (id, record) in unique.into_iter().zip(records) {
        match RecordCodec::decode_field::<D>(id, &record) {
            Ok(Some(document)) => {
                loaded.found.insert(id.clone(), document);
            }
            Ok(None) => loaded.missing.push(id.clone()),
            Err(e) => {
                tracing::warn!(
                    cve_id = %id,
                    vendor = %D::VENDOR,
                    error = %e,
                    "Skipping undecodable record"
                );
            }
        }
    }
    Ok(loaded)
}

/// Reads primary records one key at a time.
///
/// A record that cannot be read or decoded is logged and left out, so one
/// bad key costs only its own result. Connection-level failures still abort.
pub(super) async fn load_documents_each<S, D>(
    store: &S,
    ids: &[String],
) -> StoreResult<LoadedDocuments<D>>
where
    S: RecordStore,
    D: VendorDocument,
{
    let mut seen = HashSet::new();
    let mut loaded = LoadedDocuments {
        found: HashMap::new(),
        missing: Vec::new(),
    };

    for id in ids.iter().filter(|id| seen.insert(id.as_str())) {
        let record = match store.hash_get_all(&record_key(id)).await {
            Ok(record) => record,
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => {
                tracing::warn!(cve_id = %id, error = %e, "Skipping unreadable record");
                continue;
            }
        };
        match RecordCodec::decode_field::<D>(id, &record) {
            Ok(Some(document)) => {
                loaded.found.insert(id.clone(), document);
            }
            Ok(None) => loaded.missing.push(id.clone()),
            Err(e) => {
                tracing::warn!(
                    cve_id = %id,
                    vendor = %D::VENDOR,
                    error = %e,
                    "Skipping undecodable record"
                );
            }
        }
    }
    Ok(loaded)
}

/// LookupCvesUseCase - point and multi reads of primary records, and
/// direct reads of the secondary indexes
///
/// # Type Parameters
/// * `S` - RecordStore implementation
pub struct LookupCvesUseCase<S> {
    store: S,
}

impl<S: RecordStore> LookupCvesUseCase<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Fetches one vendor document.
    ///
    /// Returns `Ok(None)` when the record or its vendor field does not exist.
    ///
    /// # Errors
    /// `ReadFailed` if the store read fails, `DecodeFailed` if the stored
    /// document does not match the vendor schema.
    pub async fn get_one<D: VendorDocument>(&self, cve_id: &str) -> StoreResult<Option<D>> {
        let record = self.store.hash_get_all(&record_key(cve_id)).await?;
        RecordCodec::decode_field(cve_id, &record)
    }

    /// Fetches several vendor documents keyed by CVE id.
    ///
    /// Absent ids are omitted and undecodable documents are skipped, so the
    /// result may hold fewer entries than `cve_ids`.
    ///
    /// # Errors
    /// `ReadFailed` if the pipelined read itself fails.
    pub async fn get_many<D: VendorDocument>(
        &self,
        cve_ids: &[String],
    ) -> StoreResult<HashMap<String, D>> {
        let loaded = load_documents::<S, D>(&self.store, cve_ids).await?;
        tracing::debug!(
            vendor = %D::VENDOR,
            requested = cve_ids.len(),
            found = loaded.found.len(),
            "Multi-read complete"
        );
        Ok(loaded.found)
    }

    /// CVE ids indexed under a package name
    pub async fn cve_ids_for_package(
        &self,
        vendor: Vendor,
        package: &str,
    ) -> StoreResult<Vec<String>> {
        self.store
            .sorted_set_members(&package_index_key(vendor, package))
            .await
    }

    /// CVE ids fixed by a Microsoft KB article
    pub async fn cve_ids_for_kb(&self, kb_id: &str) -> StoreResult<Vec<String>> {
        self.store.sorted_set_members(&kb_index_key(kb_id)).await
    }

    /// Display names recorded for a Microsoft product id
    pub async fn product_names(&self, product_id: &str) -> StoreResult<Vec<String>> {
        self.store
            .sorted_set_members(&product_index_key(product_id))
            .await
    }
}
