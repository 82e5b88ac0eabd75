use crate::cve_tracking::domain::VendorDocument;
use crate::shared::error::StoreError;
use crate::shared::StoreResult;
use std::collections::HashMap;

/// RecordCodec - JSON encoding of vendor documents stored as hash field values
///
/// Encoding is deterministic: fields are written in declaration order and
/// empty lists are written as `[]`, so equal documents produce equal text.
pub struct RecordCodec;

impl RecordCodec {
    pub fn encode<D: VendorDocument>(document: &D) -> StoreResult<String> {
        serde_json::to_string(document).map_err(|e| StoreError::EncodeFailed {
            vendor: D::VENDOR,
            cve_id: document.cve_id().to_string(),
            details: e.to_string(),
        })
    }

    pub fn decode<D: VendorDocument>(cve_id: &str, raw: &str) -> StoreResult<D> {
        serde_json::from_str(raw).map_err(|e| StoreError::DecodeFailed {
            vendor: D::VENDOR,
            cve_id: cve_id.to_string(),
            details: e.to_string(),
        })
    }

    /// Decodes the vendor's field of a primary record hash.
    ///
    /// Returns `Ok(None)` when the record has no field for the vendor.
    pub fn decode_field<D: VendorDocument>(
        cve_id: &str,
        record: &HashMap<String, String>,
    ) -> StoreResult<Option<D>> {
        record
            .get(D::VENDOR.field_name())
            .map(|raw| Self::decode(cve_id, raw))
            .transpose()
    }
}
