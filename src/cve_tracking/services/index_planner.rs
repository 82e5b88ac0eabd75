use crate::cve_tracking::domain::key_schema::{package_index_key, product_index_key};
use crate::cve_tracking::domain::{MicrosoftProduct, VendorDocument};
use std::collections::HashSet;

/// One sorted-set membership to establish
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IndexEntry {
    pub key: String,
    pub member: String,
}

/// IndexPlanner - derives the secondary index memberships of a write
pub struct IndexPlanner;

impl IndexPlanner {
    /// Memberships for a vendor document: its CVE id under every distinct
    /// package (or KB id) it references, in first-occurrence order.
    pub fn plan<D: VendorDocument>(document: &D) -> Vec<IndexEntry> {
        let mut seen = HashSet::new();
        document
            .index_terms()
            .into_iter()
            .filter(|term| seen.insert(*term))
            .map(|term| IndexEntry {
                key: package_index_key(D::VENDOR, term),
                member: document.cve_id().to_string(),
            })
            .collect()
    }

    /// Memberships for the Microsoft product index: product name under product id
    pub fn plan_products(products: &[MicrosoftProduct]) -> Vec<IndexEntry> {
        let mut seen = HashSet::new();
        products
            .iter()
            .map(|product| IndexEntry {
                key: product_index_key(&product.product_id),
                member: product.product_name.clone(),
            })
            .filter(|entry| seen.insert(entry.clone()))
            .collect()
    }
}
