//! Store key layout.
//!
//! ```text
//! HASH  CVE#<cveID>          field RedHat/Debian/Ubuntu/Microsoft -> document JSON
//! ZSET  CVE#R#<packageName>  score 0, member <cveID>        (Red Hat)
//! ZSET  CVE#D#<packageName>  score 0, member <cveID>        (Debian)
//! ZSET  CVE#U#<packageName>  score 0, member <cveID>        (Ubuntu)
//! ZSET  CVE#K#<kbID>         score 0, member <cveID>        (Microsoft)
//! ZSET  CVE#P#<productID>    score 0, member <productName>  (Microsoft)
//! ```

use super::vendor::Vendor;

pub const RECORD_KEY_PREFIX: &str = "CVE#";
pub const PRODUCT_INDEX_TAG: char = 'P';

/// Every index member carries the same score; the sets are used for distinct
/// membership only.
pub const INDEX_SCORE: f64 = 0.0;

pub fn record_key(cve_id: &str) -> String {
    format!("{}{}", RECORD_KEY_PREFIX, cve_id)
}

/// Index of CVE ids by package name (or KB id for Microsoft)
pub fn package_index_key(vendor: Vendor, term: &str) -> String {
    format!("{}{}#{}", RECORD_KEY_PREFIX, vendor.index_tag(), term)
}

pub fn kb_index_key(kb_id: &str) -> String {
    package_index_key(Vendor::Microsoft, kb_id)
}

/// Index of Microsoft product names by product id
pub fn product_index_key(product_id: &str) -> String {
    format!("{}{}#{}", RECORD_KEY_PREFIX, PRODUCT_INDEX_TAG, product_id)
}
