//! Vulnerability tracking core: vendor documents, release policies and the
//! services that encode, index and narrow them.
pub mod domain;
pub mod policies;
pub mod services;
