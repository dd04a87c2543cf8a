//! Value Object Module

pub mod session_claims;
pub mod subject;
