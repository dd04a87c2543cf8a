//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (SHA-512, random bytes, constant-time comparison)
//! - Password encoding (salted SHA-512 with an "already encoded" sentinel)

pub mod crypto;
pub mod password;
