//! Password Encoding and Verification
//!
//! Stored credentials are a salted SHA-512 digest rendered as lowercase hex
//! and prefixed with the [`ENCODED_SENTINEL`]. The format is fixed: rows
//! written by earlier deployments must keep verifying.
//!
//! ## Algorithm
//! 1. Plaintexts shorter than 2 bytes are wrapped with [`PAD_MARKER`].
//! 2. The plaintext is split at `len / 2` (bytes, rounded down).
//! 3. The salt is wrapped with [`SALT_DELIMITER`] and placed between both halves.
//! 4. SHA-512 over the concatenation, lowercase hex, sentinel prefix.
//!
//! The sentinel lets callers tell an encoded value from a plaintext one.
//! Encoding is never idempotent: callers on create/update paths must check
//! [`is_encoded`] before encoding, otherwise the stored value becomes
//! unverifiable.

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::crypto::{constant_time_eq, sha512_hex};

// ============================================================================
// Constants
// ============================================================================

/// Leading marker of every encoded password
pub const ENCODED_SENTINEL: char = '*';

/// Wraps the salt on both sides
pub const SALT_DELIMITER: char = '*';

/// Wraps plaintexts shorter than two bytes
pub const PAD_MARKER: char = '!';

/// Check whether a stored value already carries the sentinel
pub fn is_encoded(value: &str) -> bool {
    value.starts_with(ENCODED_SENTINEL)
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password with automatic memory zeroization
///
/// ## Security
/// - Implements `Zeroize` and `ZeroizeOnDrop`
/// - Does not implement `Clone` to prevent accidental copies
/// - Debug output is redacted
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Encoded Password (stored form)
// ============================================================================

/// Encoded password as persisted in the `users.password` column
#[derive(Clone, PartialEq, Eq)]
pub struct EncodedPassword(String);

impl EncodedPassword {
    /// Wrap a value read back from storage
    pub fn from_db(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Debug for EncodedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("EncodedPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Codec
// ============================================================================

/// Salted password codec
///
/// The salt is process-wide and comes from configuration.
///
/// ## Examples
/// ```rust
/// use platform::password::{ClearTextPassword, PasswordCodec};
///
/// let codec = PasswordCodec::new("gin-blog");
/// let stored = codec.encode(&ClearTextPassword::new("hunter2"));
///
/// assert!(codec.verify(&ClearTextPassword::new("hunter2"), &stored));
/// assert!(!codec.verify(&ClearTextPassword::new("hunter3"), &stored));
/// ```
#[derive(Clone)]
pub struct PasswordCodec {
    salt: String,
}

impl PasswordCodec {
    pub fn new(salt: impl Into<String>) -> Self {
        Self { salt: salt.into() }
    }

    /// Encode a plaintext password
    pub fn encode(&self, password: &ClearTextPassword) -> EncodedPassword {
        EncodedPassword(encode_bytes(password.as_bytes(), &self.salt))
    }

    /// Re-encode the candidate and compare it with the stored value
    pub fn verify(&self, candidate: &ClearTextPassword, stored: &EncodedPassword) -> bool {
        let encoded = self.encode(candidate);
        constant_time_eq(encoded.as_str().as_bytes(), stored.as_str().as_bytes())
    }

    /// Accept a password from a create/update payload
    ///
    /// Values that already carry the sentinel are stored as-is.
    pub fn encode_if_plain(&self, raw: String) -> EncodedPassword {
        if is_encoded(&raw) {
            EncodedPassword(raw)
        } else {
            self.encode(&ClearTextPassword::new(raw))
        }
    }
}

impl fmt::Debug for PasswordCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordCodec")
            .field("salt", &"[REDACTED]")
            .finish()
    }
}

/// Encode a plaintext with the given salt
pub fn encode_password(plaintext: &str, salt: &str) -> String {
    encode_bytes(plaintext.as_bytes(), salt)
}

/// Verify a plaintext against a stored encoded value
pub fn verify_password(candidate: &str, stored: &str, salt: &str) -> bool {
    let encoded = encode_password(candidate, salt);
    constant_time_eq(encoded.as_bytes(), stored.as_bytes())
}

fn encode_bytes(plaintext: &[u8], salt: &str) -> String {
    let mut padded = Zeroizing::new(Vec::with_capacity(plaintext.len() + 2));

    if plaintext.len() < 2 {
        padded.extend_from_slice(PAD_MARKER.encode_utf8(&mut [0u8; 4]).as_bytes());
        padded.extend_from_slice(plaintext);
        padded.extend_from_slice(PAD_MARKER.encode_utf8(&mut [0u8; 4]).as_bytes());
    } else {
        padded.extend_from_slice(plaintext);
    }

    let (prefix, suffix) = padded.split_at(padded.len() / 2);

    let mut material = Zeroizing::new(Vec::with_capacity(padded.len() + salt.len() + 2));
    material.extend_from_slice(prefix);
    material.extend_from_slice(SALT_DELIMITER.encode_utf8(&mut [0u8; 4]).as_bytes());
    material.extend_from_slice(salt.as_bytes());
    material.extend_from_slice(SALT_DELIMITER.encode_utf8(&mut [0u8; 4]).as_bytes());
    material.extend_from_slice(suffix);

    format!("{}{}", ENCODED_SENTINEL, sha512_hex(&material))
}

// ============================================================================
// Tests
// ============================================================================
