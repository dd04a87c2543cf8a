//! Compact JWS (HMAC family)
//!
//! `base64url(header) . base64url(claims) . base64url(mac)` with unpadded
//! URL-safe base64. Only HS256, HS384 and HS512 are understood; any other
//! `alg` is reported as [`AuthError::AlgorithmMismatch`] before the signature
//! is looked at.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;
use sha2::{Sha256, Sha384, Sha512};

use crate::error::{AuthError, AuthResult};

/// HMAC algorithms accepted in a token header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HmacAlgorithm {
    Hs256,
    Hs384,
    Hs512,
}

impl HmacAlgorithm {
    pub fn as_str(&self) -> &'static str {
        match self {
            HmacAlgorithm::Hs256 => "HS256",
            HmacAlgorithm::Hs384 => "HS384",
            HmacAlgorithm::Hs512 => "HS512",
        }
    }

    pub fn from_header(alg: &str) -> Option<Self> {
        match alg {
            "HS256" => Some(HmacAlgorithm::Hs256),
            "HS384" => Some(HmacAlgorithm::Hs384),
            "HS512" => Some(HmacAlgorithm::Hs512),
            _ => None,
        }
    }

    fn sign(&self, key: &[u8], input: &[u8]) -> AuthResult<Vec<u8>> {
        match self {
            HmacAlgorithm::Hs256 => mac::<Hmac<Sha256>>(key, input),
            HmacAlgorithm::Hs384 => mac::<Hmac<Sha384>>(key, input),
            HmacAlgorithm::Hs512 => mac::<Hmac<Sha512>>(key, input),
        }
    }

    fn verify(&self, key: &[u8], input: &[u8], signature: &[u8]) -> AuthResult<bool> {
        match self {
            HmacAlgorithm::Hs256 => verify_mac::<Hmac<Sha256>>(key, input, signature),
            HmacAlgorithm::Hs384 => verify_mac::<Hmac<Sha384>>(key, input, signature),
            HmacAlgorithm::Hs512 => verify_mac::<Hmac<Sha512>>(key, input, signature),
        }
    }
}

fn mac<M: Mac + hmac::digest::KeyInit>(key: &[u8], input: &[u8]) -> AuthResult<Vec<u8>> {
    let mut mac = <M as Mac>::new_from_slice(key)
        .map_err(|e| AuthError::Internal(format!("HMAC key rejected: {}", e)))?;
    mac.update(input);
    Ok(mac.finalize().into_bytes().to_vec())
}

fn verify_mac<M: Mac + hmac::digest::KeyInit>(
    key: &[u8],
    input: &[u8],
    signature: &[u8],
) -> AuthResult<bool> {
    let mut mac = <M as Mac>::new_from_slice(key)
        .map_err(|e| AuthError::Internal(format!("HMAC key rejected: {}", e)))?;
    mac.update(input);
    Ok(mac.verify_slice(signature).is_ok())
}

/// JOSE header
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwsHeader {
    pub alg: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typ: Option<String>,
}

impl JwsHeader {
    pub fn new(alg: HmacAlgorithm) -> Self {
        Self {
            alg: alg.as_str().to_string(),
            typ: Some("JWT".to_string()),
        }
    }
}

/// Serialize and sign `claims`
pub fn encode<T: Serialize>(alg: HmacAlgorithm, key: &[u8], claims: &T) -> AuthResult<String> {
    encode_with_header(&JwsHeader::new(alg), alg, key, claims)
}

/// Sign with an explicit header; the header's `alg` is written as given
pub fn encode_with_header<T: Serialize>(
    header: &JwsHeader,
    alg: HmacAlgorithm,
    key: &[u8],
    claims: &T,
) -> AuthResult<String> {
    let header = serde_json::to_vec(header)
        .map_err(|e| AuthError::Internal(format!("Token header serialization: {}", e)))?;
    let claims = serde_json::to_vec(claims)
        .map_err(|e| AuthError::Internal(format!("Token claims serialization: {}", e)))?;

    let signing_input = format!(
        "{}.{}",
        URL_SAFE_NO_PAD.encode(header),
        URL_SAFE_NO_PAD.encode(claims)
    );
    let signature = alg.sign(key, signing_input.as_bytes())?;

    Ok(format!(
        "{}.{}",
        signing_input,
        URL_SAFE_NO_PAD.encode(signature)
    ))
}

/// Verify the signature and deserialize the claims
///
/// Checks run in order: structure, header algorithm, signature, claims.
pub fn decode<T: DeserializeOwned>(token: &str, key: &[u8]) -> AuthResult<T> {
    let mut segments = token.split('.');
    let (Some(header_b64), Some(claims_b64), Some(signature_b64), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err(AuthError::MalformedToken(
            "expected three segments".to_string(),
        ));
    };

    let header: JwsHeader = decode_segment(header_b64, "header")?;
    let alg = HmacAlgorithm::from_header(&header.alg)
        .ok_or_else(|| AuthError::AlgorithmMismatch(header.alg.clone()))?;

    let signature = URL_SAFE_NO_PAD
        .decode(signature_b64)
        .map_err(|e| AuthError::MalformedToken(format!("signature encoding: {}", e)))?;

    let signing_input = &token[..header_b64.len() + 1 + claims_b64.len()];
    if !alg.verify(key, signing_input.as_bytes(), &signature)? {
        return Err(AuthError::SignatureInvalid);
    }

    decode_segment(claims_b64, "claims")
}

fn decode_segment<T: DeserializeOwned>(segment: &str, what: &str) -> AuthResult<T> {
    let bytes = URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|e| AuthError::MalformedToken(format!("{} encoding: {}", what, e)))?;
    serde_json::from_slice(&bytes)
        .map_err(|e| AuthError::MalformedToken(format!("{} json: {}", what, e)))
}
