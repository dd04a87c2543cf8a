//! Authorization Subject Value Object
//!
//! The `sub` claim of a session token: `{"ID": <number>, "Login": <string>}`.
//!
//! ## ID coercion
//! Tokens minted by other JSON stacks may carry the ID as a floating point
//! number (`7.0`). The ID therefore decodes from either an integer or a float,
//! as long as the value is a non-negative whole number. Floats above 2^53 are
//! rejected since they no longer identify a single integer.

use std::fmt;

use kernel::id::UserId;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

/// Largest float that still maps to exactly one integer
const MAX_EXACT_FLOAT: f64 = 9_007_199_254_740_992.0;

/// Identity claim carried in the token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizationSubject {
    #[serde(rename = "ID", deserialize_with = "deserialize_user_id")]
    pub id: UserId,
    #[serde(rename = "Login")]
    pub login: String,
}

fn deserialize_user_id<'de, D>(deserializer: D) -> Result<UserId, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(UserIdVisitor)
}

struct UserIdVisitor;

impl<'de> Visitor<'de> for UserIdVisitor {
    type Value = UserId;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a non-negative whole number")
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<UserId, E> {
        Ok(UserId::new(value))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<UserId, E> {
        UserId::from_i64(value)
            .ok_or_else(|| E::invalid_value(de::Unexpected::Signed(value), &self))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<UserId, E> {
        if value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= MAX_EXACT_FLOAT {
            Ok(UserId::new(value as u64))
        } else {
            Err(E::invalid_value(de::Unexpected::Float(value), &self))
        }
    }
}
