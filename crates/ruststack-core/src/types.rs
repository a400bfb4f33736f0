//! Account and region identifiers.

use std::fmt;

use crate::RustStackError;

/// Account identifier: the prefix `RGW` followed by 17 numeric digits.
///
/// Deserialization goes through [`AccountId::new`], so a malformed ID is
/// rejected wherever it is read from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String")]
pub struct AccountId(String);

impl AccountId {
    /// Prefix shared by every account ID.
    pub const PREFIX: &str = "RGW";

    /// Total length of an account ID in bytes.
    pub const LEN: usize = 20;

    /// Parse and validate an account ID.
    ///
    /// # Errors
    /// Returns [`RustStackError::InvalidAccountId`] naming the first rule the
    /// input violates (length, prefix, then digits).
    pub fn new(id: impl Into<String>) -> Result<Self, RustStackError> {
        let id = id.into();
        let reason = if id.len() != Self::LEN {
            Some(format!("account id must be {} bytes long", Self::LEN))
        } else if !id.starts_with(Self::PREFIX) {
            Some(format!("account id must start with {}", Self::PREFIX))
        } else if !id.bytes().skip(Self::PREFIX.len()).all(|b| b.is_ascii_digit()) {
            Some("account id must end with numeric digits".to_owned())
        } else {
            None
        };

        match reason {
            Some(reason) => Err(RustStackError::InvalidAccountId { id, reason }),
            None => Ok(Self(id)),
        }
    }

    /// Generate a random account ID.
    #[must_use]
    pub fn generate() -> Self {
        let mut id = String::with_capacity(Self::LEN);
        id.push_str(Self::PREFIX);
        for _ in Self::PREFIX.len()..Self::LEN {
            id.push(char::from(b'0' + rand::random_range(0..10u8)));
        }
        Self(id)
    }

    /// Get the account ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for AccountId {
    type Error = RustStackError;

    fn try_from(id: String) -> Result<Self, Self::Error> {
        Self::new(id)
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// AWS Region identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct AwsRegion(String);

impl AwsRegion {
    /// Default region.
    pub const DEFAULT: &str = "us-east-1";

    /// Create a new region.
    #[must_use]
    pub fn new(region: impl Into<String>) -> Self {
        Self(region.into())
    }

    /// Get the region as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for AwsRegion {
    fn default() -> Self {
        Self(Self::DEFAULT.to_owned())
    }
}

impl fmt::Display for AwsRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_accept_valid_account_id() {
        let id = AccountId::new("RGW12345678901234567").unwrap();
        assert_eq!(id.as_str(), "RGW12345678901234567");
    }

    #[test]
    fn test_should_reject_account_id_with_wrong_length() {
        let err = AccountId::new("RGW123").unwrap_err();
        assert!(err.to_string().contains("must be 20 bytes long"));
    }

    #[test]
    fn test_should_reject_account_id_without_prefix() {
        let err = AccountId::new("ABC12345678901234567").unwrap_err();
        assert!(err.to_string().contains("must start with RGW"));
    }

    #[test]
    fn test_should_reject_account_id_with_non_digit_suffix() {
        let err = AccountId::new("RGW1234567890123456x").unwrap_err();
        assert!(err.to_string().contains("must end with numeric digits"));
    }

    #[test]
    fn test_should_generate_valid_account_ids() {
        for _ in 0..32 {
            let id = AccountId::generate();
            assert!(AccountId::new(id.as_str()).is_ok(), "generated {id}");
        }
    }

    #[test]
    fn test_should_validate_account_id_on_deserialize() {
        use serde::Deserialize;
        use serde::de::IntoDeserializer;
        use serde::de::value::{Error as DeError, StrDeserializer};

        let bad: StrDeserializer<'_, DeError> = "not-an-account".into_deserializer();
        let err = AccountId::deserialize(bad).unwrap_err();
        assert!(err.to_string().contains("must be 20 bytes long"), "{err}");

        let good: StrDeserializer<'_, DeError> = "RGW12345678901234567".into_deserializer();
        let id = AccountId::deserialize(good).unwrap();
        assert_eq!(id.as_str(), "RGW12345678901234567");
    }

    #[test]
    fn test_should_use_default_region() {
        let region = AwsRegion::default();
        assert_eq!(region.as_str(), "us-east-1");
        assert_eq!(AwsRegion::new("eu-west-1").to_string(), "eu-west-1");
    }
}
