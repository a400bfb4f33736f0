//! Validation of IAM identity strings.
//!
//! The character classes are checked with explicit byte predicates so the
//! accepted set does not depend on a regex dialect:
//!
//! - user names: one or more of `[A-Za-z0-9_+=,.@-]`
//! - paths: either `/`, or `/` + one or more of `[!-~]` + `/`

/// Maximum user name length in bytes.
pub const MAX_USER_NAME_LEN: usize = 64;

/// Maximum path length in bytes.
pub const MAX_PATH_LEN: usize = 512;

/// Reasons an identity string is rejected. The `Display` text is the message
/// returned to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Empty user name.
    #[error("Missing required element UserName")]
    MissingUserName,
    /// User name longer than [`MAX_USER_NAME_LEN`].
    #[error("UserName too long")]
    UserNameTooLong,
    /// User name outside the allowed character class.
    #[error("UserName contains invalid characters")]
    UserNameInvalidCharacters,
    /// Path longer than [`MAX_PATH_LEN`].
    #[error("Path too long")]
    PathTooLong,
    /// Path not slash-delimited printable ASCII.
    #[error("Path contains invalid characters")]
    PathInvalidCharacters,
    /// Empty account name.
    #[error("account name must not be empty")]
    EmptyAccountName,
    /// Account name containing the tenant delimiter.
    #[error("account name must not contain $")]
    AccountNameContainsDollar,
    /// Account name containing the metadata section delimiter.
    #[error("account name must not contain :")]
    AccountNameContainsColon,
}

/// Validate an IAM user name.
///
/// Checks run in order and the first failure wins: emptiness, length, then
/// the character class.
///
/// # Errors
///
/// Returns the [`ValidationError`] for the first rule violated.
///
/// # Examples
///
/// ```
/// use ruststack_iam_model::validation::{ValidationError, validate_user_name};
///
/// assert!(validate_user_name("bob.smith+test@co-1").is_ok());
/// assert_eq!(validate_user_name(""), Err(ValidationError::MissingUserName));
/// ```
pub fn validate_user_name(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::MissingUserName);
    }
    if name.len() > MAX_USER_NAME_LEN {
        return Err(ValidationError::UserNameTooLong);
    }
    if !name.bytes().all(is_user_name_byte) {
        return Err(ValidationError::UserNameInvalidCharacters);
    }
    Ok(())
}

/// Validate an IAM path.
///
/// The empty string is rejected: callers that treat an absent path as `/`
/// must substitute the default before validating.
///
/// # Errors
///
/// Returns [`ValidationError::PathTooLong`] or
/// [`ValidationError::PathInvalidCharacters`].
pub fn validate_path(path: &str) -> Result<(), ValidationError> {
    if path.len() > MAX_PATH_LEN {
        return Err(ValidationError::PathTooLong);
    }
    if path == "/" {
        return Ok(());
    }
    let interior = path
        .strip_prefix('/')
        .and_then(|rest| rest.strip_suffix('/'))
        .ok_or(ValidationError::PathInvalidCharacters)?;
    if interior.is_empty() || !interior.bytes().all(is_printable_ascii) {
        return Err(ValidationError::PathInvalidCharacters);
    }
    Ok(())
}

/// Validate an account name.
///
/// # Errors
///
/// Rejects empty names and names containing `$` or `:`.
pub fn validate_account_name(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::EmptyAccountName);
    }
    if name.contains('$') {
        return Err(ValidationError::AccountNameContainsDollar);
    }
    if name.contains(':') {
        return Err(ValidationError::AccountNameContainsColon);
    }
    Ok(())
}

fn is_user_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'_' | b'+' | b'=' | b',' | b'.' | b'@' | b'-')
}

fn is_printable_ascii(b: u8) -> bool {
    (b'!'..=b'~').contains(&b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_reject_empty_user_name() {
        assert_eq!(validate_user_name(""), Err(ValidationError::MissingUserName));
        assert_eq!(
            ValidationError::MissingUserName.to_string(),
            "Missing required element UserName"
        );
    }

    #[test]
    fn test_should_reject_long_user_name() {
        let name = "a".repeat(65);
        assert_eq!(validate_user_name(&name), Err(ValidationError::UserNameTooLong));
        assert!(validate_user_name(&"a".repeat(64)).is_ok());
    }

    #[test]
    fn test_should_check_length_before_characters() {
        let name = "!".repeat(65);
        assert_eq!(validate_user_name(&name), Err(ValidationError::UserNameTooLong));
    }

    #[test]
    fn test_should_measure_user_name_length_in_bytes() {
        // 33 two-byte characters: under 64 characters, over 64 bytes.
        let name = "é".repeat(33);
        assert_eq!(name.len(), 66);
        assert_eq!(validate_user_name(&name), Err(ValidationError::UserNameTooLong));

        let name = "é".repeat(32);
        assert_eq!(
            validate_user_name(&name),
            Err(ValidationError::UserNameInvalidCharacters)
        );
    }

    #[test]
    fn test_should_accept_valid_user_names() {
        for name in ["bob.smith+test@co-1", "a", "Under_Score", "x=y,z", "123"] {
            assert!(validate_user_name(name).is_ok(), "rejected {name}");
        }
    }

    #[test]
    fn test_should_reject_invalid_user_name_characters() {
        for name in ["bad name!", "slash/", "tab\t", "colon:", "ünïcode"] {
            assert_eq!(
                validate_user_name(name),
                Err(ValidationError::UserNameInvalidCharacters),
                "accepted {name:?}"
            );
        }
        assert_eq!(
            ValidationError::UserNameInvalidCharacters.to_string(),
            "UserName contains invalid characters"
        );
    }

    #[test]
    fn test_should_accept_valid_paths() {
        for path in ["/", "/engineering/", "/a/b/c/", "///", "/!~/"] {
            assert!(validate_path(path).is_ok(), "rejected {path}");
        }
    }

    #[test]
    fn test_should_reject_malformed_paths() {
        for path in ["engineering/", "/engineering", "//", "/has space/", "/tab\t/", ""] {
            assert_eq!(
                validate_path(path),
                Err(ValidationError::PathInvalidCharacters),
                "accepted {path:?}"
            );
        }
    }

    #[test]
    fn test_should_reject_long_path() {
        let path = format!("/{}/", "p".repeat(511));
        assert_eq!(path.len(), 513);
        assert_eq!(validate_path(&path), Err(ValidationError::PathTooLong));
        assert_eq!(ValidationError::PathTooLong.to_string(), "Path too long");

        let path = format!("/{}/", "p".repeat(510));
        assert!(validate_path(&path).is_ok());
    }

    #[test]
    fn test_should_validate_account_names() {
        assert!(validate_account_name("tenant-a").is_ok());
        assert!(validate_account_name("ünïcode ok").is_ok());
        assert_eq!(validate_account_name(""), Err(ValidationError::EmptyAccountName));
        assert_eq!(
            validate_account_name("a$b"),
            Err(ValidationError::AccountNameContainsDollar)
        );
        assert_eq!(
            validate_account_name("a:b"),
            Err(ValidationError::AccountNameContainsColon)
        );
    }
}
