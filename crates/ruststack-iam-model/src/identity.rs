//! User identity records and principal ARNs.

use serde::{Deserialize, Serialize};

/// Path used when an identity has none.
pub const DEFAULT_PATH: &str = "/";

/// Kind of principal an identity represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PrincipalType {
    /// A regular IAM user.
    #[default]
    User,
    /// The root user of an account.
    Root,
}

/// Identity attributes of a user principal.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UserIdentity {
    /// Owning account; empty for users that predate accounts.
    pub account_id: String,
    /// Tenant the user lives in.
    pub tenant: String,
    /// Slash-delimited IAM path; empty means `/`.
    pub path: String,
    /// The user name shown to clients.
    pub display_name: String,
    /// Whether this is an account root user.
    pub principal_type: PrincipalType,
}

impl UserIdentity {
    /// The root user of `account_id`.
    #[must_use]
    pub fn root(account_id: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
            principal_type: PrincipalType::Root,
            ..Self::default()
        }
    }

    /// A regular user.
    #[must_use]
    pub fn user(
        account_id: impl Into<String>,
        path: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        Self {
            account_id: account_id.into(),
            path: path.into(),
            display_name: display_name.into(),
            ..Self::default()
        }
    }

    /// Set the tenant.
    #[must_use]
    pub fn with_tenant(mut self, tenant: impl Into<String>) -> Self {
        self.tenant = tenant.into();
        self
    }

    /// The IAM path, defaulting to `/`.
    #[must_use]
    pub fn effective_path(&self) -> &str {
        if self.path.is_empty() {
            DEFAULT_PATH
        } else {
            &self.path
        }
    }

    /// Resource name used in permission checks: path followed by the user name.
    #[must_use]
    pub fn resource_name(&self) -> String {
        format!("{}{}", self.effective_path(), self.display_name)
    }

    /// The principal ARN; see [`format_user_arn`].
    #[must_use]
    pub fn arn(&self) -> String {
        format_user_arn(self)
    }
}

/// Format the ARN of a user principal.
///
/// Root users map to `arn:aws:iam::<account>:root`. Other users map to
/// `arn:aws:iam::<account>:user<path><name>`, where the account falls back to
/// the tenant when empty and the path falls back to `/`. Inputs are not
/// validated.
///
/// # Examples
///
/// ```
/// use ruststack_iam_model::identity::{UserIdentity, format_user_arn};
///
/// let alice = UserIdentity::user("12345", "/dev/", "alice");
/// assert_eq!(format_user_arn(&alice), "arn:aws:iam::12345:user/dev/alice");
/// ```
#[must_use]
pub fn format_user_arn(identity: &UserIdentity) -> String {
    if identity.principal_type == PrincipalType::Root {
        return format!("arn:aws:iam::{}:root", identity.account_id);
    }
    let account = if identity.account_id.is_empty() {
        &identity.tenant
    } else {
        &identity.account_id
    };
    format!(
        "arn:aws:iam::{account}:user{}{}",
        identity.effective_path(),
        identity.display_name
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_format_root_arn() {
        let root = UserIdentity::root("12345");
        assert_eq!(format_user_arn(&root), "arn:aws:iam::12345:root");
    }

    #[test]
    fn test_should_ignore_path_and_name_for_root() {
        let mut root = UserIdentity::root("12345");
        root.path = "/ignored/".to_owned();
        root.display_name = "admin".to_owned();
        assert_eq!(root.arn(), "arn:aws:iam::12345:root");
    }

    #[test]
    fn test_should_format_user_arn_with_path() {
        let alice = UserIdentity::user("12345", "/dev/", "alice");
        assert_eq!(format_user_arn(&alice), "arn:aws:iam::12345:user/dev/alice");
    }

    #[test]
    fn test_should_fall_back_to_tenant_and_root_path() {
        let bob = UserIdentity::user("", "", "bob").with_tenant("tenantA");
        assert_eq!(format_user_arn(&bob), "arn:aws:iam::tenantA:user/bob");
    }

    #[test]
    fn test_should_prefer_account_over_tenant() {
        let carol = UserIdentity::user("RGW00000000000000001", "/", "carol").with_tenant("t");
        assert_eq!(
            carol.arn(),
            "arn:aws:iam::RGW00000000000000001:user/carol"
        );
    }

    #[test]
    fn test_should_return_identical_arns_for_identical_input() {
        let alice = UserIdentity::user("12345", "/dev/", "alice");
        assert_eq!(alice.arn(), alice.arn());
    }

    #[test]
    fn test_should_build_resource_name() {
        assert_eq!(UserIdentity::user("a", "", "bob").resource_name(), "/bob");
        assert_eq!(
            UserIdentity::user("a", "/ops/", "bob").resource_name(),
            "/ops/bob"
        );
    }
}
