//! IAM action enum.

use std::fmt;

/// Resource family an action operates on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionFamily {
    /// Role CRUD, tagging and trust policy.
    Role,
    /// Inline policies attached to roles.
    RolePolicy,
    /// Inline policies attached to users.
    UserPolicy,
    /// OpenID Connect identity providers.
    OidcProvider,
    /// IAM users.
    User,
    /// Access keys of IAM users.
    AccessKey,
}

impl ActionFamily {
    /// Lowercase label used in log fields.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Role => "role",
            Self::RolePolicy => "role-policy",
            Self::UserPolicy => "user-policy",
            Self::OidcProvider => "oidc-provider",
            Self::User => "user",
            Self::AccessKey => "access-key",
        }
    }
}

/// All IAM actions accepted through the `Action` argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IamAction {
    // Roles
    /// Create a role.
    CreateRole,
    /// Delete a role.
    DeleteRole,
    /// Describe a role.
    GetRole,
    /// Replace a role's trust policy.
    UpdateAssumeRolePolicy,
    /// List roles.
    ListRoles,
    /// Tag a role.
    TagRole,
    /// List a role's tags.
    ListRoleTags,
    /// Remove tags from a role.
    UntagRole,
    /// Update a role's description or session duration.
    UpdateRole,

    // Role policies
    /// Put an inline role policy.
    PutRolePolicy,
    /// Get an inline role policy.
    GetRolePolicy,
    /// List inline role policies.
    ListRolePolicies,
    /// Delete an inline role policy.
    DeleteRolePolicy,

    // User policies
    /// Put an inline user policy.
    PutUserPolicy,
    /// Get an inline user policy.
    GetUserPolicy,
    /// List inline user policies.
    ListUserPolicies,
    /// Delete an inline user policy.
    DeleteUserPolicy,

    // OpenID Connect providers
    /// Register an OIDC provider.
    CreateOpenIDConnectProvider,
    /// List OIDC providers.
    ListOpenIDConnectProviders,
    /// Describe an OIDC provider.
    GetOpenIDConnectProvider,
    /// Delete an OIDC provider.
    DeleteOpenIDConnectProvider,

    // Users
    /// Create a user.
    CreateUser,
    /// Describe a user.
    GetUser,
    /// Rename a user or change its path.
    UpdateUser,
    /// Delete a user.
    DeleteUser,
    /// List users.
    ListUsers,

    // Access keys
    /// Create an access key.
    CreateAccessKey,
    /// Activate or deactivate an access key.
    UpdateAccessKey,
    /// Delete an access key.
    DeleteAccessKey,
    /// List access keys.
    ListAccessKeys,
}

impl IamAction {
    /// Every supported action, in registry order.
    pub const ALL: [Self; 30] = [
        Self::CreateRole,
        Self::DeleteRole,
        Self::GetRole,
        Self::UpdateAssumeRolePolicy,
        Self::ListRoles,
        Self::PutRolePolicy,
        Self::GetRolePolicy,
        Self::ListRolePolicies,
        Self::DeleteRolePolicy,
        Self::PutUserPolicy,
        Self::GetUserPolicy,
        Self::ListUserPolicies,
        Self::DeleteUserPolicy,
        Self::CreateOpenIDConnectProvider,
        Self::ListOpenIDConnectProviders,
        Self::GetOpenIDConnectProvider,
        Self::DeleteOpenIDConnectProvider,
        Self::TagRole,
        Self::ListRoleTags,
        Self::UntagRole,
        Self::UpdateRole,
        Self::CreateUser,
        Self::GetUser,
        Self::UpdateUser,
        Self::DeleteUser,
        Self::ListUsers,
        Self::CreateAccessKey,
        Self::UpdateAccessKey,
        Self::DeleteAccessKey,
        Self::ListAccessKeys,
    ];

    /// Returns the AWS action name string.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CreateRole => "CreateRole",
            Self::DeleteRole => "DeleteRole",
            Self::GetRole => "GetRole",
            Self::UpdateAssumeRolePolicy => "UpdateAssumeRolePolicy",
            Self::ListRoles => "ListRoles",
            Self::TagRole => "TagRole",
            Self::ListRoleTags => "ListRoleTags",
            Self::UntagRole => "UntagRole",
            Self::UpdateRole => "UpdateRole",
            Self::PutRolePolicy => "PutRolePolicy",
            Self::GetRolePolicy => "GetRolePolicy",
            Self::ListRolePolicies => "ListRolePolicies",
            Self::DeleteRolePolicy => "DeleteRolePolicy",
            Self::PutUserPolicy => "PutUserPolicy",
            Self::GetUserPolicy => "GetUserPolicy",
            Self::ListUserPolicies => "ListUserPolicies",
            Self::DeleteUserPolicy => "DeleteUserPolicy",
            Self::CreateOpenIDConnectProvider => "CreateOpenIDConnectProvider",
            Self::ListOpenIDConnectProviders => "ListOpenIDConnectProviders",
            Self::GetOpenIDConnectProvider => "GetOpenIDConnectProvider",
            Self::DeleteOpenIDConnectProvider => "DeleteOpenIDConnectProvider",
            Self::CreateUser => "CreateUser",
            Self::GetUser => "GetUser",
            Self::UpdateUser => "UpdateUser",
            Self::DeleteUser => "DeleteUser",
            Self::ListUsers => "ListUsers",
            Self::CreateAccessKey => "CreateAccessKey",
            Self::UpdateAccessKey => "UpdateAccessKey",
            Self::DeleteAccessKey => "DeleteAccessKey",
            Self::ListAccessKeys => "ListAccessKeys",
        }
    }

    /// Parse an action name into an `IamAction`. Matching is exact and
    /// case-sensitive.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "CreateRole" => Some(Self::CreateRole),
            "DeleteRole" => Some(Self::DeleteRole),
            "GetRole" => Some(Self::GetRole),
            "UpdateAssumeRolePolicy" => Some(Self::UpdateAssumeRolePolicy),
            "ListRoles" => Some(Self::ListRoles),
            "TagRole" => Some(Self::TagRole),
            "ListRoleTags" => Some(Self::ListRoleTags),
            "UntagRole" => Some(Self::UntagRole),
            "UpdateRole" => Some(Self::UpdateRole),
            "PutRolePolicy" => Some(Self::PutRolePolicy),
            "GetRolePolicy" => Some(Self::GetRolePolicy),
            "ListRolePolicies" => Some(Self::ListRolePolicies),
            "DeleteRolePolicy" => Some(Self::DeleteRolePolicy),
            "PutUserPolicy" => Some(Self::PutUserPolicy),
            "GetUserPolicy" => Some(Self::GetUserPolicy),
            "ListUserPolicies" => Some(Self::ListUserPolicies),
            "DeleteUserPolicy" => Some(Self::DeleteUserPolicy),
            "CreateOpenIDConnectProvider" => Some(Self::CreateOpenIDConnectProvider),
            "ListOpenIDConnectProviders" => Some(Self::ListOpenIDConnectProviders),
            "GetOpenIDConnectProvider" => Some(Self::GetOpenIDConnectProvider),
            "DeleteOpenIDConnectProvider" => Some(Self::DeleteOpenIDConnectProvider),
            "CreateUser" => Some(Self::CreateUser),
            "GetUser" => Some(Self::GetUser),
            "UpdateUser" => Some(Self::UpdateUser),
            "DeleteUser" => Some(Self::DeleteUser),
            "ListUsers" => Some(Self::ListUsers),
            "CreateAccessKey" => Some(Self::CreateAccessKey),
            "UpdateAccessKey" => Some(Self::UpdateAccessKey),
            "DeleteAccessKey" => Some(Self::DeleteAccessKey),
            "ListAccessKeys" => Some(Self::ListAccessKeys),
            _ => None,
        }
    }

    /// The resource family this action belongs to.
    #[must_use]
    pub fn family(&self) -> ActionFamily {
        match self {
            Self::CreateRole
            | Self::DeleteRole
            | Self::GetRole
            | Self::UpdateAssumeRolePolicy
            | Self::ListRoles
            | Self::TagRole
            | Self::ListRoleTags
            | Self::UntagRole
            | Self::UpdateRole => ActionFamily::Role,
            Self::PutRolePolicy
            | Self::GetRolePolicy
            | Self::ListRolePolicies
            | Self::DeleteRolePolicy => ActionFamily::RolePolicy,
            Self::PutUserPolicy
            | Self::GetUserPolicy
            | Self::ListUserPolicies
            | Self::DeleteUserPolicy => ActionFamily::UserPolicy,
            Self::CreateOpenIDConnectProvider
            | Self::ListOpenIDConnectProviders
            | Self::GetOpenIDConnectProvider
            | Self::DeleteOpenIDConnectProvider => ActionFamily::OidcProvider,
            Self::CreateUser
            | Self::GetUser
            | Self::UpdateUser
            | Self::DeleteUser
            | Self::ListUsers => ActionFamily::User,
            Self::CreateAccessKey
            | Self::UpdateAccessKey
            | Self::DeleteAccessKey
            | Self::ListAccessKeys => ActionFamily::AccessKey,
        }
    }
}

impl fmt::Display for IamAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
