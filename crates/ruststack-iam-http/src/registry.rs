//! The action registry: action name to operation factory.
//!
//! The table is built once on first use and never mutated, so lookups from
//! concurrent requests need no locking.

use std::collections::HashMap;
use std::sync::LazyLock;

use bytes::Bytes;

use ruststack_iam_model::action::IamAction;

use crate::operation::{ActionOperation, Operation};

/// Builds an operation from the buffered POST body.
pub type OperationFactory = fn(Bytes) -> Box<dyn Operation>;

static ACTION_REGISTRY: LazyLock<ActionRegistry> = LazyLock::new(ActionRegistry::build);

/// Immutable mapping from action name to [`OperationFactory`].
#[derive(Debug)]
pub struct ActionRegistry {
    factories: HashMap<&'static str, OperationFactory>,
}

fn keep_body(action: IamAction, body: Bytes) -> Box<dyn Operation> {
    Box::new(ActionOperation::with_body(action, body))
}

fn drop_body(action: IamAction) -> Box<dyn Operation> {
    Box::new(ActionOperation::new(action))
}

impl ActionRegistry {
    /// The process-wide registry.
    #[must_use]
    pub fn global() -> &'static Self {
        &ACTION_REGISTRY
    }

    fn build() -> Self {
        let entries: [(&'static str, OperationFactory); 30] = [
            ("CreateRole", |body| keep_body(IamAction::CreateRole, body)),
            ("DeleteRole", |body| keep_body(IamAction::DeleteRole, body)),
            ("GetRole", |_| drop_body(IamAction::GetRole)),
            ("UpdateAssumeRolePolicy", |body| {
                keep_body(IamAction::UpdateAssumeRolePolicy, body)
            }),
            ("ListRoles", |_| drop_body(IamAction::ListRoles)),
            ("PutRolePolicy", |body| keep_body(IamAction::PutRolePolicy, body)),
            ("GetRolePolicy", |_| drop_body(IamAction::GetRolePolicy)),
            ("ListRolePolicies", |_| drop_body(IamAction::ListRolePolicies)),
            ("DeleteRolePolicy", |body| {
                keep_body(IamAction::DeleteRolePolicy, body)
            }),
            ("PutUserPolicy", |_| drop_body(IamAction::PutUserPolicy)),
            ("GetUserPolicy", |_| drop_body(IamAction::GetUserPolicy)),
            ("ListUserPolicies", |_| drop_body(IamAction::ListUserPolicies)),
            ("DeleteUserPolicy", |_| drop_body(IamAction::DeleteUserPolicy)),
            ("CreateOpenIDConnectProvider", |_| {
                drop_body(IamAction::CreateOpenIDConnectProvider)
            }),
            ("ListOpenIDConnectProviders", |_| {
                drop_body(IamAction::ListOpenIDConnectProviders)
            }),
            ("GetOpenIDConnectProvider", |_| {
                drop_body(IamAction::GetOpenIDConnectProvider)
            }),
            ("DeleteOpenIDConnectProvider", |_| {
                drop_body(IamAction::DeleteOpenIDConnectProvider)
            }),
            ("TagRole", |body| keep_body(IamAction::TagRole, body)),
            ("ListRoleTags", |_| drop_body(IamAction::ListRoleTags)),
            ("UntagRole", |body| keep_body(IamAction::UntagRole, body)),
            ("UpdateRole", |body| keep_body(IamAction::UpdateRole, body)),
            ("CreateUser", |_| drop_body(IamAction::CreateUser)),
            ("GetUser", |_| drop_body(IamAction::GetUser)),
            ("UpdateUser", |_| drop_body(IamAction::UpdateUser)),
            ("DeleteUser", |_| drop_body(IamAction::DeleteUser)),
            ("ListUsers", |_| drop_body(IamAction::ListUsers)),
            ("CreateAccessKey", |_| drop_body(IamAction::CreateAccessKey)),
            ("UpdateAccessKey", |_| drop_body(IamAction::UpdateAccessKey)),
            ("DeleteAccessKey", |_| drop_body(IamAction::DeleteAccessKey)),
            ("ListAccessKeys", |_| drop_body(IamAction::ListAccessKeys)),
        ];

        Self {
            factories: entries.into_iter().collect(),
        }
    }

    /// Find the factory for an action name. Matching is exact and
    /// case-sensitive.
    #[must_use]
    pub fn lookup(&self, action_name: &str) -> Option<OperationFactory> {
        self.factories.get(action_name).copied()
    }

    /// Whether an action name is registered.
    #[must_use]
    pub fn exists(&self, action_name: &str) -> bool {
        self.factories.contains_key(action_name)
    }

    /// Number of registered actions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Registered action names, sorted.
    #[must_use]
    pub fn action_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.factories.keys().copied().collect();
        names.sort_unstable();
        names
    }
}
