//! The executable operation contract and the backend boundary.

use std::fmt;
use std::future::Future;
use std::pin::Pin;

use bytes::Bytes;

use ruststack_iam_model::action::IamAction;
use ruststack_iam_model::error::IamError;
use ruststack_iam_model::identity::UserIdentity;

use crate::context::{RequestArgs, RequestContext};

/// Future returned by operations and providers.
pub type ProviderFuture = Pin<Box<dyn Future<Output = Result<IamResponse, IamError>> + Send>>;

/// Result of a successful action.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IamResponse {
    /// Already-escaped XML placed inside `<{Action}Result>`; `None` omits
    /// the result element.
    pub result: Option<String>,
}

impl IamResponse {
    /// A response without a result element.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// A response carrying result XML.
    #[must_use]
    pub fn with_result(xml: impl Into<String>) -> Self {
        Self {
            result: Some(xml.into()),
        }
    }
}

/// Everything a provider needs to serve one action.
#[derive(Debug, Clone)]
pub struct ActionInput {
    /// Request arguments.
    pub args: RequestArgs,
    /// POST body, for actions that consume it.
    pub post_body: Option<Bytes>,
    /// Authenticated caller.
    pub caller: Option<UserIdentity>,
    /// Request identifier.
    pub request_id: String,
}

/// Trait that the IAM business logic provider must implement.
///
/// Storage of users, roles, policies and keys lives behind this boundary.
pub trait IamProvider: Send + Sync + 'static {
    /// Serve one action.
    fn handle_action(&self, action: IamAction, input: ActionInput) -> ProviderFuture;
}

/// Default provider that answers every action with `NotImplemented`.
#[derive(Debug, Clone, Default)]
pub struct NotImplementedProvider;

impl IamProvider for NotImplementedProvider {
    fn handle_action(&self, action: IamAction, _input: ActionInput) -> ProviderFuture {
        Box::pin(async move { Err(IamError::not_implemented(action.as_str())) })
    }
}

/// An operation produced by the action registry.
///
/// Ownership passes to the caller, which executes it at most once.
pub trait Operation: Send + fmt::Debug {
    /// The action this operation serves.
    fn action(&self) -> IamAction;

    /// The POST body retained by the factory, if any.
    fn post_body(&self) -> Option<&Bytes>;

    /// Execute against `provider` in the context of the current request.
    fn execute(self: Box<Self>, provider: &dyn IamProvider, ctx: &RequestContext)
    -> ProviderFuture;
}

/// Operation that forwards one action to the provider.
#[derive(Debug, Clone)]
pub struct ActionOperation {
    action: IamAction,
    post_body: Option<Bytes>,
}

impl ActionOperation {
    /// An operation that does not look at the POST body.
    #[must_use]
    pub fn new(action: IamAction) -> Self {
        Self {
            action,
            post_body: None,
        }
    }

    /// An operation that keeps the POST body for the provider.
    #[must_use]
    pub fn with_body(action: IamAction, post_body: Bytes) -> Self {
        Self {
            action,
            post_body: Some(post_body),
        }
    }
}

impl Operation for ActionOperation {
    fn action(&self) -> IamAction {
        self.action
    }

    fn post_body(&self) -> Option<&Bytes> {
        self.post_body.as_ref()
    }

    fn execute(
        self: Box<Self>,
        provider: &dyn IamProvider,
        ctx: &RequestContext,
    ) -> ProviderFuture {
        let Self { action, post_body } = *self;
        tracing::debug!(
            %action,
            family = action.family().as_str(),
            request_id = %ctx.request_id,
            "executing IAM operation"
        );
        let input = ActionInput {
            args: ctx.args.clone(),
            post_body,
            caller: ctx.caller().cloned(),
            request_id: ctx.request_id.clone(),
        };
        provider.handle_action(action, input)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use ruststack_iam_model::error::IamErrorCode;

    use super::*;
    use crate::context::AuthState;

    #[derive(Debug, Default)]
    struct RecordingProvider {
        seen: Mutex<Vec<(IamAction, ActionInput)>>,
    }

    impl IamProvider for RecordingProvider {
        fn handle_action(&self, action: IamAction, input: ActionInput) -> ProviderFuture {
            self.seen.lock().unwrap().push((action, input));
            Box::pin(async { Ok(IamResponse::with_result("<Ok/>")) })
        }
    }

    #[tokio::test]
    async fn test_should_forward_arguments_body_and_caller() {
        let provider = RecordingProvider::default();
        let mut ctx = RequestContext::new(http::Method::POST, "/", "req-1")
            .with_arg("Action", "CreateRole")
            .with_arg("RoleName", "admin");
        ctx.auth = AuthState::Authenticated {
            strategy: "static",
            identity: UserIdentity::root("12345"),
        };

        let op = Box::new(ActionOperation::with_body(
            IamAction::CreateRole,
            Bytes::from_static(b"Action=CreateRole&RoleName=admin"),
        ));
        let response = op.execute(&provider, &ctx).await.unwrap();
        assert_eq!(response, IamResponse::with_result("<Ok/>"));

        let seen = provider.seen.lock().unwrap();
        let (action, input) = &seen[0];
        assert_eq!(*action, IamAction::CreateRole);
        assert_eq!(input.args.get("RoleName"), Some("admin"));
        assert_eq!(
            input.post_body.as_deref(),
            Some(&b"Action=CreateRole&RoleName=admin"[..])
        );
        assert_eq!(input.caller, Some(UserIdentity::root("12345")));
        assert_eq!(input.request_id, "req-1");
    }

    #[tokio::test]
    async fn test_should_report_not_implemented_by_default() {
        let ctx = RequestContext::new(http::Method::POST, "/", "req-2");
        let op: Box<dyn Operation> = Box::new(ActionOperation::new(IamAction::GetRole));
        assert!(op.post_body().is_none());

        let err = op.execute(&NotImplementedProvider, &ctx).await.unwrap_err();
        assert_eq!(err.code, IamErrorCode::NotImplemented);
        assert!(err.message.contains("GetRole"));
    }
}
