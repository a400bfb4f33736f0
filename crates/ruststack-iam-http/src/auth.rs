//! Authentication strategies consulted by the handler's `authorize` step.
//!
//! Signature verification itself is not implemented here: verifiers plug in
//! as [`AuthStrategy`] implementations and are tried in registration order.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use ruststack_iam_model::error::IamError;
use ruststack_iam_model::identity::UserIdentity;

use crate::context::{AuthState, RequestContext};

/// Future returned by [`AuthStrategy::authenticate`].
pub type AuthFuture<'a> = Pin<Box<dyn Future<Output = AuthDecision> + Send + 'a>>;

/// Verdict of a single strategy.
#[derive(Debug)]
pub enum AuthDecision {
    /// The request is authenticated as this identity.
    Granted(UserIdentity),
    /// The request carries credentials this strategy rejects.
    Denied(IamError),
    /// The strategy does not handle this kind of request.
    NotApplicable,
}

/// A way of authenticating a request.
pub trait AuthStrategy: Send + Sync + fmt::Debug {
    /// Short name recorded in the auth state and logs.
    fn name(&self) -> &'static str;

    /// Inspect the request. May suspend while credentials are fetched.
    fn authenticate<'a>(&'a self, ctx: &'a RequestContext) -> AuthFuture<'a>;
}

/// Grants one configured identity to every request.
///
/// Used when signature validation is skipped for local development.
#[derive(Debug, Clone)]
pub struct StaticIdentityStrategy {
    identity: UserIdentity,
}

impl StaticIdentityStrategy {
    /// Create a strategy granting `identity`.
    #[must_use]
    pub fn new(identity: UserIdentity) -> Self {
        Self { identity }
    }
}

impl AuthStrategy for StaticIdentityStrategy {
    fn name(&self) -> &'static str {
        "static"
    }

    fn authenticate<'a>(&'a self, _ctx: &'a RequestContext) -> AuthFuture<'a> {
        Box::pin(async move { AuthDecision::Granted(self.identity.clone()) })
    }
}

/// Ordered set of strategies.
#[derive(Debug, Clone, Default)]
pub struct StrategyRegistry {
    strategies: Vec<Arc<dyn AuthStrategy>>,
}

impl StrategyRegistry {
    /// An empty registry, which denies every request.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a strategy.
    #[must_use]
    pub fn with_strategy(mut self, strategy: impl AuthStrategy + 'static) -> Self {
        self.strategies.push(Arc::new(strategy));
        self
    }

    /// Number of strategies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    /// Whether no strategy is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    /// Authenticate the request, recording the caller on success.
    ///
    /// The first strategy that grants or denies decides; strategies that do
    /// not apply are skipped.
    ///
    /// # Errors
    ///
    /// Returns the denying strategy's error, or `AccessDenied` when no
    /// strategy applies.
    pub async fn authorize(&self, ctx: &mut RequestContext) -> Result<(), IamError> {
        for strategy in &self.strategies {
            let decision = strategy.authenticate(ctx).await;
            match decision {
                AuthDecision::Granted(identity) => {
                    tracing::debug!(
                        strategy = strategy.name(),
                        arn = %identity.arn(),
                        request_id = %ctx.request_id,
                        "request authenticated"
                    );
                    ctx.auth = AuthState::Authenticated {
                        strategy: strategy.name(),
                        identity,
                    };
                    return Ok(());
                }
                AuthDecision::Denied(err) => {
                    tracing::debug!(
                        strategy = strategy.name(),
                        error = %err,
                        request_id = %ctx.request_id,
                        "request denied"
                    );
                    return Err(err);
                }
                AuthDecision::NotApplicable => {}
            }
        }
        Err(IamError::access_denied(
            "No authentication strategy accepted the request",
        ))
    }
}

#[cfg(test)]
mod tests {
    use ruststack_iam_model::error::IamErrorCode;

    use super::*;

    #[derive(Debug)]
    struct Skip;

    impl AuthStrategy for Skip {
        fn name(&self) -> &'static str {
            "skip"
        }

        fn authenticate<'a>(&'a self, _ctx: &'a RequestContext) -> AuthFuture<'a> {
            Box::pin(async { AuthDecision::NotApplicable })
        }
    }

    #[derive(Debug)]
    struct Deny;

    impl AuthStrategy for Deny {
        fn name(&self) -> &'static str {
            "deny"
        }

        fn authenticate<'a>(&'a self, _ctx: &'a RequestContext) -> AuthFuture<'a> {
            Box::pin(async {
                AuthDecision::Denied(IamError::access_denied("signature does not match"))
            })
        }
    }

    fn ctx() -> RequestContext {
        RequestContext::new(http::Method::POST, "/", "req-1")
    }

    #[tokio::test]
    async fn test_should_grant_first_applicable_identity() {
        let registry = StrategyRegistry::new()
            .with_strategy(Skip)
            .with_strategy(StaticIdentityStrategy::new(UserIdentity::root("12345")))
            .with_strategy(Deny);
        let mut ctx = ctx();
        registry.authorize(&mut ctx).await.unwrap();
        assert_eq!(
            ctx.auth,
            AuthState::Authenticated {
                strategy: "static",
                identity: UserIdentity::root("12345"),
            }
        );
    }

    #[tokio::test]
    async fn test_should_stop_at_denial() {
        let registry = StrategyRegistry::new()
            .with_strategy(Deny)
            .with_strategy(StaticIdentityStrategy::new(UserIdentity::root("12345")));
        let mut ctx = ctx();
        let err = registry.authorize(&mut ctx).await.unwrap_err();
        assert_eq!(err.message, "signature does not match");
        assert!(ctx.caller().is_none());
    }

    #[tokio::test]
    async fn test_should_deny_when_nothing_applies() {
        let mut ctx = ctx();
        let err = StrategyRegistry::new()
            .with_strategy(Skip)
            .authorize(&mut ctx)
            .await
            .unwrap_err();
        assert_eq!(err.code, IamErrorCode::AccessDenied);

        let err = StrategyRegistry::new().authorize(&mut ctx).await.unwrap_err();
        assert_eq!(err.code, IamErrorCode::AccessDenied);
    }
}
