//! The IAM REST handler and the manager that creates one per request.

use std::sync::Arc;

use bytes::Bytes;

use ruststack_iam_model::error::IamError;

use crate::auth::StrategyRegistry;
use crate::context::{IAM_DIALECT, ProtocolFlags, RequestContext, init_rest_request};
use crate::operation::Operation;
use crate::registry::ActionRegistry;

/// Per-request handler for the IAM dialect.
///
/// Driven as `init` → `authorize` → `resolve_post_operation`; the last step
/// consumes the handler.
#[derive(Debug)]
pub struct IamRestHandler {
    auth_registry: Arc<StrategyRegistry>,
    post_body: Bytes,
}

impl IamRestHandler {
    /// Create a handler bound to the buffered POST body.
    #[must_use]
    pub fn new(auth_registry: Arc<StrategyRegistry>, post_body: Bytes) -> Self {
        Self {
            auth_registry,
            post_body,
        }
    }

    /// Tag the request as IAM, then run the generic REST initialization.
    ///
    /// # Errors
    ///
    /// Propagates the error from [`init_rest_request`] unchanged.
    pub fn init(&self, ctx: &mut RequestContext) -> Result<(), IamError> {
        ctx.dialect = Some(IAM_DIALECT);
        ctx.prot_flags = ProtocolFlags::IAM;
        init_rest_request(ctx)
    }

    /// Authenticate the request through the strategy registry.
    ///
    /// # Errors
    ///
    /// Returns whatever the strategy registry returns.
    pub async fn authorize(&self, ctx: &mut RequestContext) -> Result<(), IamError> {
        self.auth_registry.authorize(ctx).await
    }

    /// Whether the request names a registered action.
    ///
    /// Agrees with [`Self::resolve_post_operation`]: it is true exactly when
    /// that call would return an operation.
    #[must_use]
    pub fn action_exists(ctx: &RequestContext) -> bool {
        ctx.action()
            .is_some_and(|name| ActionRegistry::global().exists(name))
    }

    /// Build the operation for the request's `Action` argument.
    ///
    /// Returns `None` when the argument is missing or names no registered
    /// action; the caller turns that into a protocol error.
    #[must_use]
    pub fn resolve_post_operation(self, ctx: &RequestContext) -> Option<Box<dyn Operation>> {
        let Some(action_name) = ctx.action() else {
            tracing::debug!(request_id = %ctx.request_id, "missing action argument in IAM handler");
            return None;
        };
        match ActionRegistry::global().lookup(action_name) {
            Some(factory) => Some(factory(self.post_body)),
            None => {
                tracing::debug!(
                    action = action_name,
                    request_id = %ctx.request_id,
                    "unknown action '{action_name}' for IAM handler"
                );
                None
            }
        }
    }
}

/// Creates an [`IamRestHandler`] for each incoming request.
#[derive(Debug, Clone)]
pub struct IamRestManager {
    auth_registry: Arc<StrategyRegistry>,
}

impl IamRestManager {
    /// Create a manager whose handlers authorize through `auth_registry`.
    #[must_use]
    pub fn new(auth_registry: StrategyRegistry) -> Self {
        Self {
            auth_registry: Arc::new(auth_registry),
        }
    }

    /// Create a handler owning the already-received POST body.
    #[must_use]
    pub fn get_handler(
        &self,
        ctx: &RequestContext,
        post_body: Bytes,
        frontend_prefix: &str,
    ) -> IamRestHandler {
        tracing::trace!(
            request_id = %ctx.request_id,
            frontend_prefix,
            body_len = post_body.len(),
            "creating IAM handler"
        );
        IamRestHandler::new(Arc::clone(&self.auth_registry), post_body)
    }
}
