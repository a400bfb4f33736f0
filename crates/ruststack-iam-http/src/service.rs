//! IAM HTTP service implementing the hyper `Service` trait.

use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use bytes::Bytes;
use http_body_util::{BodyExt, LengthLimitError, Limited};
use hyper::body::Incoming;

use ruststack_iam_model::error::{IamError, IamErrorCode};
use ruststack_iam_model::identity::UserIdentity;

use crate::auth::{StaticIdentityStrategy, StrategyRegistry};
use crate::body::IamResponseBody;
use crate::context::RequestContext;
use crate::handler::IamRestManager;
use crate::operation::IamProvider;
use crate::response::{CONTENT_TYPE, error_to_response, xml_response};

/// Configuration for the IAM HTTP service.
#[derive(Debug, Clone)]
pub struct IamHttpConfig {
    /// Grant `default_identity` to every request instead of verifying
    /// signatures.
    pub skip_signature_validation: bool,
    /// Largest POST body accepted, in bytes.
    pub max_body_size: usize,
    /// Identity granted when signature validation is skipped.
    pub default_identity: UserIdentity,
    /// Prefix the frontend mounts the service under. Handed to the manager
    /// for each request; the IAM dialect routes on `Action` alone, so it is
    /// only recorded in handler logs.
    pub frontend_prefix: String,
}

impl Default for IamHttpConfig {
    fn default() -> Self {
        Self {
            skip_signature_validation: true,
            max_body_size: 1024 * 1024,
            default_identity: UserIdentity::root("RGW00000000000000000"),
            frontend_prefix: String::new(),
        }
    }
}

/// Hyper `Service` implementation for IAM.
///
/// Buffers each request body, drives an [`crate::handler::IamRestHandler`]
/// through init, authorization and dispatch, and executes the resulting
/// operation against the provider.
#[derive(Debug)]
pub struct IamHttpService<P: IamProvider> {
    provider: Arc<P>,
    manager: Arc<IamRestManager>,
    config: Arc<IamHttpConfig>,
}

impl<P: IamProvider> IamHttpService<P> {
    /// Create a service using the strategies implied by `config`.
    pub fn new(provider: Arc<P>, config: IamHttpConfig) -> Self {
        let mut auth_registry = StrategyRegistry::new();
        if config.skip_signature_validation {
            auth_registry = auth_registry
                .with_strategy(StaticIdentityStrategy::new(config.default_identity.clone()));
        }
        Self::with_auth_registry(provider, config, auth_registry)
    }

    /// Create a service with an explicit strategy registry.
    pub fn with_auth_registry(
        provider: Arc<P>,
        config: IamHttpConfig,
        auth_registry: StrategyRegistry,
    ) -> Self {
        Self {
            provider,
            manager: Arc::new(IamRestManager::new(auth_registry)),
            config: Arc::new(config),
        }
    }

    /// Run one buffered request through the pipeline.
    pub async fn handle(
        &self,
        parts: http::request::Parts,
        body: Bytes,
    ) -> http::Response<IamResponseBody> {
        let request_id = uuid::Uuid::new_v4().to_string();
        let is_head = parts.method == http::Method::HEAD;
        let response = process_request(
            parts,
            body,
            self.provider.as_ref(),
            &self.manager,
            &self.config,
            &request_id,
        )
        .await;
        let response = add_common_headers(response, &request_id);
        if is_head {
            response.map(|_| IamResponseBody::empty())
        } else {
            response
        }
    }
}

impl<P: IamProvider> Clone for IamHttpService<P> {
    fn clone(&self) -> Self {
        Self {
            provider: Arc::clone(&self.provider),
            manager: Arc::clone(&self.manager),
            config: Arc::clone(&self.config),
        }
    }
}

impl<P: IamProvider> hyper::service::Service<http::Request<Incoming>> for IamHttpService<P> {
    type Response = http::Response<IamResponseBody>;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn call(&self, req: http::Request<Incoming>) -> Self::Future {
        let service = self.clone();

        Box::pin(async move {
            let (parts, incoming) = req.into_parts();
            let response = match collect_body(incoming, service.config.max_body_size).await {
                Ok(body) => service.handle(parts, body).await,
                Err(err) => {
                    let request_id = uuid::Uuid::new_v4().to_string();
                    add_common_headers(error_to_response(&err, &request_id), &request_id)
                }
            };
            Ok(response)
        })
    }
}

/// Process a single buffered IAM request through the full pipeline.
async fn process_request<P: IamProvider>(
    parts: http::request::Parts,
    body: Bytes,
    provider: &P,
    manager: &IamRestManager,
    config: &IamHttpConfig,
    request_id: &str,
) -> http::Response<IamResponseBody> {
    let mut ctx = RequestContext::from_parts(&parts, &body, request_id);
    let handler = manager.get_handler(&ctx, body, &config.frontend_prefix);

    // 1. Dialect setup and generic REST checks.
    if let Err(err) = handler.init(&mut ctx) {
        return error_to_response(&err, request_id);
    }

    // 2. Authenticate.
    if let Err(err) = handler.authorize(&mut ctx).await {
        return error_to_response(&err, request_id);
    }

    // 3. Only POST carries actions.
    if ctx.method != http::Method::POST {
        return error_to_response(&IamError::method_not_allowed(&ctx.method), request_id);
    }

    // 4. Resolve the operation.
    let Some(op) = handler.resolve_post_operation(&ctx) else {
        let err = match ctx.action() {
            Some(name) => IamError::invalid_action(name),
            None => IamError::missing_action(),
        };
        return error_to_response(&err, request_id);
    };

    // 5. Execute.
    let action = op.action();
    match op.execute(provider, &ctx).await {
        Ok(response) => xml_response(action, &response, request_id),
        Err(err) => {
            tracing::debug!(%action, error = %err, request_id, "IAM operation failed");
            error_to_response(&err, request_id)
        }
    }
}

/// Collect the incoming body into a single `Bytes` buffer, bounded by `limit`.
async fn collect_body(incoming: Incoming, limit: usize) -> Result<Bytes, IamError> {
    Limited::new(incoming, limit)
        .collect()
        .await
        .map(http_body_util::Collected::to_bytes)
        .map_err(|e| {
            if e.downcast_ref::<LengthLimitError>().is_some() {
                IamError::with_message(
                    IamErrorCode::RequestEntityTooLarge,
                    format!("Request body exceeds {limit} bytes"),
                )
            } else {
                IamError::internal_error(format!("Failed to read request body: {e}"))
            }
        })
}

/// Add common response headers to every IAM response.
fn add_common_headers(
    mut response: http::Response<IamResponseBody>,
    request_id: &str,
) -> http::Response<IamResponseBody> {
    let headers = response.headers_mut();

    if let Ok(hv) = http::HeaderValue::from_str(request_id) {
        headers.entry("x-amzn-requestid").or_insert(hv);
    }

    headers
        .entry("content-type")
        .or_insert(http::HeaderValue::from_static(CONTENT_TYPE));

    headers.insert("server", http::HeaderValue::from_static("RustStack"));

    response
}
