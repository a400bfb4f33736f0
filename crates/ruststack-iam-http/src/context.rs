//! Per-request state shared between the transport, the handler and operations.

use std::collections::BTreeMap;
use std::ops::BitOr;

use ruststack_iam_model::error::IamError;
use ruststack_iam_model::identity::UserIdentity;

/// Dialect tag identifying the IAM management API.
pub const IAM_DIALECT: &str = "iam";

/// Name of the argument that selects the action.
pub const ACTION_ARG: &str = "Action";

/// Content type of `awsQuery` POST bodies.
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Bitmask of the REST protocol families handling a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ProtocolFlags(u32);

impl ProtocolFlags {
    /// No protocol selected yet.
    pub const NONE: Self = Self(0);
    /// S3 REST API.
    pub const S3: Self = Self(0x04);
    /// STS query API.
    pub const STS: Self = Self(0x10);
    /// IAM query API.
    pub const IAM: Self = Self(0x20);

    /// Raw bit value.
    #[must_use]
    pub fn bits(self) -> u32 {
        self.0
    }

    /// Whether every bit of `other` is set.
    #[must_use]
    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for ProtocolFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Request arguments gathered from the query string and form body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestArgs(BTreeMap<String, String>);

impl RequestArgs {
    /// Parse a URL query string.
    #[must_use]
    pub fn from_query(query: &str) -> Self {
        let mut args = Self::default();
        args.merge_urlencoded(query.as_bytes());
        args
    }

    /// Merge `application/x-www-form-urlencoded` pairs; later values win.
    pub fn merge_urlencoded(&mut self, input: &[u8]) {
        for (key, value) in form_urlencoded::parse(input) {
            self.0.insert(key.into_owned(), value.into_owned());
        }
    }

    /// Get an argument value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Whether the argument is present, even with an empty value.
    #[must_use]
    pub fn exists(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Set an argument.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Iterate over arguments in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of arguments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no arguments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Authentication outcome recorded on the context.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AuthState {
    /// No strategy has authenticated the request.
    #[default]
    Unauthenticated,
    /// A strategy accepted the request.
    Authenticated {
        /// Name of the strategy that accepted the request.
        strategy: &'static str,
        /// The caller.
        identity: UserIdentity,
    },
}

/// Mutable per-request state, owned by the transport.
#[derive(Debug)]
pub struct RequestContext {
    /// HTTP method.
    pub method: http::Method,
    /// URI path.
    pub path: String,
    /// Request headers.
    pub headers: http::HeaderMap,
    /// Query and form arguments.
    pub args: RequestArgs,
    /// API family tag, set by the handler during `init`.
    pub dialect: Option<&'static str>,
    /// Protocol bitmask, set by the handler during `init`.
    pub prot_flags: ProtocolFlags,
    /// Request identifier echoed in responses.
    pub request_id: String,
    /// Authentication state.
    pub auth: AuthState,
}

impl RequestContext {
    /// Create an empty context.
    #[must_use]
    pub fn new(method: http::Method, path: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: http::HeaderMap::new(),
            args: RequestArgs::default(),
            dialect: None,
            prot_flags: ProtocolFlags::NONE,
            request_id: request_id.into(),
            auth: AuthState::Unauthenticated,
        }
    }

    /// Build a context from request parts and the buffered body.
    ///
    /// Query arguments are read first; a form-encoded body is merged on top.
    #[must_use]
    pub fn from_parts(parts: &http::request::Parts, body: &[u8], request_id: &str) -> Self {
        let mut ctx = Self::new(parts.method.clone(), parts.uri.path(), request_id);
        ctx.headers = parts.headers.clone();
        if let Some(query) = parts.uri.query() {
            ctx.args = RequestArgs::from_query(query);
        }
        if is_form_encoded(&parts.headers) {
            ctx.args.merge_urlencoded(body);
        }
        ctx
    }

    /// Add an argument.
    #[must_use]
    pub fn with_arg(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.args.insert(key, value);
        self
    }

    /// The `Action` argument, if present.
    #[must_use]
    pub fn action(&self) -> Option<&str> {
        self.args.get(ACTION_ARG)
    }

    /// The authenticated caller, if any.
    #[must_use]
    pub fn caller(&self) -> Option<&UserIdentity> {
        match &self.auth {
            AuthState::Authenticated { identity, .. } => Some(identity),
            AuthState::Unauthenticated => None,
        }
    }
}

fn is_form_encoded(headers: &http::HeaderMap) -> bool {
    headers
        .get(http::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| {
            v.split(';')
                .next()
                .is_some_and(|mime| mime.trim().eq_ignore_ascii_case(FORM_CONTENT_TYPE))
        })
}

/// Transport-level checks shared by every REST dialect.
///
/// # Errors
///
/// Returns `MethodNotAllowed` for methods other than GET, HEAD and POST, and
/// `InvalidArgument` when the `format` argument asks for anything but XML.
pub fn init_rest_request(ctx: &RequestContext) -> Result<(), IamError> {
    if !matches!(
        ctx.method,
        http::Method::GET | http::Method::HEAD | http::Method::POST
    ) {
        return Err(IamError::method_not_allowed(&ctx.method));
    }
    match ctx.args.get("format") {
        None | Some("xml") => Ok(()),
        Some(other) => Err(IamError::invalid_argument(format!(
            "Unsupported response format: {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use ruststack_iam_model::error::IamErrorCode;

    use super::*;

    fn parts(method: http::Method, uri: &str, content_type: Option<&str>) -> http::request::Parts {
        let mut builder = http::Request::builder().method(method).uri(uri);
        if let Some(ct) = content_type {
            builder = builder.header("content-type", ct);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn test_should_parse_query_arguments() {
        let args = RequestArgs::from_query("Action=GetRole&RoleName=admin%20role&Empty=");
        assert_eq!(args.get("Action"), Some("GetRole"));
        assert_eq!(args.get("RoleName"), Some("admin role"));
        assert!(args.exists("Empty"));
        assert_eq!(args.get("Empty"), Some(""));
        assert!(!args.exists("Missing"));
        assert_eq!(args.len(), 3);
    }

    #[test]
    fn test_should_merge_form_body_over_query() {
        let parts = parts(
            http::Method::POST,
            "/?Action=ListRoles&Version=2010-05-08",
            Some("application/x-www-form-urlencoded; charset=utf-8"),
        );
        let ctx = RequestContext::from_parts(&parts, b"Action=CreateUser&UserName=bob", "req-1");
        assert_eq!(ctx.action(), Some("CreateUser"));
        assert_eq!(ctx.args.get("UserName"), Some("bob"));
        assert_eq!(ctx.args.get("Version"), Some("2010-05-08"));
        assert_eq!(ctx.request_id, "req-1");
    }

    #[test]
    fn test_should_ignore_body_without_form_content_type() {
        let parts = parts(http::Method::POST, "/", Some("application/json"));
        let ctx = RequestContext::from_parts(&parts, b"Action=CreateUser", "req-2");
        assert_eq!(ctx.action(), None);
        assert!(ctx.args.is_empty());
    }

    #[test]
    fn test_should_start_without_dialect_or_identity() {
        let ctx = RequestContext::new(http::Method::POST, "/", "req-3");
        assert_eq!(ctx.dialect, None);
        assert_eq!(ctx.prot_flags, ProtocolFlags::NONE);
        assert!(ctx.caller().is_none());
    }

    #[test]
    fn test_should_combine_protocol_flags() {
        let flags = ProtocolFlags::S3 | ProtocolFlags::IAM;
        assert!(flags.contains(ProtocolFlags::IAM));
        assert!(!flags.contains(ProtocolFlags::STS));
        assert_eq!(ProtocolFlags::IAM.bits(), 0x20);
    }

    #[test]
    fn test_should_reject_unsupported_methods() {
        let ctx = RequestContext::new(http::Method::DELETE, "/", "req-4");
        let err = init_rest_request(&ctx).unwrap_err();
        assert_eq!(err.code, IamErrorCode::MethodNotAllowed);
    }

    #[test]
    fn test_should_check_response_format() {
        let ctx = RequestContext::new(http::Method::POST, "/", "req-5");
        assert!(init_rest_request(&ctx).is_ok());
        assert!(init_rest_request(&ctx.with_arg("format", "xml")).is_ok());

        let ctx = RequestContext::new(http::Method::POST, "/", "req-6").with_arg("format", "json");
        let err = init_rest_request(&ctx).unwrap_err();
        assert_eq!(err.code, IamErrorCode::InvalidArgument);
    }
}
