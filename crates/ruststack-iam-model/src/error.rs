//! IAM error types.
//!
//! IAM errors are rendered by the HTTP layer as an `awsQuery` `<ErrorResponse>`
//! document carrying a fault type, an error code and a message.

use std::fmt;

/// Well-known IAM error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[non_exhaustive]
pub enum IamErrorCode {
    /// The `Action` argument names no supported action.
    InvalidAction,
    /// The request carried no `Action` argument.
    MissingAction,
    /// An argument has an unsupported value.
    InvalidArgument,
    /// A name or path failed validation.
    #[default]
    ValidationError,
    /// The HTTP method is not accepted by the endpoint.
    MethodNotAllowed,
    /// The caller is not allowed to perform the request.
    AccessDenied,
    /// The referenced entity does not exist.
    NoSuchEntity,
    /// The entity already exists.
    EntityAlreadyExists,
    /// An account quota was reached.
    LimitExceeded,
    /// The request body exceeds the configured size limit.
    RequestEntityTooLarge,
    /// The backend does not implement the action.
    NotImplemented,
    /// Unexpected server-side failure.
    InternalFailure,
}

impl IamErrorCode {
    /// Returns the error code string used in the `<Code>` element.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidAction => "InvalidAction",
            Self::MissingAction => "MissingAction",
            Self::InvalidArgument => "InvalidArgument",
            Self::ValidationError => "ValidationError",
            Self::MethodNotAllowed => "MethodNotAllowed",
            Self::AccessDenied => "AccessDenied",
            Self::NoSuchEntity => "NoSuchEntity",
            Self::EntityAlreadyExists => "EntityAlreadyExists",
            Self::LimitExceeded => "LimitExceeded",
            Self::RequestEntityTooLarge => "RequestEntityTooLarge",
            Self::NotImplemented => "NotImplemented",
            Self::InternalFailure => "InternalFailure",
        }
    }

    /// Returns the default HTTP status code for this error.
    #[must_use]
    pub fn default_status_code(&self) -> http::StatusCode {
        match self {
            Self::MethodNotAllowed => http::StatusCode::METHOD_NOT_ALLOWED,
            Self::AccessDenied => http::StatusCode::FORBIDDEN,
            Self::NoSuchEntity => http::StatusCode::NOT_FOUND,
            Self::EntityAlreadyExists => http::StatusCode::CONFLICT,
            Self::RequestEntityTooLarge => http::StatusCode::PAYLOAD_TOO_LARGE,
            Self::NotImplemented => http::StatusCode::NOT_IMPLEMENTED,
            Self::InternalFailure => http::StatusCode::INTERNAL_SERVER_ERROR,
            _ => http::StatusCode::BAD_REQUEST,
        }
    }

    /// Whether the fault lies with the caller (`Sender`) or the service
    /// (`Receiver`).
    #[must_use]
    pub fn fault(&self) -> &'static str {
        match self {
            Self::NotImplemented | Self::InternalFailure => "Receiver",
            _ => "Sender",
        }
    }
}

impl fmt::Display for IamErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An IAM error response.
#[derive(Debug)]
pub struct IamError {
    /// The error code.
    pub code: IamErrorCode,
    /// A human-readable error message.
    pub message: String,
    /// The HTTP status code.
    pub status_code: http::StatusCode,
    /// The underlying source error, if any.
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl fmt::Display for IamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IamError({}): {}", self.code, self.message)
    }
}

impl std::error::Error for IamError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

impl IamError {
    /// Create a new `IamError` from an error code.
    #[must_use]
    pub fn new(code: IamErrorCode) -> Self {
        Self {
            status_code: code.default_status_code(),
            message: code.as_str().to_owned(),
            code,
            source: None,
        }
    }

    /// Create a new `IamError` with a custom message.
    #[must_use]
    pub fn with_message(code: IamErrorCode, message: impl Into<String>) -> Self {
        Self {
            status_code: code.default_status_code(),
            message: message.into(),
            code,
            source: None,
        }
    }

    /// Set the source error.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    // -- Convenience constructors --

    /// No `Action` argument in the request.
    #[must_use]
    pub fn missing_action() -> Self {
        Self::with_message(
            IamErrorCode::MissingAction,
            "Missing required parameter: Action",
        )
    }

    /// The `Action` argument is not a supported action.
    #[must_use]
    pub fn invalid_action(action: &str) -> Self {
        Self::with_message(
            IamErrorCode::InvalidAction,
            format!("Could not find operation {action} for version 2010-05-08"),
        )
    }

    /// Unsupported argument value.
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::with_message(IamErrorCode::InvalidArgument, message)
    }

    /// Validation failure.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::with_message(IamErrorCode::ValidationError, message)
    }

    /// Method not accepted by the endpoint.
    #[must_use]
    pub fn method_not_allowed(method: &http::Method) -> Self {
        Self::with_message(
            IamErrorCode::MethodNotAllowed,
            format!("The IAM endpoint does not accept {method} requests"),
        )
    }

    /// Access denied.
    #[must_use]
    pub fn access_denied(message: impl Into<String>) -> Self {
        Self::with_message(IamErrorCode::AccessDenied, message)
    }

    /// Action recognized but not served by the backend.
    #[must_use]
    pub fn not_implemented(action: &str) -> Self {
        Self::with_message(
            IamErrorCode::NotImplemented,
            format!("Action {action} is not implemented"),
        )
    }

    /// Internal failure.
    #[must_use]
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::with_message(IamErrorCode::InternalFailure, message)
    }
}

impl From<crate::validation::ValidationError> for IamError {
    fn from(err: crate::validation::ValidationError) -> Self {
        Self::validation(err.to_string()).with_source(err)
    }
}

/// Create an `IamError` from an error code.
///
/// # Examples
///
/// ```
/// use ruststack_iam_model::iam_error;
/// use ruststack_iam_model::error::IamErrorCode;
///
/// let err = iam_error!(NoSuchEntity);
/// assert_eq!(err.code, IamErrorCode::NoSuchEntity);
///
/// let err = iam_error!(NoSuchEntity, "The role with name admin cannot be found.");
/// assert_eq!(err.message, "The role with name admin cannot be found.");
/// ```
#[macro_export]
macro_rules! iam_error {
    ($code:ident) => {
        $crate::error::IamError::new($crate::error::IamErrorCode::$code)
    };
    ($code:ident, $msg:expr) => {
        $crate::error::IamError::with_message($crate::error::IamErrorCode::$code, $msg)
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationError;

    #[test]
    fn test_should_map_codes_to_status() {
        assert_eq!(
            IamError::missing_action().status_code,
            http::StatusCode::BAD_REQUEST
        );
        assert_eq!(
            IamError::access_denied("no").status_code,
            http::StatusCode::FORBIDDEN
        );
        assert_eq!(
            IamError::not_implemented("GetRole").status_code,
            http::StatusCode::NOT_IMPLEMENTED
        );
        assert_eq!(
            IamError::method_not_allowed(&http::Method::PUT).status_code,
            http::StatusCode::METHOD_NOT_ALLOWED
        );
    }

    #[test]
    fn test_should_classify_fault_type() {
        assert_eq!(IamErrorCode::InvalidAction.fault(), "Sender");
        assert_eq!(IamErrorCode::InternalFailure.fault(), "Receiver");
    }

    #[test]
    fn test_should_name_unknown_action_in_message() {
        let err = IamError::invalid_action("createrole");
        assert_eq!(err.code, IamErrorCode::InvalidAction);
        assert!(err.message.contains("createrole"));
    }

    #[test]
    fn test_should_convert_validation_error() {
        let err = IamError::from(ValidationError::UserNameTooLong);
        assert_eq!(err.code, IamErrorCode::ValidationError);
        assert_eq!(err.message, "UserName too long");
        assert!(std::error::Error::source(&err).is_some());
    }
}
