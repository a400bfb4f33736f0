//! IAM model types for RustStack.
//!
//! Hand-written types for the IAM management API served over the `awsQuery`
//! protocol: the closed set of supported actions, protocol errors, the user
//! identity record, and the name/path validators shared by every operation.
#![allow(clippy::doc_markdown)]
#![allow(clippy::module_name_repetitions)]

pub mod action;
pub mod error;
pub mod identity;
pub mod validation;

pub use action::{ActionFamily, IamAction};
pub use error::{IamError, IamErrorCode};
pub use identity::{PrincipalType, UserIdentity, format_user_arn};
pub use validation::{ValidationError, validate_account_name, validate_path, validate_user_name};
