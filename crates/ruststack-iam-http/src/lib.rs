//! IAM HTTP service layer for RustStack.
//!
//! This crate implements the `awsQuery` front door of the IAM management API:
//!
//! - **Registry**: maps the `Action` argument to an operation factory
//! - **Handler**: per-request init, authorization and POST dispatch
//! - **Auth**: pluggable authentication strategies
//! - **Operation**: the executable operation contract and provider boundary
//! - **Service**: Hyper `Service` implementation tying the pipeline together
//! - **Response helpers**: XML success/error document formatting

pub mod auth;
pub mod body;
pub mod context;
pub mod handler;
pub mod operation;
pub mod registry;
pub mod response;
pub mod service;

pub use auth::{AuthDecision, AuthStrategy, StaticIdentityStrategy, StrategyRegistry};
pub use body::IamResponseBody;
pub use context::{AuthState, ProtocolFlags, RequestArgs, RequestContext};
pub use handler::{IamRestHandler, IamRestManager};
pub use operation::{
    ActionInput, ActionOperation, IamProvider, IamResponse, NotImplementedProvider, Operation,
};
pub use registry::{ActionRegistry, OperationFactory};
pub use service::{IamHttpConfig, IamHttpService};
