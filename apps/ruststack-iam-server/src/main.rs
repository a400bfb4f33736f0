//! RustStack IAM Server - the IAM management API over `awsQuery`.
//!
//! Serves the action router from `ruststack-iam-http`. Actions are resolved,
//! authorized and dispatched to the configured provider; without a storage
//! backend every recognized action answers `NotImplemented`.
//!
//! # Usage
//!
//! ```text
//! GATEWAY_LISTEN=0.0.0.0:4566 ruststack-iam-server
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `GATEWAY_LISTEN` | `0.0.0.0:4566` | Bind address |
//! | `DEFAULT_REGION` | `us-east-1` | Region reported by the service |
//! | `IAM_SKIP_SIGNATURE_VALIDATION` | `true` | Grant the default identity to every request |
//! | `IAM_MAX_BODY_SIZE` | `1048576` | Largest accepted POST body in bytes |
//! | `IAM_DEFAULT_ACCOUNT_ID` | *(unset)* | Account of the default root identity |
//! | `IAM_FRONTEND_PREFIX` | *(empty)* | Prefix the IAM endpoint is mounted under |
//! | `LOG_LEVEL` | `info` | Log level filter |
//! | `RUST_LOG` | *(unset)* | Fine-grained tracing filter (overrides `LOG_LEVEL`) |

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as HttpConnBuilder;
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use ruststack_core::RustStackConfig;
use ruststack_iam_http::{IamHttpConfig, IamHttpService, IamProvider, NotImplementedProvider};
use ruststack_iam_model::identity::UserIdentity;

/// Server version reported at startup.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Account of the default identity when none is configured.
const FALLBACK_ACCOUNT_ID: &str = "RGW00000000000000000";

/// Initialize the tracing subscriber.
///
/// Uses `RUST_LOG` if set, otherwise falls back to the `LOG_LEVEL` config value.
fn init_tracing(log_level: &str) -> Result<()> {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::try_new(log_level)
            .with_context(|| format!("invalid log level filter: {log_level}"))?
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    Ok(())
}

/// Build the [`IamHttpConfig`] from the application [`RustStackConfig`].
fn build_http_config(config: &RustStackConfig) -> IamHttpConfig {
    let account_id = config
        .default_account_id
        .as_ref()
        .map_or(FALLBACK_ACCOUNT_ID, |id| id.as_str());

    IamHttpConfig {
        skip_signature_validation: config.iam_skip_signature_validation,
        max_body_size: config.iam_max_body_size,
        default_identity: UserIdentity::root(account_id),
        frontend_prefix: config.iam_frontend_prefix.clone(),
    }
}

/// Run the accept loop, serving connections until a shutdown signal is received.
async fn serve<P: IamProvider>(
    listener: TcpListener,
    service: IamHttpService<P>,
) -> Result<()> {
    let graceful = hyper_util::server::graceful::GracefulShutdown::new();
    let http = HttpConnBuilder::new(TokioExecutor::new());

    let shutdown = async {
        tokio::signal::ctrl_c().await.ok();
        info!("received shutdown signal, draining connections");
    };

    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            result = listener.accept() => {
                let (stream, peer_addr) = match result {
                    Ok(conn) => conn,
                    Err(e) => {
                        warn!(error = %e, "failed to accept connection");
                        continue;
                    }
                };

                let svc = service.clone();
                let conn = http.serve_connection(TokioIo::new(stream), svc);
                let conn = graceful.watch(conn.into_owned());

                tokio::spawn(async move {
                    if let Err(e) = conn.await {
                        error!(peer_addr = %peer_addr, error = %e, "connection error");
                    }
                });
            }

            () = &mut shutdown => {
                info!("shutting down gracefully");
                break;
            }
        }
    }

    graceful.shutdown().await;
    info!("all connections drained, exiting");

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = RustStackConfig::from_env().context("invalid configuration")?;

    init_tracing(&config.log_level)?;

    let http_config = build_http_config(&config);

    info!(
        gateway_listen = %config.gateway_listen,
        region = %config.default_region,
        skip_signature_validation = http_config.skip_signature_validation,
        default_arn = %http_config.default_identity.arn(),
        version = VERSION,
        "starting RustStack IAM Server",
    );

    let service = IamHttpService::new(Arc::new(NotImplementedProvider), http_config);

    let addr: SocketAddr = config
        .gateway_listen
        .parse()
        .with_context(|| format!("invalid bind address: {}", config.gateway_listen))?;

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;

    info!(%addr, "listening for connections");

    serve(listener, service).await
}
