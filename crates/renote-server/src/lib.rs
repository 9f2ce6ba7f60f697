//! REST server for a Renote workspace.
//!
//! This crate exposes a [`renote_core::Workspace`] over HTTP. Clients create,
//! read, update, move, rename and delete documents by numeric id, list the
//! workspace as a flat tree, and trigger a resync of ids after external
//! changes.
//!
//! # How It Works
//!
//! 1. [`RenoteServer::start`] binds a listener and serves each connection on
//!    its own tokio task
//! 2. Requests are routed by method and path, bodies are decoded as JSON
//! 3. Workspace operations run on the blocking pool, since they do
//!    synchronous filesystem I/O
//! 4. Results are wrapped in a `{code, message, data}` envelope with CORS headers
//!
//! # Example
//!
//! ```no_run
//! use renote_core::Workspace;
//! use renote_server::{RenoteServer, ServerConfig};
//! use std::sync::Arc;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let workspace = Arc::new(Workspace::open("/srv/notes", "/workspace")?);
//! let server = RenoteServer::start(workspace, ServerConfig::default()).await?;
//! println!("Listening on {}", server.url());
//! server.stop().await;
//! # Ok(())
//! # }
//! ```
//!
//! # Security
//!
//! There is no authentication. Every client path is confined to the
//! workspace root, and the `.renote` directory holding the id ledger cannot
//! be addressed.

pub mod config;
mod error;
mod handlers;
mod response;
mod router;
mod server;

pub use config::Config;
pub use error::{ApiError, ApiResult, category_to_status};
pub use response::ApiResponse;
pub use router::{Route, route};
pub use server::{RenoteServer, ServerConfig};
