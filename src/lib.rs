//! restdock - self-documenting REST API gateway
//!
//! restdock scans a directory tree of endpoint manifests, binds each one to
//! a compiled-in handler, and serves the result as live REST routes plus a
//! machine-readable catalog consumed by a browser playground.
//!
//! # How endpoints work
//!
//! - **Handlers** are Rust implementations of [`registry::ApiHandler`],
//!   registered by name in [`registry::builtin`].
//! - **Manifests** are TOML files under the api root. A manifest's position
//!   in the tree is its route (`api/example/hello.toml` → `/example/hello`);
//!   its `handler` key picks the implementation and its `[meta]` table
//!   carries name, description, category, and parameter list.
//! - **Discovery** runs once at startup: invalid manifests are logged and
//!   skipped, never fatal, and a missing api root just means zero endpoints.
//!
//! # Gateway surface
//!
//! - `GET /endpoints` - catalog of every registered endpoint, by category
//! - `GET /set` - branding/display settings for the frontend
//! - `GET /health` - liveness and uptime
//! - `/<route>` - one route per discovered endpoint, all HTTP methods
//! - static playground frontend at the root, with fixed 404/500 pages
//!
//! # Quick start
//!
//! ```rust,no_run
//! use restdock::GatewayConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = GatewayConfig::load()?;
//!     restdock::start_server(config).await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod discovery;
pub mod error;
pub mod middleware;
pub mod registry;
pub mod routes;
pub mod server;
pub mod settings;
pub mod state;

pub use config::GatewayConfig;
pub use error::{GatewayError, GatewayResult};
pub use server::{build_router, start_server};
pub use settings::Settings;
pub use state::AppState;
