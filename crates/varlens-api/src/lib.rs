//! VarLens REST API Server.
//!
//! This crate exposes the VarLens engine over HTTP.
//!
//! ## Endpoints
//!
//! - `GET  /health` - liveness and version
//! - `POST /api/v1/var` - VaR for one method, confidence and horizon
//! - `POST /api/v1/var/report` - every method at several confidence levels
//! - `POST /api/v1/returns` - day-over-day returns from dated prices
//!
//! Estimations run on the blocking thread pool under a timeout, so a large
//! Monte Carlo request never stalls the I/O threads.
//!
//! ## Usage
//!
//! ```bash
//! # Start server on default port
//! varlens-server
//!
//! # Custom host, port and Monte Carlo timeout
//! varlens-server --host 0.0.0.0 --port 3000 --timeout-ms 5000
//!
//! # Settings from a file
//! varlens-server --config config/varlens.toml
//! ```

pub mod config;
pub mod dto;
pub mod error;
pub mod routes;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{ApiError, ApiResult};
pub use server::create_router;
pub use state::AppState;
