//! # Cono Order API
//!
//! REST server for creating, pricing, and inspecting cone orders.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Order API Server                                │
//! │                                                                         │
//! │  Client ───► HTTP (8080) ───► routes ───► cono-db (SQLite)              │
//! │                                  │                                      │
//! │                                  ▼                                      │
//! │                          cono-core pricing                              │
//! │                        (recomputed per read)                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! Environment variables:
//! - `CONO_API_PORT` - HTTP port (default: 8080)
//! - `CONO_DB_PATH` - SQLite file path (default: ./data/cono.db)
//! - `RUST_LOG` - tracing filter (default: info,cono=debug,sqlx=warn)

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

// Re-exports
pub use config::ApiConfig;
pub use error::{ApiError, ErrorCode};
pub use routes::build_router;
pub use state::AppState;
