//! # Application State
//!
//! Shared state handed to every HTTP handler.
//!
//! ## Composition
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        AppState (Clone-cheap)                           │
//! │                                                                         │
//! │   db      ──► cono_db::Database        (shared SqlitePool)              │
//! │   pricer  ──► cono_core::PricingEngine (stateless, shares the log)      │
//! │   oplog   ──► cono_core::OperationLog  (Arc<Mutex<Vec<LogEntry>>>)      │
//! │                                                                         │
//! │   The engine and the log endpoints see the SAME log store: every        │
//! │   pricing run a handler triggers is immediately visible under /logs.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use cono_core::{OperationLog, PricingEngine};
use cono_db::Database;

/// Shared application state.
///
/// axum clones this per request; all fields are handles, so clones are a
/// few `Arc` bumps.
#[derive(Clone)]
pub struct AppState {
    /// Database handle (pool + repositories).
    pub db: Database,

    /// Pricing engine recording into `oplog`.
    pub pricer: PricingEngine,

    /// The process-wide operation log.
    pub oplog: OperationLog,
}

impl AppState {
    /// Creates the application state around one log instance.
    ///
    /// The engine is built from a clone of the same log handle, which is
    /// what makes `/logs` reflect pricing activity.
    pub fn new(db: Database, oplog: OperationLog) -> Self {
        AppState {
            db,
            pricer: PricingEngine::new(oplog.clone()),
            oplog,
        }
    }
}
