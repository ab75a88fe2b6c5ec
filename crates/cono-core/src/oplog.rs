//! # Operation Log
//!
//! Process-wide append-only record of pricing computation events.
//!
//! ## Event Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Operation Log Events                                 │
//! │                                                                         │
//! │  Pipeline Step            Event Kind            Details                 │
//! │  ─────────────            ──────────            ───────                 │
//! │                                                                         │
//! │  resolve variant ───────► CREATE_BASE_CONE ───► base price/ingredients  │
//! │                                                                         │
//! │  each applied topping ──► ADD_TOPPING ────────► topping id + price      │
//! │                                                                         │
//! │  combo rule fires ──────► APPLY_DISCOUNT ─────► amount + reason         │
//! │                                                                         │
//! │  finalize ──────────────► CONE_COMPLETED ─────► the full result         │
//! │                                                                         │
//! │  pricing blew up* ──────► ERROR_PRICING ──────► error text              │
//! │  (*collaborator layer only — the core raises, it never self-logs this)  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Thread Safety
//! Entries live in `Arc<Mutex<Vec<LogEntry>>>` because independent requests
//! on a multi-threaded host append concurrently; the lock is held only for
//! the push/copy, never across a computation.
//!
//! ## One Per Process
//! Create a single `OperationLog` at startup and hand clones of the handle
//! to everything that records events — the clones all share one store.
//! There is no implicit global: tests build a fresh instance each and stay
//! isolated. Entries survive until `clear()` or process exit; losing them
//! on restart is acceptable (best-effort observability, not a source of
//! truth).

use std::str::FromStr;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use ts_rs::TS;

use crate::error::ValidationError;

/// Query limit applied when the caller does not name one.
pub const DEFAULT_QUERY_LIMIT: usize = 100;

// =============================================================================
// Operation Kind
// =============================================================================

/// The closed set of event kinds the log records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperationKind {
    /// A base cone was resolved from the variant catalog.
    CreateBaseCone,
    /// One topping was priced and applied.
    AddTopping,
    /// The combo discount fired.
    ApplyDiscount,
    /// A priced result was produced.
    ConeCompleted,
    /// A collaborator caught a pricing failure and degraded to the default
    /// result. Never emitted by the core itself.
    ErrorPricing,
}

impl OperationKind {
    /// Wire name of this kind.
    pub const fn as_str(&self) -> &'static str {
        match self {
            OperationKind::CreateBaseCone => "CREATE_BASE_CONE",
            OperationKind::AddTopping => "ADD_TOPPING",
            OperationKind::ApplyDiscount => "APPLY_DISCOUNT",
            OperationKind::ConeCompleted => "CONE_COMPLETED",
            OperationKind::ErrorPricing => "ERROR_PRICING",
        }
    }

    /// All kinds, for allowed-value listings in validation errors.
    pub const ALL: [OperationKind; 5] = [
        OperationKind::CreateBaseCone,
        OperationKind::AddTopping,
        OperationKind::ApplyDiscount,
        OperationKind::ConeCompleted,
        OperationKind::ErrorPricing,
    ];
}

impl std::fmt::Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses the wire name (case-insensitive, so `add_topping` works in query
/// strings). Unknown names list the valid set.
impl FromStr for OperationKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_ascii_uppercase();
        OperationKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == upper)
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "operation_kind".to_string(),
                allowed: OperationKind::ALL.iter().map(|k| k.to_string()).collect(),
            })
    }
}

// =============================================================================
// Log Entry
// =============================================================================

/// One recorded computation event. Immutable once appended.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LogEntry {
    /// When the event was recorded.
    #[ts(as = "String")]
    pub timestamp: DateTime<Utc>,

    /// What happened.
    pub kind: OperationKind,

    /// Order this event belongs to; 0 when the caller had no id yet.
    pub order_id: i64,

    /// Event-specific payload (topping + price, discount + reason, ...).
    #[ts(type = "Record<string, unknown>")]
    pub details: serde_json::Value,
}

// =============================================================================
// Log Query
// =============================================================================

/// Filter for reading the log. Empty filter = everything (last
/// [`DEFAULT_QUERY_LIMIT`] entries).
#[derive(Debug, Clone, Default)]
pub struct LogQuery {
    /// Only entries for this order id.
    pub order_id: Option<i64>,

    /// Only entries of this kind.
    pub kind: Option<OperationKind>,

    /// Return at most this many entries (the most recent matches);
    /// `None` = [`DEFAULT_QUERY_LIMIT`].
    pub limit: Option<usize>,
}

// =============================================================================
// Operation Log
// =============================================================================

/// Shared handle to the process-wide operation log.
///
/// ## Thread Safety
/// Uses `Arc<Mutex<Vec<LogEntry>>>`:
/// - `Arc`: one store shared by every handle clone
/// - `Mutex`: appends from concurrent requests serialize; reads copy out
///
/// ## Why Not RwLock?
/// Appends dominate reads in this workload, and the critical sections are a
/// single push or a clone. A RwLock would add complexity with minimal
/// benefit.
#[derive(Debug, Clone)]
pub struct OperationLog {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl OperationLog {
    /// Creates an empty log. Call once at process startup and clone the
    /// handle from there; a second `new()` is a second, unrelated store.
    pub fn new() -> Self {
        OperationLog {
            entries: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Appends one event and mirrors it to the operator trace.
    pub fn append(&self, kind: OperationKind, order_id: i64, details: serde_json::Value) {
        info!(kind = %kind, order_id = order_id, details = %details, "operation recorded");

        let entry = LogEntry {
            timestamp: Utc::now(),
            kind,
            order_id,
            details,
        };
        let mut entries = self.entries.lock().expect("operation log mutex poisoned");
        entries.push(entry);
    }

    /// Every entry, insertion order. Returns a defensive copy — mutating
    /// the returned vector does not touch the log.
    pub fn list_all(&self) -> Vec<LogEntry> {
        let entries = self.entries.lock().expect("operation log mutex poisoned");
        entries.clone()
    }

    /// Filtered read: entries matching the query, insertion order, capped
    /// to the last `limit` matches (default [`DEFAULT_QUERY_LIMIT`]).
    pub fn query(&self, filter: &LogQuery) -> Vec<LogEntry> {
        let entries = self.entries.lock().expect("operation log mutex poisoned");
        let matches: Vec<LogEntry> = entries
            .iter()
            .filter(|e| filter.order_id.map_or(true, |id| e.order_id == id))
            .filter(|e| filter.kind.map_or(true, |kind| e.kind == kind))
            .cloned()
            .collect();
        drop(entries);

        let limit = filter.limit.unwrap_or(DEFAULT_QUERY_LIMIT);
        let skip = matches.len().saturating_sub(limit);
        matches.into_iter().skip(skip).collect()
    }

    /// Removes all entries. Capture `len()` first if you need to report how
    /// many were dropped.
    pub fn clear(&self) {
        let mut entries = self.entries.lock().expect("operation log mutex poisoned");
        entries.clear();
    }

    /// Number of entries currently held.
    pub fn len(&self) -> usize {
        let entries = self.entries.lock().expect("operation log mutex poisoned");
        entries.len()
    }

    /// Whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for OperationLog {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_append_preserves_insertion_order() {
        let log = OperationLog::new();
        for i in 0..5 {
            log.append(OperationKind::AddTopping, i, json!({ "seq": i }));
        }

        let entries = log.list_all();
        assert_eq!(entries.len(), 5);
        for (i, entry) in entries.iter().enumerate() {
            assert_eq!(entry.order_id, i as i64);
            assert_eq!(entry.details["seq"], json!(i));
        }
    }

    #[test]
    fn test_list_all_is_a_defensive_copy() {
        let log = OperationLog::new();
        log.append(OperationKind::ConeCompleted, 1, json!({}));

        let mut copy = log.list_all();
        copy.clear();
        copy.push(LogEntry {
            timestamp: Utc::now(),
            kind: OperationKind::ErrorPricing,
            order_id: 99,
            details: json!({}),
        });

        let entries = log.list_all();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].kind, OperationKind::ConeCompleted);
    }

    #[test]
    fn test_clear_empties_the_log() {
        let log = OperationLog::new();
        log.append(OperationKind::CreateBaseCone, 1, json!({}));
        log.append(OperationKind::ConeCompleted, 1, json!({}));
        assert_eq!(log.len(), 2);

        log.clear();
        assert!(log.is_empty());
        assert!(log.list_all().is_empty());
    }

    #[test]
    fn test_clones_share_one_store() {
        let log = OperationLog::new();
        let handle = log.clone();
        handle.append(OperationKind::AddTopping, 7, json!({ "topping": "bacon" }));

        assert_eq!(log.len(), 1);
        assert_eq!(log.list_all()[0].order_id, 7);
    }

    #[test]
    fn test_query_filters_by_order_and_kind() {
        let log = OperationLog::new();
        log.append(OperationKind::CreateBaseCone, 1, json!({}));
        log.append(OperationKind::AddTopping, 1, json!({}));
        log.append(OperationKind::AddTopping, 2, json!({}));
        log.append(OperationKind::ConeCompleted, 1, json!({}));

        let for_order = log.query(&LogQuery {
            order_id: Some(1),
            ..LogQuery::default()
        });
        assert_eq!(for_order.len(), 3);

        let toppings = log.query(&LogQuery {
            kind: Some(OperationKind::AddTopping),
            ..LogQuery::default()
        });
        assert_eq!(toppings.len(), 2);

        let combined = log.query(&LogQuery {
            order_id: Some(1),
            kind: Some(OperationKind::AddTopping),
            limit: None,
        });
        assert_eq!(combined.len(), 1);
    }

    #[test]
    fn test_query_returns_last_n_matches() {
        let log = OperationLog::new();
        for i in 0..10 {
            log.append(OperationKind::AddTopping, i, json!({}));
        }

        let last_three = log.query(&LogQuery {
            limit: Some(3),
            ..LogQuery::default()
        });
        assert_eq!(last_three.len(), 3);
        assert_eq!(last_three[0].order_id, 7);
        assert_eq!(last_three[2].order_id, 9);
    }

    #[test]
    fn test_query_default_limit_is_100() {
        let log = OperationLog::new();
        for i in 0..150 {
            log.append(OperationKind::AddTopping, i, json!({}));
        }

        let capped = log.query(&LogQuery::default());
        assert_eq!(capped.len(), DEFAULT_QUERY_LIMIT);
        // The oldest 50 fell outside the window.
        assert_eq!(capped[0].order_id, 50);
        assert_eq!(capped.last().unwrap().order_id, 149);
    }

    #[test]
    fn test_concurrent_appends_are_all_retained() {
        let log = OperationLog::new();
        let mut handles = Vec::new();
        for t in 0..8 {
            let log = log.clone();
            handles.push(std::thread::spawn(move || {
                for i in 0..50 {
                    log.append(OperationKind::AddTopping, t, json!({ "i": i }));
                }
            }));
        }
        for handle in handles {
            handle.join().expect("appender thread panicked");
        }

        assert_eq!(log.len(), 400);
    }

    #[test]
    fn test_kind_wire_names() {
        assert_eq!(OperationKind::CreateBaseCone.to_string(), "CREATE_BASE_CONE");
        assert_eq!(
            "ADD_TOPPING".parse::<OperationKind>().unwrap(),
            OperationKind::AddTopping
        );
        assert_eq!(
            "apply_discount".parse::<OperationKind>().unwrap(),
            OperationKind::ApplyDiscount
        );
        assert!("NOT_A_KIND".parse::<OperationKind>().is_err());
    }

    #[test]
    fn test_kind_serializes_screaming_snake() {
        let json = serde_json::to_string(&OperationKind::CreateBaseCone).unwrap();
        assert_eq!(json, "\"CREATE_BASE_CONE\"");
        let back: OperationKind = serde_json::from_str("\"ERROR_PRICING\"").unwrap();
        assert_eq!(back, OperationKind::ErrorPricing);
    }
}
