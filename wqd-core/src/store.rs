//! Per-view row holder with a stale-response guard.
//!
//! Every `begin` bumps a generation counter. A result is applied only if
//! it carries the current generation, so a slow request for an old locator
//! can never overwrite the state of a newer one.
//!
//! # Example
//!
//! ```rust
//! use wqd_core::{decode::decode_str, LoadState, RowStore};
//!
//! let store = RowStore::new();
//! let old = store.begin("/old.csv");
//! let new = store.begin("/new.csv");
//! assert!(store.finish(&new, decode_str("ParamName\nX\n")));
//! assert!(!store.finish(&old, decode_str("ParamName\nY\nZ\n")));
//! assert_eq!(store.state().ready().map(|rows| rows.len()), Some(1));
//! ```

use crate::error::ResourceError;
use crate::record::{RawRecord, Rows};
use crate::state::LoadState;
use std::cell::RefCell;
use std::rc::Rc;

/// Identifies one request issued by [`RowStore::begin`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
    locator: String,
}

#[derive(Default)]
struct StoreInner {
    generation: u64,
    state: LoadState<Rows>,
}

/// Rows for one view, cheaply cloneable (via `Rc`) and meant to be shared
/// within a single-threaded, cooperatively scheduled host.
#[derive(Clone, Default)]
pub struct RowStore {
    inner: Rc<RefCell<StoreInner>>,
}

impl RowStore {
    /// A store in the `Idle` state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a request for `locator`, entering `Loading`.
    pub fn begin(&self, locator: &str) -> LoadTicket {
        let mut inner = self.inner.borrow_mut();
        inner.generation += 1;
        inner.state = LoadState::Loading;
        log::info!(
            "[WQD] store: loading {} (generation {})",
            locator,
            inner.generation
        );
        LoadTicket {
            generation: inner.generation,
            locator: locator.to_string(),
        }
    }

    /// Apply a finished request. Returns `false`, leaving the state untouched,
    /// when a newer `begin` has superseded the ticket.
    pub fn finish(
        &self,
        ticket: &LoadTicket,
        result: Result<Vec<RawRecord>, ResourceError>,
    ) -> bool {
        let mut inner = self.inner.borrow_mut();
        if ticket.generation != inner.generation {
            log::debug!(
                "[WQD] store: dropping stale response for {} (generation {}, current {})",
                ticket.locator,
                ticket.generation,
                inner.generation
            );
            return false;
        }
        inner.state = match result {
            Ok(rows) => {
                log::info!("[WQD] store: loaded {} rows from {}", rows.len(), ticket.locator);
                LoadState::Ready(rows.into())
            }
            Err(e) => {
                log::warn!("[WQD] store: {}", e);
                LoadState::Failed(e.to_string())
            }
        };
        true
    }

    /// Snapshot of the current state. Rows are shared, not copied.
    pub fn state(&self) -> LoadState<Rows> {
        self.inner.borrow().state.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::decode_str;

    const CSV: &str = "ParamName,Name,Result_Value\nX,S1,10\nX,S1,20\n";

    #[test]
    fn starts_idle() {
        let store = RowStore::new();
        assert_eq!(store.state(), LoadState::Idle);
    }

    #[test]
    fn begin_enters_loading() {
        let store = RowStore::new();
        store.begin("/EStL_AllDataJoin.csv");
        assert!(store.state().is_loading());
        assert!(store.state().ready().is_none());
    }

    #[test]
    fn finish_ok_is_ready() {
        let store = RowStore::new();
        let ticket = store.begin("/a.csv");
        assert!(store.finish(&ticket, decode_str(CSV)));
        assert_eq!(store.state().ready().map(|r| r.len()), Some(2));
    }

    #[test]
    fn finish_err_is_failed_with_message() {
        let store = RowStore::new();
        let ticket = store.begin("/a.csv");
        let err = ResourceError::HttpStatus {
            locator: "/a.csv".into(),
            status: 500,
        };
        assert!(store.finish(&ticket, Err(err)));
        assert_eq!(
            store.state().error(),
            Some("Failed to load CSV /a.csv: HTTP status 500")
        );
        assert!(store.state().ready().is_none());
    }

    #[test]
    fn stale_response_is_ignored() {
        let store = RowStore::new();
        let first = store.begin("/a.csv");
        let second = store.begin("/b.csv");
        assert_ne!(first, second);

        // The older request resolves after the newer one started.
        assert!(!store.finish(&first, decode_str(CSV)));
        assert!(store.state().is_loading());

        assert!(store.finish(&second, Ok(Vec::new())));
        assert_eq!(store.state().ready().map(|r| r.len()), Some(0));

        // Still ignored once the newer request has landed.
        assert!(!store.finish(&first, decode_str(CSV)));
        assert_eq!(store.state().ready().map(|r| r.len()), Some(0));
    }

    #[test]
    fn reload_from_failed_is_allowed() {
        let store = RowStore::new();
        let t1 = store.begin("/missing.csv");
        store.finish(&t1, Err(ResourceError::Decode("nope".into())));
        let t2 = store.begin("/a.csv");
        assert!(store.state().is_loading());
        assert!(store.finish(&t2, decode_str(CSV)));
        assert!(store.state().ready().is_some());
    }

    #[test]
    fn clones_share_state() {
        let store = RowStore::new();
        let view = store.clone();
        let ticket = store.begin("/a.csv");
        store.finish(&ticket, decode_str(CSV));
        assert_eq!(view.state().ready().map(|r| r.len()), Some(2));
    }
}
