//! Debugger panel state.
//!
//! A UI-independent projection of the query log: whether the panel is open
//! and a live, most-recent-first mirror of the buffer. The mirror is seeded
//! and subscribed atomically, so it never misses or duplicates an entry.

use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::query_log::{LogId, QueryLogEntry, QueryLogger, Subscription};

struct PanelInner {
    is_open: bool,
    logs: VecDeque<QueryLogEntry>,
    revision: u64,
}

/// Open/closed flag plus a mirror of the query log.
pub struct PanelState {
    inner: Arc<RwLock<PanelInner>>,
    logger: Arc<QueryLogger>,
    _subscription: Subscription,
}

impl PanelState {
    /// Attach a closed panel to `logger`.
    pub fn new(logger: Arc<QueryLogger>) -> Self {
        let inner = Arc::new(RwLock::new(PanelInner {
            is_open: false,
            logs: VecDeque::new(),
            revision: 0,
        }));

        let capacity = logger.capacity();
        let mirror = Arc::clone(&inner);
        let (snapshot, subscription) = logger.subscribe_with_snapshot(move |entry| {
            let mut inner = mirror.write();
            inner.logs.push_front(entry.clone());
            inner.logs.truncate(capacity);
            inner.revision += 1;
        });
        inner.write().logs.extend(snapshot);

        Self {
            inner,
            logger,
            _subscription: subscription,
        }
    }

    /// Whether the panel is showing.
    pub fn is_open(&self) -> bool {
        self.inner.read().is_open
    }

    /// Show or hide the panel.
    pub fn set_open(&self, open: bool) {
        let mut inner = self.inner.write();
        if inner.is_open != open {
            inner.is_open = open;
            inner.revision += 1;
        }
    }

    /// Flip the panel and return the new state.
    pub fn toggle(&self) -> bool {
        let mut inner = self.inner.write();
        inner.is_open = !inner.is_open;
        inner.revision += 1;
        inner.is_open
    }

    /// Mirrored entries, most recent first.
    pub fn logs(&self) -> Vec<QueryLogEntry> {
        self.inner.read().logs.iter().cloned().collect()
    }

    /// Number of mirrored entries.
    pub fn len(&self) -> usize {
        self.inner.read().logs.len()
    }

    /// Whether the mirror is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.read().logs.is_empty()
    }

    /// Bumped on every change; lets a UI skip redundant redraws.
    pub fn revision(&self) -> u64 {
        self.inner.read().revision
    }

    /// Clear the underlying log and the mirror.
    pub fn clear(&self) {
        self.logger.clear();

        let mut inner = self.inner.write();
        // Keep anything appended after the clear but before we got the lock
        let live: HashSet<LogId> = self.logger.get_all().iter().map(|e| e.id).collect();
        inner.logs.retain(|e| live.contains(&e.id));
        inner.revision += 1;
    }

    /// The query log this panel mirrors.
    pub fn logger(&self) -> &Arc<QueryLogger> {
        &self.logger
    }
}
