//! Bounded query log with subscriber fan-out.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  QueryLogger                                                    │
//! │  ├── state: Mutex<LogState>                                     │
//! │  │   ├── entries: VecDeque<QueryLogEntry>  (newest at front)    │
//! │  │   └── subscribers: Vec<(SubscriberId, Callback)>             │
//! │  │                                                              │
//! │  ├── delivery: ReentrantMutex<()>                               │
//! │  │   └── Serializes append + notify so every subscriber sees    │
//! │  │       entries in insertion order                             │
//! │  │                                                              │
//! │  └── broadcast_tx: broadcast::Sender<QueryLogEntry>             │
//! │      └── Channel-style subscriptions for async consumers        │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::{BTreeMap, VecDeque};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::{Arc, Weak};
use std::time::Duration;

use chrono::{DateTime, Utc};
use parking_lot::{Mutex, ReentrantMutex};
use rand::Rng;
use serde_json::Value;
use tokio::sync::broadcast;

use super::classify::classify;
use super::entry::{LogId, Operation, QueryDescription, QueryLogEntry};

/// Default number of entries retained.
pub const DEFAULT_CAPACITY: usize = 100;

/// Buffer size for the broadcast channel.
const BROADCAST_CHANNEL_SIZE: usize = 256;

/// How the logger fills in `duration_ms` when the caller has no measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DurationModel {
    /// Uniformly random in `[min_ms, max_ms)`
    Simulated {
        /// Lower bound in milliseconds
        min_ms: f64,
        /// Upper bound in milliseconds
        max_ms: f64,
    },
    /// Always the same value (useful for deterministic tests)
    Fixed(f64),
}

impl Default for DurationModel {
    fn default() -> Self {
        DurationModel::Simulated {
            min_ms: 1.0,
            max_ms: 11.0,
        }
    }
}

impl DurationModel {
    /// Draw one duration, rounded to two decimals.
    pub fn sample(&self) -> f64 {
        let raw = match *self {
            DurationModel::Fixed(ms) => ms,
            DurationModel::Simulated { min_ms, max_ms } => {
                if max_ms > min_ms {
                    rand::rng().random_range(min_ms..max_ms)
                } else {
                    min_ms
                }
            }
        };
        round_ms(raw.max(0.0))
    }
}

/// Configuration for the query logger.
#[derive(Debug, Clone)]
pub struct QueryLogConfig {
    /// Maximum entries kept; the oldest is evicted beyond this (minimum 1).
    pub capacity: usize,
    /// Source of synthetic durations.
    pub duration: DurationModel,
}

impl Default for QueryLogConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            duration: DurationModel::default(),
        }
    }
}

impl QueryLogConfig {
    /// Set the retention capacity.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Set the duration model.
    pub fn with_duration(mut self, duration: DurationModel) -> Self {
        self.duration = duration;
        self
    }
}

/// Aggregate numbers over the retained entries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryLogStats {
    /// Entries currently retained
    pub total: usize,
    /// Retained entries per operation kind
    pub by_operation: BTreeMap<Operation, usize>,
    /// Mean duration of retained entries (0 when empty)
    pub mean_duration_ms: f64,
    /// Subscriber callbacks that panicked since the logger was created
    pub failed_deliveries: u64,
}

type Callback = Arc<dyn Fn(&QueryLogEntry) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SubscriberId(u64);

struct LogState {
    entries: VecDeque<QueryLogEntry>,
    subscribers: Vec<(SubscriberId, Callback)>,
    next_subscriber: u64,
    last_timestamp: Option<DateTime<Utc>>,
    /// Entries stored but not yet delivered, oldest first
    pending: VecDeque<(QueryLogEntry, Vec<Callback>)>,
    /// Set while the outermost append is delivering `pending`
    delivering: bool,
}

/// In-memory, bounded, most-recent-first log of issued queries.
///
/// Constructed explicitly and shared as `Arc<QueryLogger>` with every store
/// adapter that should report into it.
///
/// # Example
///
/// ```ignore
/// let logger = QueryLogger::with_defaults();
///
/// let _sub = logger.subscribe(|entry| println!("{} {}", entry.operation, entry.sql));
/// logger.append(Operation::Select, "SELECT * FROM students", vec![]);
///
/// assert_eq!(logger.get_all().len(), 1);
/// ```
pub struct QueryLogger {
    config: QueryLogConfig,
    state: Mutex<LogState>,
    delivery: ReentrantMutex<()>,
    broadcast_tx: broadcast::Sender<QueryLogEntry>,
    failed_deliveries: AtomicU64,
}

impl QueryLogger {
    /// Create a new logger with the given configuration.
    pub fn new(config: QueryLogConfig) -> Arc<Self> {
        let (broadcast_tx, _) = broadcast::channel(BROADCAST_CHANNEL_SIZE);
        let config = QueryLogConfig {
            capacity: config.capacity.max(1),
            ..config
        };

        Arc::new(Self {
            state: Mutex::new(LogState {
                entries: VecDeque::with_capacity(config.capacity),
                subscribers: Vec::new(),
                next_subscriber: 0,
                last_timestamp: None,
                pending: VecDeque::new(),
                delivering: false,
            }),
            config,
            delivery: ReentrantMutex::new(()),
            broadcast_tx,
            failed_deliveries: AtomicU64::new(0),
        })
    }

    /// Create a logger with default configuration (100 entries).
    pub fn with_defaults() -> Arc<Self> {
        Self::new(QueryLogConfig::default())
    }

    /// Maximum number of retained entries.
    pub fn capacity(&self) -> usize {
        self.config.capacity
    }

    /// Record a query with a synthetic duration and notify subscribers.
    pub fn append(
        &self,
        operation: Operation,
        sql: impl Into<String>,
        params: Vec<Value>,
    ) -> QueryLogEntry {
        let _delivery = self.delivery.lock();
        let duration_ms = self.config.duration.sample();
        self.record(operation, sql.into(), params, duration_ms, Utc::now())
    }

    /// Record a query whose execution time was actually measured.
    pub fn append_measured(
        &self,
        operation: Operation,
        sql: impl Into<String>,
        params: Vec<Value>,
        elapsed: Duration,
    ) -> QueryLogEntry {
        let _delivery = self.delivery.lock();
        let duration_ms = round_ms(elapsed.as_secs_f64() * 1000.0);
        self.record(operation, sql.into(), params, duration_ms, Utc::now())
    }

    /// Record a sequence of queries in order.
    ///
    /// Descriptions without an operation are classified from their SQL text.
    /// The last description ends up newest. All entries share one capture
    /// time and subscribers are notified once per entry.
    pub fn append_batch<I>(&self, descriptions: I) -> Vec<QueryLogEntry>
    where
        I: IntoIterator<Item = QueryDescription>,
    {
        let _delivery = self.delivery.lock();
        let captured_at = Utc::now();

        descriptions
            .into_iter()
            .map(|desc| {
                let operation = desc.operation.unwrap_or_else(|| classify(&desc.sql));
                let duration_ms = match desc.duration_ms {
                    Some(ms) => round_ms(ms.max(0.0)),
                    None => self.config.duration.sample(),
                };
                self.record(operation, desc.sql, desc.params, duration_ms, captured_at)
            })
            .collect()
    }

    /// Build, store and publish one entry. Caller must hold `delivery`.
    ///
    /// An append made by a subscriber during delivery is stored at once but
    /// only queued for delivery; the outermost call drains the queue, so
    /// every subscriber still sees entries in insertion order.
    fn record(
        &self,
        operation: Operation,
        sql: String,
        params: Vec<Value>,
        duration_ms: f64,
        captured_at: DateTime<Utc>,
    ) -> QueryLogEntry {
        let (entry, nested) = {
            let mut state = self.state.lock();

            let timestamp = match state.last_timestamp {
                Some(last) if captured_at < last => last,
                _ => captured_at,
            };
            state.last_timestamp = Some(timestamp);

            let entry = QueryLogEntry {
                id: LogId::new(),
                sql,
                params,
                operation,
                duration_ms,
                timestamp,
            };

            state.entries.push_front(entry.clone());
            state.entries.truncate(self.config.capacity);

            let subscribers: Vec<Callback> =
                state.subscribers.iter().map(|(_, cb)| cb.clone()).collect();
            state.pending.push_back((entry.clone(), subscribers));

            let nested = std::mem::replace(&mut state.delivering, true);
            (entry, nested)
        };

        tracing::trace!(
            operation = %entry.operation,
            sql = %entry.sql,
            duration_ms = entry.duration_ms,
            "query logged"
        );

        if !nested {
            self.deliver_pending();
        }
        entry
    }

    /// Deliver queued entries in order until none are left.
    fn deliver_pending(&self) {
        loop {
            let (entry, subscribers) = {
                let mut state = self.state.lock();
                match state.pending.pop_front() {
                    Some(next) => next,
                    None => {
                        state.delivering = false;
                        return;
                    }
                }
            };

            self.notify(&entry, &subscribers);

            // No receivers is fine
            let _ = self.broadcast_tx.send(entry);
        }
    }

    fn notify(&self, entry: &QueryLogEntry, subscribers: &[Callback]) {
        for callback in subscribers {
            let result = catch_unwind(AssertUnwindSafe(|| callback(entry)));
            if result.is_err() {
                self.failed_deliveries.fetch_add(1, AtomicOrdering::Relaxed);
                tracing::warn!(entry_id = %entry.id, "query log subscriber panicked; skipping it");
            }
        }
    }

    /// Register a callback invoked once per new entry, in insertion order.
    ///
    /// Delivery stops when the returned [`Subscription`] is unsubscribed or
    /// dropped.
    pub fn subscribe<F>(self: &Arc<Self>, callback: F) -> Subscription
    where
        F: Fn(&QueryLogEntry) + Send + Sync + 'static,
    {
        let mut state = self.state.lock();
        let id = SubscriberId(state.next_subscriber);
        state.next_subscriber += 1;
        state.subscribers.push((id, Arc::new(callback)));

        Subscription {
            id,
            logger: Arc::downgrade(self),
        }
    }

    /// Atomically snapshot the buffer and subscribe.
    ///
    /// No entry can be appended between the snapshot and the registration,
    /// so a mirror built from both never misses or duplicates an entry.
    pub fn subscribe_with_snapshot<F>(
        self: &Arc<Self>,
        callback: F,
    ) -> (Vec<QueryLogEntry>, Subscription)
    where
        F: Fn(&QueryLogEntry) + Send + Sync + 'static,
    {
        let _delivery = self.delivery.lock();
        let snapshot = self.get_all();
        let subscription = self.subscribe(callback);
        (snapshot, subscription)
    }

    /// Subscribe through a broadcast channel.
    ///
    /// If the receiver falls behind, older entries are dropped for it.
    pub fn subscribe_channel(&self) -> broadcast::Receiver<QueryLogEntry> {
        self.broadcast_tx.subscribe()
    }

    fn unsubscribe(&self, id: SubscriberId) {
        let mut state = self.state.lock();
        state.subscribers.retain(|(sid, _)| *sid != id);
    }

    /// Number of registered callback subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.state.lock().subscribers.len()
    }

    /// Snapshot of the buffer, most recent first.
    pub fn get_all(&self) -> Vec<QueryLogEntry> {
        self.state.lock().entries.iter().cloned().collect()
    }

    /// Number of retained entries.
    pub fn len(&self) -> usize {
        self.state.lock().entries.len()
    }

    /// Whether the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.state.lock().entries.is_empty()
    }

    /// Drop every entry. Subscriptions are kept.
    pub fn clear(&self) {
        let _delivery = self.delivery.lock();
        self.state.lock().entries.clear();
        tracing::debug!("query log cleared");
    }

    /// Aggregate numbers over the retained entries.
    pub fn stats(&self) -> QueryLogStats {
        let state = self.state.lock();
        let total = state.entries.len();

        let mut by_operation = BTreeMap::new();
        let mut duration_sum = 0.0;
        for entry in &state.entries {
            *by_operation.entry(entry.operation).or_insert(0) += 1;
            duration_sum += entry.duration_ms;
        }

        QueryLogStats {
            total,
            by_operation,
            mean_duration_ms: if total == 0 {
                0.0
            } else {
                round_ms(duration_sum / total as f64)
            },
            failed_deliveries: self.failed_deliveries.load(AtomicOrdering::Relaxed),
        }
    }
}

/// Handle for a callback registered with [`QueryLogger::subscribe`].
///
/// Dropping the handle deregisters the callback.
#[must_use = "dropping a Subscription immediately unsubscribes it"]
pub struct Subscription {
    id: SubscriberId,
    logger: Weak<QueryLogger>,
}

impl Subscription {
    /// Stop delivery to this subscriber.
    pub fn unsubscribe(self) {
        // Drop does the work
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(logger) = self.logger.upgrade() {
            logger.unsubscribe(self.id);
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id.0).finish()
    }
}

fn round_ms(ms: f64) -> f64 {
    (ms * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    fn fixed_logger(capacity: usize) -> Arc<QueryLogger> {
        QueryLogger::new(
            QueryLogConfig::default()
                .with_capacity(capacity)
                .with_duration(DurationModel::Fixed(2.0)),
        )
    }

    #[test]
    fn test_append_puts_newest_first() {
        let logger = QueryLogger::with_defaults();

        logger.append(Operation::Select, "SELECT 1", vec![]);
        logger.append(Operation::Insert, "INSERT 2", vec![Value::from(2)]);

        let all = logger.get_all();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].sql, "INSERT 2");
        assert_eq!(all[1].sql, "SELECT 1");
        assert!(all[0].timestamp >= all[1].timestamp);
    }

    #[test]
    fn test_buffer_is_bounded() {
        let logger = QueryLogger::with_defaults();
        for i in 0..150 {
            logger.append(Operation::Select, format!("q{}", i), vec![]);
        }

        let all = logger.get_all();
        assert_eq!(all.len(), DEFAULT_CAPACITY);
        assert_eq!(all[0].sql, "q149");
        assert_eq!(all[99].sql, "q50");
    }

    #[test]
    fn test_fifo_eviction_order() {
        let logger = QueryLogger::with_defaults();
        for i in 1..=105 {
            logger.append(Operation::Select, format!("E{}", i), vec![]);
        }

        let sqls: Vec<String> = logger.get_all().into_iter().map(|e| e.sql).collect();
        let expected: Vec<String> = (6..=105).rev().map(|i| format!("E{}", i)).collect();
        assert_eq!(sqls, expected);
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        let logger = fixed_logger(0);
        assert_eq!(logger.capacity(), 1);

        logger.append(Operation::Select, "a", vec![]);
        logger.append(Operation::Select, "b", vec![]);
        assert_eq!(logger.get_all().len(), 1);
        assert_eq!(logger.get_all()[0].sql, "b");
    }

    #[test]
    fn test_get_all_is_a_copy() {
        let logger = QueryLogger::with_defaults();
        logger.append(Operation::Select, "SELECT 1", vec![]);

        let mut snapshot = logger.get_all();
        snapshot.clear();

        assert_eq!(logger.len(), 1);
    }

    #[test]
    fn test_fan_out_to_all_subscribers() {
        let logger = QueryLogger::with_defaults();
        let seen: Arc<Mutex<Vec<QueryLogEntry>>> = Arc::new(Mutex::new(Vec::new()));

        let subs: Vec<Subscription> = (0..3)
            .map(|_| {
                let seen = seen.clone();
                logger.subscribe(move |entry| seen.lock().push(entry.clone()))
            })
            .collect();

        let entry = logger.append(Operation::Update, "UPDATE x SET a = ?", vec![Value::from(1)]);

        let seen = seen.lock();
        assert_eq!(seen.len(), 3);
        for received in seen.iter() {
            assert_eq!(received.id, entry.id);
            assert_eq!(received.sql, entry.sql);
            assert_eq!(received.params, entry.params);
            assert_eq!(received.operation, entry.operation);
        }
        drop(subs);
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let logger = QueryLogger::with_defaults();
        let count = Arc::new(AtomicUsize::new(0));

        let counter = count.clone();
        let sub = logger.subscribe(move |_| {
            counter.fetch_add(1, AtomicOrdering::SeqCst);
        });

        logger.append(Operation::Select, "SELECT 1", vec![]);
        sub.unsubscribe();
        logger.append(Operation::Select, "SELECT 2", vec![]);

        assert_eq!(count.load(AtomicOrdering::SeqCst), 1);
        assert_eq!(logger.subscriber_count(), 0);
    }

    #[test]
    fn test_panicking_subscriber_is_isolated() {
        let logger = QueryLogger::with_defaults();
        let count = Arc::new(AtomicUsize::new(0));

        let _bad = logger.subscribe(|_| panic!("subscriber failure"));
        let counter = count.clone();
        let _good = logger.subscribe(move |_| {
            counter.fetch_add(1, AtomicOrdering::SeqCst);
        });

        logger.append(Operation::Select, "SELECT 1", vec![]);
        logger.append(Operation::Select, "SELECT 2", vec![]);

        assert_eq!(count.load(AtomicOrdering::SeqCst), 2);
        assert_eq!(logger.len(), 2);
        assert_eq!(logger.stats().failed_deliveries, 2);
    }

    #[test]
    fn test_clear_keeps_subscriptions() {
        let logger = QueryLogger::with_defaults();
        let count = Arc::new(AtomicUsize::new(0));
        let counter = count.clone();
        let _sub = logger.subscribe(move |_| {
            counter.fetch_add(1, AtomicOrdering::SeqCst);
        });

        logger.append(Operation::Select, "SELECT 1", vec![]);
        logger.clear();
        assert!(logger.get_all().is_empty());

        logger.append(Operation::Select, "SELECT 2", vec![]);
        assert_eq!(logger.len(), 1);
        assert_eq!(count.load(AtomicOrdering::SeqCst), 2);
    }

    #[test]
    fn test_append_batch_preserves_order_and_classifies() {
        let logger = fixed_logger(10);
        logger.append(Operation::Select, "before", vec![]);

        let entries = logger.append_batch(vec![
            QueryDescription::new("SELECT * FROM students WHERE id = ?")
                .with_params(vec![Value::from(1)]),
            QueryDescription::new("UPDATE students SET email = ? WHERE id = ?"),
            QueryDescription::new("vacuum").with_operation(Operation::Delete),
        ]);

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].operation, Operation::Select);
        assert_eq!(entries[1].operation, Operation::Update);
        assert_eq!(entries[2].operation, Operation::Delete);
        assert_eq!(entries[0].timestamp, entries[2].timestamp);

        let sqls: Vec<String> = logger.get_all().into_iter().map(|e| e.sql).collect();
        assert_eq!(
            sqls,
            vec![
                "vacuum",
                "UPDATE students SET email = ? WHERE id = ?",
                "SELECT * FROM students WHERE id = ?",
                "before",
            ]
        );
    }

    #[test]
    fn test_append_batch_keeps_measured_duration() {
        let logger = fixed_logger(10);
        let entries = logger.append_batch(vec![
            QueryDescription::new("SELECT 1").with_duration_ms(0.123),
            QueryDescription::new("SELECT 2"),
        ]);
        assert_eq!(entries[0].duration_ms, 0.12);
        assert_eq!(entries[1].duration_ms, 2.0);
    }

    #[test]
    fn test_batch_notifies_once_per_entry() {
        let logger = QueryLogger::with_defaults();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let _sub = logger.subscribe(move |entry| sink.lock().push(entry.sql.clone()));

        logger.append_batch(vec![
            QueryDescription::new("SELECT a"),
            QueryDescription::new("SELECT b"),
        ]);

        assert_eq!(*seen.lock(), vec!["SELECT a".to_string(), "SELECT b".to_string()]);
    }

    #[test]
    fn test_append_measured_uses_elapsed_time() {
        let logger = QueryLogger::with_defaults();
        let entry = logger.append_measured(
            Operation::Select,
            "SELECT 1",
            vec![],
            Duration::from_micros(4_567),
        );
        assert_eq!(entry.duration_ms, 4.57);
    }

    #[test]
    fn test_simulated_duration_in_range() {
        let model = DurationModel::default();
        for _ in 0..100 {
            let ms = model.sample();
            assert!((1.0..=11.0).contains(&ms), "duration {} out of range", ms);
        }
    }

    #[test]
    fn test_subscriber_may_read_the_logger() {
        let logger = QueryLogger::with_defaults();
        let observed_len = Arc::new(AtomicUsize::new(0));

        let weak = Arc::downgrade(&logger);
        let len = observed_len.clone();
        let _sub = logger.subscribe(move |_| {
            if let Some(logger) = weak.upgrade() {
                len.store(logger.len(), AtomicOrdering::SeqCst);
            }
        });

        logger.append(Operation::Select, "SELECT 1", vec![]);
        assert_eq!(observed_len.load(AtomicOrdering::SeqCst), 1);
    }

    #[test]
    fn test_append_from_subscriber_keeps_delivery_order() {
        let logger = fixed_logger(10);
        let seen_by_second: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));

        let weak = Arc::downgrade(&logger);
        let _first = logger.subscribe(move |entry| {
            if entry.sql == "SELECT 1" {
                if let Some(logger) = weak.upgrade() {
                    logger.append(Operation::Insert, "INSERT 2", vec![]);
                }
            }
        });
        let seen = seen_by_second.clone();
        let _second = logger.subscribe(move |entry| seen.lock().push(entry.sql.clone()));

        let mut rx = logger.subscribe_channel();
        logger.append(Operation::Select, "SELECT 1", vec![]);

        assert_eq!(*seen_by_second.lock(), vec!["SELECT 1", "INSERT 2"]);
        assert_eq!(rx.try_recv().unwrap().sql, "SELECT 1");
        assert_eq!(rx.try_recv().unwrap().sql, "INSERT 2");

        let buffered: Vec<String> = logger.get_all().into_iter().map(|e| e.sql).collect();
        assert_eq!(buffered, vec!["INSERT 2", "SELECT 1"]);
    }

    #[test]
    fn test_subscribe_with_snapshot() {
        let logger = QueryLogger::with_defaults();
        logger.append(Operation::Select, "old", vec![]);

        let (snapshot, _sub) = logger.subscribe_with_snapshot(|_| {});
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].sql, "old");
    }

    #[tokio::test]
    async fn test_subscribe_channel() {
        let logger = QueryLogger::with_defaults();
        let mut rx = logger.subscribe_channel();

        logger.append(Operation::Delete, "DELETE FROM x WHERE id = ?", vec![Value::from(9)]);

        let received = rx.recv().await.expect("Should receive entry");
        assert_eq!(received.operation, Operation::Delete);
        assert_eq!(received.params, vec![Value::from(9)]);
    }

    #[test]
    fn test_stats() {
        let logger = fixed_logger(10);
        logger.append(Operation::Select, "SELECT 1", vec![]);
        logger.append(Operation::Select, "SELECT 2", vec![]);
        logger.append(Operation::Insert, "INSERT 3", vec![]);

        let stats = logger.stats();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.by_operation.get(&Operation::Select), Some(&2));
        assert_eq!(stats.by_operation.get(&Operation::Insert), Some(&1));
        assert_eq!(stats.mean_duration_ms, 2.0);
    }

    #[test]
    fn test_concurrent_appends_stay_bounded() {
        let logger = QueryLogger::new(QueryLogConfig::default().with_capacity(50));
        let count = Arc::new(AtomicUsize::new(0));
        let counter = count.clone();
        let _sub = logger.subscribe(move |_| {
            counter.fetch_add(1, AtomicOrdering::SeqCst);
        });

        let handles: Vec<_> = (0..4)
            .map(|t| {
                let logger = logger.clone();
                std::thread::spawn(move || {
                    for i in 0..100 {
                        logger.append(Operation::Insert, format!("t{}-{}", t, i), vec![]);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(logger.len(), 50);
        assert_eq!(count.load(AtomicOrdering::SeqCst), 400);

        let all = logger.get_all();
        for pair in all.windows(2) {
            assert!(pair[0].timestamp >= pair[1].timestamp);
        }
    }
}
