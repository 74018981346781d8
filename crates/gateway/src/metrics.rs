use parking_lot::RwLock;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Call and failure counters per GraphQL operation.
#[derive(Clone, Default)]
pub struct OperationMetrics {
    inner: Arc<OperationMetricsInner>,
}

#[derive(Default)]
struct OperationMetricsInner {
    total_calls: AtomicU64,
    total_failures: AtomicU64,
    per_operation: RwLock<BTreeMap<String, OperationCounts>>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OperationCounts {
    pub calls: u64,
    pub failures: u64,
}

impl OperationMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one finished call of `operation`.
    pub fn record(&self, operation: &str, succeeded: bool) {
        self.inner.total_calls.fetch_add(1, Ordering::Relaxed);
        if !succeeded {
            self.inner.total_failures.fetch_add(1, Ordering::Relaxed);
        }

        let mut per_operation = self.inner.per_operation.write();
        let counts = per_operation.entry(operation.to_string()).or_default();
        counts.calls += 1;
        if !succeeded {
            counts.failures += 1;
        }

        tracing::debug!(operation, succeeded, calls = counts.calls, "Operation recorded");
    }

    pub fn total_calls(&self) -> u64 {
        self.inner.total_calls.load(Ordering::Relaxed)
    }

    pub fn total_failures(&self) -> u64 {
        self.inner.total_failures.load(Ordering::Relaxed)
    }

    /// Counts keyed by operation name, sorted.
    pub fn by_operation(&self) -> BTreeMap<String, OperationCounts> {
        self.inner.per_operation.read().clone()
    }
}
