// src/profiler/mod.rs

//! Wall-clock profiling for selected operations.
//!
//! An explicit wrapping call replaces runtime interception: the caller hands
//! [`Profiler::time`] a future and gets its output back untouched, while the
//! elapsed time is recorded against the operation name.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::future::Future;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};

/// Accumulated timing for one profiled operation.
#[derive(Debug, Clone, Copy, Default)]
struct OpRecord {
    calls: u64,
    total: Duration,
}

/// Records how long profiled operations take.
#[derive(Debug)]
pub struct Profiler {
    started_at: DateTime<Utc>,
    records: Mutex<BTreeMap<String, OpRecord>>,
}

impl Default for Profiler {
    fn default() -> Self {
        Self::new()
    }
}

impl Profiler {
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            records: Mutex::new(BTreeMap::new()),
        }
    }

    /// Run `fut`, recording its wall-clock duration under `op`.
    ///
    /// Transparent to the wrapped operation: the output (success or failure
    /// value alike) is returned unchanged, and the duration is recorded
    /// either way.
    pub async fn time<T>(&self, op: &str, fut: impl Future<Output = T>) -> T {
        let start = Instant::now();
        let out = fut.await;
        self.record(op, start.elapsed());
        out
    }

    fn record(&self, op: &str, elapsed: Duration) {
        let mut records = self.records.lock().expect("profiler lock poisoned");
        let record = records.entry(op.to_string()).or_default();
        record.calls += 1;
        record.total += elapsed;
    }

    /// Render the profile report.
    pub fn report(&self) -> String {
        let records = self.records.lock().expect("profiler lock poisoned");
        let mut out = format!(
            "Run at {}\n",
            self.started_at.format("%Y-%m-%d %H:%M:%S%.3f UTC")
        );
        for (op, record) in records.iter() {
            let _ = writeln!(
                out,
                "  {} took {:?} across {} call(s)",
                op, record.total, record.calls
            );
        }
        out
    }
}
