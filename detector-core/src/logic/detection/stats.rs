//! Inference counters

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Lock-free counters updated on every classifier batch.
#[derive(Debug, Default)]
pub struct InferenceStats {
    batches: AtomicU64,
    rows: AtomicU64,
    latency_us: AtomicU64,
}

/// Point-in-time copy of [`InferenceStats`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub batches: u64,
    pub rows: u64,
    pub avg_latency_ms: f32,
}

impl InferenceStats {
    pub fn record(&self, rows: usize, elapsed: Duration) {
        self.batches.fetch_add(1, Ordering::Relaxed);
        self.rows.fetch_add(rows as u64, Ordering::Relaxed);
        self.latency_us.fetch_add(elapsed.as_micros() as u64, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        let batches = self.batches.load(Ordering::Relaxed);
        let sum = self.latency_us.load(Ordering::Relaxed);
        let avg = if batches > 0 { (sum as f32 / batches as f32) / 1000.0 } else { 0.0 };

        StatsSnapshot {
            batches,
            rows: self.rows.load(Ordering::Relaxed),
            avg_latency_ms: avg,
        }
    }
}
