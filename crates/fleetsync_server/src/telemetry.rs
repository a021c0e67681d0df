//! Exchange telemetry.

use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Sink for per-exchange timing measurements.
///
/// Recording is fire-and-forget: implementations must not block or fail on
/// the exchange path.
pub trait TelemetrySink: Send + Sync {
    /// Records the wall-clock duration of one exchange's processing step.
    fn record_sync_time(&self, elapsed: Duration);
}

/// In-process telemetry counters for sync exchanges.
#[derive(Debug, Default)]
pub struct ExchangeTelemetry {
    exchanges: AtomicU64,
    total_micros: AtomicU64,
    last: RwLock<Option<Duration>>,
}

impl ExchangeTelemetry {
    /// Creates zeroed counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of exchanges recorded so far.
    pub fn exchanges(&self) -> u64 {
        self.exchanges.load(Ordering::Relaxed)
    }

    /// Total processing time across all recorded exchanges.
    pub fn total_sync_time(&self) -> Duration {
        Duration::from_micros(self.total_micros.load(Ordering::Relaxed))
    }

    /// Processing time of the most recent exchange.
    pub fn last_sync_time(&self) -> Option<Duration> {
        *self.last.read()
    }
}

impl TelemetrySink for ExchangeTelemetry {
    fn record_sync_time(&self, elapsed: Duration) {
        self.exchanges.fetch_add(1, Ordering::Relaxed);
        self.total_micros
            .fetch_add(elapsed.as_micros() as u64, Ordering::Relaxed);
        *self.last.write() = Some(elapsed);
    }
}
