//! Monotone Zeitquelle in Millisekunden.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Liefert monotone Zeitstempel in ms (Nullpunkt frei wählbar).
pub trait Clock: Send + Sync {
    /// Aktueller Zeitstempel in ms
    fn now_ms(&self) -> u64;
}

/// Produktiv-Uhr auf Basis von `Instant`, Nullpunkt beim Erzeugen.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    /// Erstellt eine Uhr mit Nullpunkt „jetzt“.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_ms(&self) -> u64 {
        u64::try_from(self.origin.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}

/// Manuell gestellte Uhr für deterministische Tests.
///
/// Klone teilen sich denselben Zeitstand.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Arc<AtomicU64>,
}

impl ManualClock {
    /// Erstellt eine Uhr auf dem gegebenen Zeitstand.
    pub fn new(start_ms: u64) -> Self {
        Self {
            now: Arc::new(AtomicU64::new(start_ms)),
        }
    }

    /// Setzt die Uhr auf einen absoluten Zeitstand.
    pub fn set(&self, now_ms: u64) {
        self.now.store(now_ms, Ordering::SeqCst);
    }

    /// Stellt die Uhr um `delta_ms` vor.
    pub fn advance(&self, delta_ms: u64) {
        self.now.fetch_add(delta_ms, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.load(Ordering::SeqCst)
    }
}
