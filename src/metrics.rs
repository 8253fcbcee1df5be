//! Resolution metrics and observability.
//!
//! Counts how page requests were resolved (direct hit, cross-locale redirect,
//! not found) and how client loads ended (ready, unavailable, stale).

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::OnceLock;

/// Resolution counters.
#[derive(Debug, Default)]
pub struct ResolutionMetrics {
    /// Slug found directly in the requested locale
    direct_hits: AtomicUsize,

    /// Slug found only in another locale and redirected
    redirects: AtomicUsize,

    /// Slug found in no locale
    not_found: AtomicUsize,

    /// Client loads that reached `ready`
    modules_ready: AtomicUsize,

    /// Client loads that reached `not-found`
    modules_unavailable: AtomicUsize,

    /// Load results discarded because a newer request superseded them
    stale_loads: AtomicUsize,
}

static METRICS: OnceLock<ResolutionMetrics> = OnceLock::new();

impl ResolutionMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the process-wide metrics instance.
    pub fn global() -> &'static ResolutionMetrics {
        METRICS.get_or_init(ResolutionMetrics::new)
    }

    pub fn record_direct_hit(&self) {
        self.direct_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_redirect(&self) {
        self.redirects.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_not_found(&self) {
        self.not_found.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_module_ready(&self) {
        self.modules_ready.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_module_unavailable(&self) {
        self.modules_unavailable.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_stale_load(&self) {
        self.stale_loads.fetch_add(1, Ordering::Relaxed);
    }

    /// Generate a metrics report.
    pub fn report(&self) -> MetricsReport {
        let direct_hits = self.direct_hits.load(Ordering::Relaxed);
        let redirects = self.redirects.load(Ordering::Relaxed);
        let not_found = self.not_found.load(Ordering::Relaxed);
        let total = direct_hits + redirects + not_found;
        let redirect_rate = if total > 0 {
            (redirects as f64 / total as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            direct_hits,
            redirects,
            not_found,
            redirect_rate,
            modules_ready: self.modules_ready.load(Ordering::Relaxed),
            modules_unavailable: self.modules_unavailable.load(Ordering::Relaxed),
            stale_loads: self.stale_loads.load(Ordering::Relaxed),
        }
    }
}

/// Snapshot of the resolution counters.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
    pub direct_hits: usize,
    pub redirects: usize,
    pub not_found: usize,

    /// Redirects as a percentage (0-100) of all page resolutions
    pub redirect_rate: f64,

    pub modules_ready: usize,
    pub modules_unavailable: usize,
    pub stale_loads: usize,
}
