//! View Lifetime Guard
//!
//! Requests in flight are never aborted, so a response can land after
//! its view unmounted. Each view owns one guard; async completions
//! consult it before touching view state, and stale completions are
//! dropped instead of writing to disposed signals.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use leptos::prelude::on_cleanup;

/// Cancellation token tied to the owning view's lifetime
#[derive(Clone)]
pub struct ViewGuard(Arc<AtomicBool>);

impl ViewGuard {
    /// Create a guard bound to the current reactive owner. Flips to
    /// inactive when the owner is cleaned up.
    pub fn new() -> Self {
        let guard = ViewGuard(Arc::new(AtomicBool::new(true)));
        let flag = Arc::clone(&guard.0);
        on_cleanup(move || flag.store(false, Ordering::Relaxed));
        guard
    }

    /// Whether the owning view is still mounted
    pub fn active(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}
