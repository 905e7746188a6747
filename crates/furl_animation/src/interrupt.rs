//! Cooperative interruption of running animations
//!
//! Every animation loop takes a [`Ticket`] when it starts and checks it once
//! per frame. Calling [`InterruptHandle::interrupt`] stale-dates every ticket
//! issued so far, so each running loop stops on its next frame while later
//! animations are unaffected.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Shared interruption counter. Clones refer to the same counter.
#[derive(Clone, Debug, Default)]
pub struct InterruptHandle {
    generation: Arc<AtomicU64>,
}

impl InterruptHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a ticket valid until the next interrupt
    pub fn ticket(&self) -> Ticket {
        Ticket {
            generation: Arc::clone(&self.generation),
            issued: self.generation.load(Ordering::Acquire),
        }
    }

    /// Stop every animation holding a ticket issued before this call
    pub fn interrupt(&self) {
        let previous = self.generation.fetch_add(1, Ordering::AcqRel);
        tracing::debug!("animations interrupted (generation {})", previous + 1);
    }
}

/// Permission for one animation run to keep going
#[derive(Clone, Debug)]
pub struct Ticket {
    generation: Arc<AtomicU64>,
    issued: u64,
}

impl Ticket {
    pub fn is_stale(&self) -> bool {
        self.generation.load(Ordering::Acquire) != self.issued
    }
}
