//! Cancellable delay scheduler.
//!
//! Drives the timed phase transitions of a session.  Each scheduled delay
//! lives in a fixed slot arena; [`DelayScheduler::schedule`] hands back a
//! [`DelayHandle`] made of the slot index plus the slot's generation at
//! the time of scheduling.  Firing or cancelling a delay frees the slot and
//! bumps its generation, so a stale handle can never cancel or observe a
//! later delay that happens to reuse the same slot.
//!
//! ```text
//!   schedule ──▶ [slot 0 | gen 7 | due 15000 | Warn ] ──┐
//!                                                       │ pop_due(now >= due)
//!   cancel(handle{0,7}) ──▶ slot freed, gen 8           ▼
//!                                             Fired { handle, purpose, due_ms }
//! ```
//!
//! The scheduler does not own a clock.  The periodic driver polls
//! [`DelayScheduler::pop_due`] with the current time at the start of each
//! tick, so every callback runs on the same execution context as the
//! tick itself.

use log::{debug, warn};

// ═══════════════════════════════════════════════════════════════
//  Delay types
// ═══════════════════════════════════════════════════════════════

/// What a delay does when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelayPurpose {
    /// Started → Warned.
    Warn,
    /// Warned → Punished.
    Punish,
    /// Clear the final-duration display after the grace period.
    GraceClear,
}

/// Opaque token for one scheduled delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelayHandle {
    slot: usize,
    generation: u32,
}

/// A delay that has come due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fired {
    pub handle: DelayHandle,
    pub purpose: DelayPurpose,
    /// When the delay was due, which may be earlier than the poll.
    pub due_ms: u64,
}

// ═══════════════════════════════════════════════════════════════
//  Scheduler engine
// ═══════════════════════════════════════════════════════════════

/// Maximum number of concurrently live delays (stack-allocated).
const MAX_DELAYS: usize = 4;

#[derive(Debug, Clone, Copy)]
struct DelayEntry {
    purpose: DelayPurpose,
    due_ms: u64,
}

pub struct DelayScheduler {
    slots: [Option<DelayEntry>; MAX_DELAYS],
    generations: [u32; MAX_DELAYS],
}

impl DelayScheduler {
    pub fn new() -> Self {
        Self {
            slots: [None; MAX_DELAYS],
            generations: [0; MAX_DELAYS],
        }
    }

    /// Schedule `purpose` to fire `delay_ms` after `now_ms`.
    /// Returns `None` if every slot is occupied.
    pub fn schedule(
        &mut self,
        now_ms: u64,
        delay_ms: u64,
        purpose: DelayPurpose,
    ) -> Option<DelayHandle> {
        let slot = self.slots.iter().position(Option::is_none)?;
        let due_ms = now_ms.saturating_add(delay_ms);
        self.slots[slot] = Some(DelayEntry { purpose, due_ms });
        debug!(
            "Delays: {:?} scheduled in slot {} (due at {} ms)",
            purpose, slot, due_ms
        );
        Some(DelayHandle {
            slot,
            generation: self.generations[slot],
        })
    }

    /// Cancel a delay.  Returns `true` if it was still live.
    ///
    /// Cancelling a fired or already-cancelled handle is a no-op.
    pub fn cancel(&mut self, handle: DelayHandle) -> bool {
        if !self.is_live(handle) {
            return false;
        }
        if let Some(entry) = self.slots[handle.slot].take() {
            debug!("Delays: {:?} cancelled (slot {})", entry.purpose, handle.slot);
        }
        self.retire(handle.slot);
        true
    }

    /// Whether `handle` still refers to a delay that has not fired or been
    /// cancelled.
    pub fn is_live(&self, handle: DelayHandle) -> bool {
        handle.slot < MAX_DELAYS
            && self.generations[handle.slot] == handle.generation
            && self.slots[handle.slot].is_some()
    }

    /// Remove and return the earliest delay due at or before `now_ms`.
    ///
    /// Call in a loop until it returns `None`.
    pub fn pop_due(&mut self, now_ms: u64) -> Option<Fired> {
        let (slot, entry) = self
            .slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.map(|e| (i, e)))
            .filter(|(_, e)| e.due_ms <= now_ms)
            .min_by_key(|(_, e)| e.due_ms)?;

        let handle = DelayHandle {
            slot,
            generation: self.generations[slot],
        };
        self.slots[slot] = None;
        self.retire(slot);
        debug!("Delays: {:?} fired (slot {})", entry.purpose, slot);
        Some(Fired {
            handle,
            purpose: entry.purpose,
            due_ms: entry.due_ms,
        })
    }

    /// Number of live delays.
    pub fn pending_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    fn retire(&mut self, slot: usize) {
        self.generations[slot] = self.generations[slot].wrapping_add(1);
    }
}

impl Default for DelayScheduler {
    fn default() -> Self {
        Self::new()
    }
}

// ═══════════════════════════════════════════════════════════════
//  Pending transition
// ═══════════════════════════════════════════════════════════════

/// The single outstanding delay owned by the session state machine.
///
/// Every state entry goes through [`replace`](Self::replace), which
/// cancels the previous delay before scheduling the next one.
#[derive(Debug, Default, Clone, Copy)]
pub struct PendingTransition {
    handle: Option<DelayHandle>,
}

impl PendingTransition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel the outstanding delay, if any.
    pub fn cancel(&mut self, delays: &mut DelayScheduler) {
        if let Some(handle) = self.handle.take() {
            delays.cancel(handle);
        }
    }

    /// Cancel the outstanding delay and schedule a new one.
    pub fn replace(
        &mut self,
        delays: &mut DelayScheduler,
        now_ms: u64,
        delay_ms: u64,
        purpose: DelayPurpose,
    ) {
        self.cancel(delays);
        self.handle = delays.schedule(now_ms, delay_ms, purpose);
        if self.handle.is_none() {
            warn!("Delays: no free slot for {:?}, transition dropped", purpose);
        }
    }

    /// Forget the handle once its delay has fired.
    pub fn fired(&mut self, handle: DelayHandle) {
        if self.handle == Some(handle) {
            self.handle = None;
        }
    }

    pub fn handle(&self) -> Option<DelayHandle> {
        self.handle
    }

    pub fn is_pending(&self) -> bool {
        self.handle.is_some()
    }
}

// ═══════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════
