//! Conversation session state.
//!
//! `ConversationSession` holds the busy flag and the exchange counter;
//! `Transcript` holds the ordered list of rendered turns. Both are touched
//! from the single event-processing task, so the atomics and the mutex are
//! there for `Send + Sync`, not for contention.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use typetalk_types::turn::{Turn, TurnId, TurnRole};

/// Busy flag and exchange counter for one conversation.
#[derive(Debug, Default)]
pub struct ConversationSession {
    busy: AtomicBool,
    /// Incremented on each successful user+bot exchange.
    turn_count: AtomicU32,
}

impl ConversationSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a request is currently in flight.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Claim the busy flag. Returns `None` if it is already held.
    ///
    /// The flag is released when the returned guard is dropped, including
    /// when the owning future is dropped mid-request.
    pub fn try_begin(&self) -> Option<BusyGuard<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| BusyGuard { session: self })
    }

    /// Number of successful exchanges since the last reset.
    pub fn turn_count(&self) -> u32 {
        self.turn_count.load(Ordering::Acquire)
    }

    pub fn increment_turn(&self) {
        self.turn_count.fetch_add(1, Ordering::AcqRel);
    }

    pub fn reset_turns(&self) {
        self.turn_count.store(0, Ordering::Release);
    }
}

/// Holds the session's busy flag until dropped.
#[derive(Debug)]
pub struct BusyGuard<'a> {
    session: &'a ConversationSession,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.session.busy.store(false, Ordering::Release);
    }
}

/// Ordered list of turns currently on screen.
#[derive(Debug, Default)]
pub struct Transcript {
    turns: Mutex<Vec<Turn>>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Turn>> {
        self.turns.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn push(&self, turn: Turn) {
        self.lock().push(turn);
    }

    /// Remove a turn by id. Returns the removed turn, if it was present.
    pub fn remove(&self, id: TurnId) -> Option<Turn> {
        let mut turns = self.lock();
        let index = turns.iter().position(|t| t.id == id)?;
        Some(turns.remove(index))
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Number of pending placeholders. Never more than one.
    pub fn pending_count(&self) -> usize {
        self.lock().iter().filter(|t| t.pending).count()
    }

    /// Copy of the current turns, oldest first.
    pub fn snapshot(&self) -> Vec<Turn> {
        self.lock().clone()
    }

    /// Most recent resolved bot turn.
    pub fn last_bot_turn(&self) -> Option<Turn> {
        self.lock()
            .iter()
            .rev()
            .find(|t| t.role == TurnRole::Bot && !t.pending)
            .cloned()
    }
}
