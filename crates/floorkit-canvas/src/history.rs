//! Debounced undo/redo history of view snapshots.
//!
//! Continuous interactions (drags, wheel bursts) call
//! [`History::record`] once per input event; the debounce collapses a
//! burst into a single pending entry that materializes after a quiet
//! period. On fire, the entry snapshots the *current* selection and
//! transform - object content changes live in the host-owned floor
//! plan, so undo/redo here restores view and selection context, not
//! document content.
//!
//! # Invariants
//!
//! 1. `index` stays in `[-1, len - 1]`.
//! 2. `len` never exceeds the configured cap; older entries are trimmed
//!    from the front.
//! 3. Entries beyond `index` remain redo-reachable until a newly
//!    committed entry truncates them.
//! 4. `undo` at `index <= 0` and `redo` at `index >= len - 1` are
//!    no-ops.
//!
//! The debounce clock is an injected [`Instant`]: the owner drives it
//! from its event loop (and from tests) instead of the history owning a
//! timer. [`History::dispose`] drops any pending entry unconditionally
//! so nothing fires after teardown.

use std::collections::BTreeSet;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use floorkit_core::constants;

use crate::model::ObjectId;
use crate::transform::CanvasTransform;

/// What a history entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryAction {
    ViewChanged,
    SelectionChanged,
    ObjectsMoved,
    ObjectsDeleted,
    ObjectsDuplicated,
    TableAdded,
    TableUpdated,
}

/// The view context captured around an action: selection plus camera
/// transform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewSnapshot {
    pub selected: BTreeSet<ObjectId>,
    pub transform: CanvasTransform,
}

/// One undo/redo log entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: Uuid,
    pub action: HistoryAction,
    pub timestamp: DateTime<Utc>,
    pub before: ViewSnapshot,
    pub after: ViewSnapshot,
    pub description: String,
}

#[derive(Debug, Clone)]
struct PendingRecord {
    action: HistoryAction,
    description: String,
    deadline: Instant,
}

/// Debounced undo/redo log.
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<HistoryEntry>,
    index: isize,
    max_entries: usize,
    debounce: Duration,
    pending: Option<PendingRecord>,
}

impl History {
    /// Creates an empty history with the given cap and debounce window.
    pub fn new(max_entries: usize, debounce: Duration) -> Self {
        Self {
            entries: Vec::new(),
            index: -1,
            max_entries,
            debounce,
            pending: None,
        }
    }

    /// Number of committed entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no entry has been committed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Current position in the log, `-1` before the first entry.
    pub fn index(&self) -> isize {
        self.index
    }

    /// The committed entries, oldest first.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Whether a debounced record is waiting to fire.
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Whether undo would restore anything.
    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    /// Whether redo would restore anything.
    pub fn can_redo(&self) -> bool {
        self.index < self.entries.len() as isize - 1
    }

    /// Schedules a history entry. Repeated calls within the debounce
    /// window replace the pending record, so a continuous drag yields
    /// one entry rather than one per pointer-move event.
    pub fn record(&mut self, action: HistoryAction, description: impl Into<String>, now: Instant) {
        self.pending = Some(PendingRecord {
            action,
            description: description.into(),
            deadline: now + self.debounce,
        });
    }

    /// Commits the pending record if its quiet period has elapsed.
    /// Returns whether an entry was committed.
    pub fn flush_due(&mut self, now: Instant, snapshot: &ViewSnapshot, wall: DateTime<Utc>) -> bool {
        let due = self.pending.as_ref().is_some_and(|p| now >= p.deadline);
        if due {
            self.flush_now(snapshot, wall)
        } else {
            false
        }
    }

    /// Commits the pending record immediately, ignoring the deadline.
    /// Returns whether an entry was committed.
    pub fn flush_now(&mut self, snapshot: &ViewSnapshot, wall: DateTime<Utc>) -> bool {
        let Some(pending) = self.pending.take() else {
            return false;
        };
        self.commit(pending.action, pending.description, snapshot, wall);
        true
    }

    /// Drops any pending record. Called on teardown so a scheduled
    /// entry cannot fire after the session is gone.
    pub fn dispose(&mut self) {
        self.pending = None;
    }

    fn commit(
        &mut self,
        action: HistoryAction,
        description: String,
        snapshot: &ViewSnapshot,
        wall: DateTime<Utc>,
    ) {
        // Discard the redo tail before appending.
        let keep = (self.index + 1).max(0) as usize;
        self.entries.truncate(keep);

        self.entries.push(HistoryEntry {
            id: Uuid::new_v4(),
            action,
            timestamp: wall,
            before: snapshot.clone(),
            after: snapshot.clone(),
            description,
        });

        if self.entries.len() > self.max_entries {
            let overflow = self.entries.len() - self.max_entries;
            self.entries.drain(0..overflow);
        }
        self.index = self.entries.len() as isize - 1;

        tracing::trace!(
            entries = self.entries.len(),
            index = self.index,
            "history entry committed"
        );
    }

    /// Steps back one entry and returns the view to restore. `None` at
    /// the boundary.
    pub fn undo(&mut self) -> Option<&ViewSnapshot> {
        if self.index <= 0 {
            return None;
        }
        self.index -= 1;
        Some(&self.entries[self.index as usize].before)
    }

    /// Steps forward one entry and returns the view to restore. `None`
    /// at the boundary.
    pub fn redo(&mut self) -> Option<&ViewSnapshot> {
        if self.index >= self.entries.len() as isize - 1 {
            return None;
        }
        self.index += 1;
        Some(&self.entries[self.index as usize].after)
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(
            constants::MAX_HISTORY_ENTRIES,
            Duration::from_millis(constants::HISTORY_DEBOUNCE_MS),
        )
    }
}
