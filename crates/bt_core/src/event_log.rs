//! Append-only event log with targeted undo.
//!
//! Ordering is insertion order and is the play-by-play chronology; removal
//! (undo) never reorders the remaining entries.

use serde::{Deserialize, Serialize};

use crate::models::TagEvent;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventLog {
    events: Vec<TagEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event. The caller is responsible for the recording
    /// preconditions (selection + context gate); appending itself never fails.
    pub fn push(&mut self, event: TagEvent) -> &TagEvent {
        log::debug!("log: {} {} by {}", event.play, event.result, event.player);
        self.events.push(event);
        self.events.last().expect("push just appended an event")
    }

    /// Remove and return the most recent event. `None` on an empty log.
    pub fn undo_last(&mut self) -> Option<TagEvent> {
        self.events.pop()
    }

    /// Remove and return the most recent event tagged for `player`. This is
    /// a reverse-chronological scan, not a pop: earlier entries by other
    /// players are untouched. `None` when the player has no events.
    pub fn undo_last_for(&mut self, player: &str) -> Option<TagEvent> {
        let idx = self.events.iter().rposition(|e| e.player == player)?;
        Some(self.events.remove(idx))
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn events(&self) -> &[TagEvent] {
        &self.events
    }

    /// Events for one player, in log order. Cloned snapshot so metrics can
    /// be computed over a filtered view independently of the live log.
    pub fn events_for_player(&self, player: &str) -> Vec<TagEvent> {
        self.events.iter().filter(|e| e.player == player).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
