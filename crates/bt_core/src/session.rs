//! Tagging session: one owned state object tying the stores together.
//!
//! The presentation layer drives this through explicit commands
//! (`select_player`, `tag`, `undo_last`, ...) with documented preconditions,
//! so the whole flow is testable without any rendering code. There are no
//! globals; the caller owns the session.

use crate::error::SessionError;
use crate::event_log::EventLog;
use crate::models::{GameContext, PhotoSource, TagEvent, TagResult};
use crate::playbook::Playbook;
use crate::roster::{AddOutcome, Roster};
use crate::selection::SelectionState;

#[derive(Debug, Default)]
pub struct TagSession {
    pub roster: Roster,
    pub playbook: Playbook,
    pub context: GameContext,
    selection: SelectionState,
    log: EventLog,
    /// When set, `tag` requires opponent/date/quarter to be filled in.
    /// Configurable because tagging without a full game setup is a valid
    /// scrimmage workflow.
    require_context: bool,
}

impl TagSession {
    /// New session with the context gate enabled.
    pub fn new() -> Self {
        Self { require_context: true, ..Default::default() }
    }

    /// New session that allows tagging before the game setup is complete.
    pub fn without_context_gate() -> Self {
        Self { require_context: false, ..Default::default() }
    }

    pub fn set_require_context(&mut self, require: bool) {
        self.require_context = require;
    }

    pub fn require_context(&self) -> bool {
        self.require_context
    }

    // ========================
    // Roster / playbook commands
    // ========================

    pub fn add_player(&mut self, name: &str, photo: Option<PhotoSource>) -> AddOutcome {
        self.roster.add(name, photo)
    }

    pub fn add_play(&mut self, name: &str) -> AddOutcome {
        self.playbook.add(name)
    }

    /// Remove a player; a selection pointing at them is dropped so the
    /// session never tags for a player who left the roster.
    pub fn remove_player(&mut self, name: &str) -> bool {
        let removed = self.roster.remove(name).is_some();
        if removed && self.selection.player() == Some(name) {
            self.selection.clear_player();
        }
        removed
    }

    pub fn clear_roster(&mut self) {
        self.roster.clear();
        self.selection.clear_player();
    }

    // ========================
    // Selection commands
    // ========================

    /// Choose the player to tag for. Keeps any prior play selection so the
    /// operator can tag the same play across players back to back.
    pub fn select_player(&mut self, name: &str) -> Result<(), SessionError> {
        if !self.roster.contains(name) {
            return Err(SessionError::UnknownPlayer(name.to_string()));
        }
        self.selection.select_player(name);
        Ok(())
    }

    pub fn select_play(&mut self, name: &str) -> Result<(), SessionError> {
        if !self.playbook.contains(name) {
            return Err(SessionError::UnknownPlay(name.to_string()));
        }
        self.selection.select_play(name);
        Ok(())
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    // ========================
    // Tagging commands
    // ========================

    /// Record an outcome for the current selection.
    ///
    /// Preconditions: a player and a play are selected, and (when the gate
    /// is on) the game context is complete. Violations come back as
    /// non-fatal [`SessionError`]s for the caller to surface.
    pub fn tag(&mut self, result: TagResult) -> Result<&TagEvent, SessionError> {
        let (player, play) = match (self.selection.player(), self.selection.play()) {
            (Some(player), Some(play)) => (player.to_string(), play.to_string()),
            _ => return Err(SessionError::NoSelection),
        };
        if self.require_context && !self.context.is_complete() {
            return Err(SessionError::ContextIncomplete);
        }

        let event = TagEvent::record(&self.context, player, play, result);
        Ok(self.log.push(event))
    }

    /// Undo the most recent tag regardless of player. `None` on an empty log.
    pub fn undo_last(&mut self) -> Option<TagEvent> {
        self.log.undo_last()
    }

    /// Undo the most recent tag for the currently selected player. `None`
    /// when no player is selected or they have no tags.
    pub fn undo_last_for_selected(&mut self) -> Option<TagEvent> {
        let player = self.selection.player()?.to_string();
        self.log.undo_last_for(&player)
    }

    pub fn undo_last_for(&mut self, player: &str) -> Option<TagEvent> {
        self.log.undo_last_for(player)
    }

    /// Clear the log and the selection. Roster, playbook and game context
    /// survive so the next game can be tagged immediately.
    pub fn reset_game(&mut self) {
        log::info!("session: game reset, {} events dropped", self.log.len());
        self.log.clear();
        self.selection.clear();
    }

    // ========================
    // Read access
    // ========================

    pub fn log(&self) -> &EventLog {
        &self.log
    }

    /// Log snapshot narrowed to one player, or the full log when `filter`
    /// is `None`. Used for the filtered per-play metrics view.
    pub fn filtered_events(&self, filter: Option<&str>) -> Vec<TagEvent> {
        match filter {
            Some(player) => self.log.events_for_player(player),
            None => self.log.events().to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Quarter;
    use chrono::NaiveDate;

    fn session_with_game() -> TagSession {
        let mut session = TagSession::new();
        session.context = GameContext::new(
            "Cape Breton",
            NaiveDate::from_ymd_opt(2026, 1, 31).unwrap(),
            Quarter::First,
        );
        session.add_player("Smith", None);
        session.add_player("Jones", None);
        session.add_play("Horns");
        session.add_play("Flex");
        session
    }

    #[test]
    fn test_tag_requires_full_selection() {
        let mut session = session_with_game();
        assert_eq!(session.tag(TagResult::Made2), Err(SessionError::NoSelection));

        session.select_play("Horns").unwrap();
        assert_eq!(session.tag(TagResult::Made2), Err(SessionError::NoSelection));

        session.select_player("Smith").unwrap();
        assert!(session.tag(TagResult::Made2).is_ok());
        assert_eq!(session.log().len(), 1);
    }

    #[test]
    fn test_context_gate_blocks_tagging() {
        let mut session = TagSession::new();
        session.add_player("Smith", None);
        session.add_play("Horns");
        session.select_player("Smith").unwrap();
        session.select_play("Horns").unwrap();

        assert_eq!(session.tag(TagResult::Foul), Err(SessionError::ContextIncomplete));

        session.set_require_context(false);
        assert!(session.tag(TagResult::Foul).is_ok());
    }

    #[test]
    fn test_ungated_session_tags_without_context() {
        let mut session = TagSession::without_context_gate();
        session.add_player("Smith", None);
        session.add_play("Horns");
        session.select_player("Smith").unwrap();
        session.select_play("Horns").unwrap();
        assert!(session.tag(TagResult::Made3).is_ok());
    }

    #[test]
    fn test_selection_rejects_unknown_names() {
        let mut session = session_with_game();
        assert_eq!(
            session.select_player("Nobody"),
            Err(SessionError::UnknownPlayer("Nobody".to_string()))
        );
        assert_eq!(
            session.select_play("Chaos"),
            Err(SessionError::UnknownPlay("Chaos".to_string()))
        );
    }

    #[test]
    fn test_play_survives_player_switch_end_to_end() {
        let mut session = session_with_game();
        session.select_player("Smith").unwrap();
        session.select_play("Flex").unwrap();
        session.select_player("Jones").unwrap();

        let event = session.tag(TagResult::Made2).unwrap();
        assert_eq!(event.player, "Jones");
        assert_eq!(event.play, "Flex");
    }

    #[test]
    fn test_reset_game_clears_log_and_selection() {
        let mut session = session_with_game();
        session.select_player("Smith").unwrap();
        session.select_play("Horns").unwrap();
        session.tag(TagResult::Made3).unwrap();

        session.reset_game();
        assert!(session.log().is_empty());
        assert!(!session.selection().is_ready());
        // Stores survive the reset
        assert_eq!(session.roster.len(), 2);
        assert_eq!(session.playbook.len(), 2);
    }

    #[test]
    fn test_remove_player_drops_dangling_selection() {
        let mut session = session_with_game();
        session.select_player("Smith").unwrap();
        assert!(session.remove_player("Smith"));
        assert_eq!(session.selection().player(), None);
    }

    #[test]
    fn test_clear_roster_drops_player_selection_keeps_play() {
        let mut session = session_with_game();
        session.select_player("Smith").unwrap();
        session.select_play("Horns").unwrap();
        session.clear_roster();
        assert_eq!(session.selection().player(), None);
        assert_eq!(session.selection().play(), Some("Horns"));
    }

    #[test]
    fn test_undo_for_selected_player() {
        let mut session = session_with_game();
        session.select_player("Smith").unwrap();
        session.select_play("Horns").unwrap();
        session.tag(TagResult::Made2).unwrap();
        session.select_player("Jones").unwrap();
        session.tag(TagResult::Missed3).unwrap();

        session.select_player("Smith").unwrap();
        let removed = session.undo_last_for_selected().unwrap();
        assert_eq!(removed.player, "Smith");
        assert_eq!(session.log().len(), 1);
        assert_eq!(session.log().events()[0].player, "Jones");
    }

    #[test]
    fn test_filtered_events() {
        let mut session = session_with_game();
        session.select_player("Smith").unwrap();
        session.select_play("Horns").unwrap();
        session.tag(TagResult::Made2).unwrap();
        session.select_player("Jones").unwrap();
        session.tag(TagResult::Foul).unwrap();

        assert_eq!(session.filtered_events(None).len(), 2);
        assert_eq!(session.filtered_events(Some("Smith")).len(), 1);
        assert_eq!(session.filtered_events(Some("Nobody")).len(), 0);
    }
}
