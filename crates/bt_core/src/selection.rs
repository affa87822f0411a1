//! Transient selection state: the chosen player and chosen play that
//! together gate event recording.
//!
//! Selecting a player never clears an existing play selection — the
//! operator can switch players rapidly while tagging the same play.

/// View of the selection machine's current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionStatus<'a> {
    /// No player chosen. A play may already be pre-selected, but tagging
    /// stays disabled until a player is picked.
    NoPlayer,
    PlayerOnly(&'a str),
    PlayerAndPlay(&'a str, &'a str),
}

#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    player: Option<String>,
    play: Option<String>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Choose a player. Keeps any prior play selection.
    pub fn select_player(&mut self, name: impl Into<String>) {
        self.player = Some(name.into());
    }

    /// Choose a play. Allowed with or without a player selected; a play
    /// alone does not enable tagging.
    pub fn select_play(&mut self, name: impl Into<String>) {
        self.play = Some(name.into());
    }

    pub fn clear(&mut self) {
        self.player = None;
        self.play = None;
    }

    pub fn clear_player(&mut self) {
        self.player = None;
    }

    pub fn player(&self) -> Option<&str> {
        self.player.as_deref()
    }

    pub fn play(&self) -> Option<&str> {
        self.play.as_deref()
    }

    pub fn status(&self) -> SelectionStatus<'_> {
        match (self.player.as_deref(), self.play.as_deref()) {
            (Some(player), Some(play)) => SelectionStatus::PlayerAndPlay(player, play),
            (Some(player), None) => SelectionStatus::PlayerOnly(player),
            (None, _) => SelectionStatus::NoPlayer,
        }
    }

    /// Both halves chosen: recording is allowed (subject to the context gate).
    pub fn is_ready(&self) -> bool {
        matches!(self.status(), SelectionStatus::PlayerAndPlay(_, _))
    }
}
