//! Player roster store.
//!
//! Owns the set of known players for the session. Names are unique
//! case-insensitively; duplicate adds are dropped and reported through the
//! returned [`AddOutcome`] rather than raised as errors.

use crate::models::{PhotoSource, Player};

/// Result of an add attempt. Duplicates and blank names are operator
/// notices, not failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    Duplicate,
    EmptyName,
}

impl AddOutcome {
    pub fn is_added(&self) -> bool {
        matches!(self, AddOutcome::Added)
    }
}

/// Ordered player collection. Insertion order is preserved for display.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    players: Vec<Player>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a player, deduplicating by case-insensitive name. Leading and
    /// trailing whitespace is trimmed before the identity check.
    pub fn add(&mut self, name: &str, photo: Option<PhotoSource>) -> AddOutcome {
        let name = name.trim();
        if name.is_empty() {
            return AddOutcome::EmptyName;
        }
        if self.contains(name) {
            log::warn!("roster: {} already in roster, add dropped", name);
            return AddOutcome::Duplicate;
        }
        self.players.push(Player { name: name.to_string(), photo });
        AddOutcome::Added
    }

    /// Remove a player by exact name. Returns the removed entry, if any.
    pub fn remove(&mut self, name: &str) -> Option<Player> {
        let idx = self.players.iter().position(|p| p.name == name)?;
        Some(self.players.remove(idx))
    }

    pub fn clear(&mut self) {
        self.players.clear();
    }

    /// Case-insensitive membership check (the identity rule for adds).
    pub fn contains(&self, name: &str) -> bool {
        let lower = name.trim().to_lowercase();
        self.players.iter().any(|p| p.name.to_lowercase() == lower)
    }

    pub fn get(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.name == name)
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.players.iter().map(|p| p.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}
