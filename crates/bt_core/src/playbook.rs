//! Playbook store.
//!
//! Owns the set of known play names. Same identity rule as the roster
//! (case-insensitive unique), but plays have no removal operation.

use crate::models::Play;
use crate::roster::AddOutcome;

/// Ordered play collection. Insertion order is preserved for display.
#[derive(Debug, Clone, Default)]
pub struct Playbook {
    plays: Vec<Play>,
}

impl Playbook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a play, deduplicating by case-insensitive name.
    pub fn add(&mut self, name: &str) -> AddOutcome {
        let name = name.trim();
        if name.is_empty() {
            return AddOutcome::EmptyName;
        }
        if self.contains(name) {
            log::warn!("playbook: {} already exists, add dropped", name);
            return AddOutcome::Duplicate;
        }
        self.plays.push(Play::new(name));
        AddOutcome::Added
    }

    pub fn contains(&self, name: &str) -> bool {
        let lower = name.trim().to_lowercase();
        self.plays.iter().any(|p| p.name.to_lowercase() == lower)
    }

    pub fn plays(&self) -> &[Play] {
        &self.plays
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.plays.iter().map(|p| p.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.plays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plays.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_play_dedup_case_insensitive() {
        let mut playbook = Playbook::new();
        assert_eq!(playbook.add("Horns"), AddOutcome::Added);
        assert_eq!(playbook.add("horns"), AddOutcome::Duplicate);
        assert_eq!(playbook.len(), 1);
    }

    #[test]
    fn test_blank_play_rejected() {
        let mut playbook = Playbook::new();
        assert_eq!(playbook.add("  "), AddOutcome::EmptyName);
        assert!(playbook.is_empty());
    }

    #[test]
    fn test_play_order_preserved() {
        let mut playbook = Playbook::new();
        playbook.add("Flex");
        playbook.add("Horns");
        playbook.add("Pick and Roll");
        let names: Vec<&str> = playbook.names().collect();
        assert_eq!(names, vec!["Flex", "Horns", "Pick and Roll"]);
    }
}
