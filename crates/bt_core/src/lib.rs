//! # bt_core - Basketball Play-Tagging and Metrics Engine
//!
//! In-memory engine for courtside play tagging: an operator selects a player
//! and a play, records the outcome, and the engine aggregates per-play and
//! per-player efficiency statistics in real time, with CSV/JSON export at
//! the end of a session.
//!
//! ## Features
//! - Append-only event log with global and per-player undo
//! - Pure, recompute-on-demand metrics (attempts, points, PPP, frequency,
//!   success rate) grouped by play or player
//! - Roster/playbook stores with case-insensitive deduplication
//! - Filesystem-safe CSV/JSON export and bulk roster CSV import
//!
//! Everything is synchronous and single-threaded: each command runs to
//! completion against caller-owned state, so no locking is involved.

pub mod error;
pub mod event_log;
pub mod export;
pub mod import;
pub mod metrics;
pub mod models;
pub mod playbook;
pub mod roster;
pub mod selection;
pub mod session;

pub use error::{ExportError, SessionError};
pub use event_log::EventLog;
pub use export::{safe_filename, ExportBundle, ExportFile};
pub use import::{import_roster_csv, ImportSummary};
pub use metrics::{compute_metrics, GroupBy, MetricsRow, MetricsTable};
pub use models::{GameContext, PhotoSource, Play, Player, Quarter, TagEvent, TagResult};
pub use playbook::Playbook;
pub use roster::{AddOutcome, Roster};
pub use selection::{SelectionState, SelectionStatus};
pub use session::TagSession;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    /// Full operator flow: setup, tagging, undo, metrics, export.
    #[test]
    fn test_session_end_to_end() {
        let mut session = TagSession::new();
        session.context = GameContext::new(
            "Acadia",
            NaiveDate::from_ymd_opt(2026, 2, 14).unwrap(),
            Quarter::First,
        );
        session.add_player("Smith", None);
        session.add_player("Jones", None);
        session.add_play("Horns");
        session.add_play("Flex");

        session.select_player("Smith").unwrap();
        session.select_play("Horns").unwrap();
        session.tag(TagResult::Made2).unwrap();
        session.tag(TagResult::Missed2).unwrap();

        session.select_player("Jones").unwrap();
        session.tag(TagResult::Made3).unwrap();
        session.select_play("Flex").unwrap();
        session.tag(TagResult::Foul).unwrap();

        assert_eq!(session.log().len(), 4);
        assert!(session.undo_last().is_some());
        assert_eq!(session.log().len(), 3);

        let by_play = compute_metrics(session.log().events(), GroupBy::Play);
        assert_eq!(by_play.rows.len(), 1); // only Horns remains
        assert_eq!(by_play.rows[0].attempts, 3);
        assert_eq!(by_play.rows[0].points, 5);

        let bundle = ExportBundle::from_session(&session, None).unwrap();
        assert_eq!(bundle.files.len(), 4);
        assert!(bundle.files[2].name.ends_with("_playbyplay.csv"));
    }
}
