//! CSV/JSON export of the event log and metrics tables.
//!
//! All writers produce byte buffers and never touch the log, so exporting is
//! idempotent: repeated calls over an unchanged session yield identical
//! output.

use std::path::Path;

use crate::error::ExportError;
use crate::metrics::{compute_metrics, GroupBy, MetricsTable};
use crate::models::TagEvent;
use crate::session::TagSession;

/// Strip a string down to a filesystem-safe token: trimmed, spaces turned
/// into underscores, and everything outside `[A-Za-z0-9_.-]` dropped.
pub fn safe_filename(s: &str) -> String {
    s.trim()
        .chars()
        .map(|c| if c == ' ' { '_' } else { c })
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
        .collect()
}

/// Serialize a metrics table to CSV. Rates are written as raw floats;
/// display rounding stays in the presentation layer.
pub fn metrics_csv(table: &MetricsTable) -> Result<Vec<u8>, ExportError> {
    let mut buf = Vec::new();
    {
        let mut wtr = csv::Writer::from_writer(&mut buf);
        wtr.write_record(table.headers())?;
        for row in &table.rows {
            wtr.write_record([
                row.key.as_str(),
                &row.attempts.to_string(),
                &row.points.to_string(),
                &row.ppp.to_string(),
                &row.frequency.to_string(),
                &row.success_rate.to_string(),
            ])?;
        }
        wtr.flush()?;
    }
    Ok(buf)
}

/// Serialize the raw play-by-play log to CSV, one row per event in log
/// order, with the fixed column schema
/// `timestamp,opponent,game_date,quarter,player,play,result,points`.
pub fn play_by_play_csv(events: &[TagEvent]) -> Result<Vec<u8>, ExportError> {
    let mut buf = Vec::new();
    {
        let mut wtr = csv::Writer::from_writer(&mut buf);
        for event in events {
            wtr.serialize(event)?;
        }
        wtr.flush()?;
    }
    Ok(buf)
}

/// Serialize the raw log to a pretty JSON array, insertion order preserved.
pub fn snapshot_json(events: &[TagEvent]) -> Result<Vec<u8>, ExportError> {
    Ok(serde_json::to_vec_pretty(events)?)
}

/// One named export artifact.
#[derive(Debug, Clone)]
pub struct ExportFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// The full set of session exports: per-play metrics (optionally filtered to
/// one player), teamwide per-player metrics, the play-by-play CSV, and a
/// JSON snapshot of the raw log.
#[derive(Debug, Clone)]
pub struct ExportBundle {
    pub files: Vec<ExportFile>,
}

impl ExportBundle {
    /// Assemble all export artifacts for the session. `player_filter`
    /// narrows the per-play metrics only; per-player metrics are always
    /// teamwide. Fails with [`ExportError::EmptyLog`] when there is nothing
    /// to export.
    pub fn from_session(
        session: &TagSession,
        player_filter: Option<&str>,
    ) -> Result<Self, ExportError> {
        if session.log().is_empty() {
            return Err(ExportError::EmptyLog);
        }

        let opp = safe_filename(&session.context.opponent);
        let date = safe_filename(&session.context.date_label());
        let quarter = safe_filename(session.context.quarter.label());
        let base = format!("{}_{}_Q{}", opp, date, quarter);

        let filtered = session.filtered_events(player_filter);
        let play_table = compute_metrics(&filtered, GroupBy::Play);
        let metrics_suffix = match player_filter {
            Some(player) => format!("metrics_{}", safe_filename(player)),
            None => "metrics".to_string(),
        };

        let all_events = session.log().events();
        let player_table = compute_metrics(all_events, GroupBy::Player);

        let files = vec![
            ExportFile {
                name: format!("{}_{}.csv", base, metrics_suffix),
                bytes: metrics_csv(&play_table)?,
            },
            ExportFile {
                name: format!("{}_per_player_metrics.csv", base),
                bytes: metrics_csv(&player_table)?,
            },
            ExportFile {
                name: format!("{}_playbyplay.csv", base),
                bytes: play_by_play_csv(all_events)?,
            },
            ExportFile {
                name: format!("{}_snapshot.json", base),
                bytes: snapshot_json(all_events)?,
            },
        ];

        log::info!("export: prepared {} files with base {}", files.len(), base);
        Ok(Self { files })
    }

    /// Write every artifact into `dir`, creating it if needed.
    pub fn write_to_dir(&self, dir: &Path) -> Result<(), ExportError> {
        std::fs::create_dir_all(dir)?;
        for file in &self.files {
            std::fs::write(dir.join(&file.name), &file.bytes)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GameContext, Quarter, TagResult};
    use chrono::NaiveDate;

    fn session_with_events() -> TagSession {
        let mut session = TagSession::new();
        session.context = GameContext::new(
            "St. Mary's Huskies",
            NaiveDate::from_ymd_opt(2026, 2, 7).unwrap(),
            Quarter::Fourth,
        );
        session.add_player("Smith", None);
        session.add_player("Jones", None);
        session.add_play("Horns");
        session.select_player("Smith").unwrap();
        session.select_play("Horns").unwrap();
        session.tag(TagResult::Made2).unwrap();
        session.select_player("Jones").unwrap();
        session.tag(TagResult::Missed3).unwrap();
        session
    }

    #[test]
    fn test_safe_filename() {
        assert_eq!(safe_filename("St. Mary's Huskies"), "St._Marys_Huskies");
        assert_eq!(safe_filename("  2026-02-07  "), "2026-02-07");
        assert_eq!(safe_filename("Q4/OT?"), "Q4OT");
        assert_eq!(safe_filename(""), "");
    }

    #[test]
    fn test_play_by_play_schema_and_row_count() {
        let session = session_with_events();
        let bytes = play_by_play_csv(session.log().events()).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let mut lines = text.lines();

        assert_eq!(
            lines.next().unwrap(),
            "timestamp,opponent,game_date,quarter,player,play,result,points"
        );
        assert_eq!(lines.count(), session.log().len());
    }

    #[test]
    fn test_metrics_csv_header_matches_grouping() {
        let session = session_with_events();
        let table = compute_metrics(session.log().events(), GroupBy::Player);
        let bytes = metrics_csv(&table).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.starts_with("Player,Attempts,Points,PPP,Frequency,Success Rate"));
    }

    #[test]
    fn test_snapshot_json_preserves_order() {
        let session = session_with_events();
        let bytes = snapshot_json(session.log().events()).unwrap();
        let parsed: Vec<TagEvent> = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(parsed, session.log().events());
    }

    #[test]
    fn test_bundle_filenames() {
        let session = session_with_events();
        let bundle = ExportBundle::from_session(&session, None).unwrap();
        let names: Vec<&str> = bundle.files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "St._Marys_Huskies_2026-02-07_Q4_metrics.csv",
                "St._Marys_Huskies_2026-02-07_Q4_per_player_metrics.csv",
                "St._Marys_Huskies_2026-02-07_Q4_playbyplay.csv",
                "St._Marys_Huskies_2026-02-07_Q4_snapshot.json",
            ]
        );
    }

    #[test]
    fn test_bundle_with_player_filter() {
        let session = session_with_events();
        let bundle = ExportBundle::from_session(&session, Some("Smith")).unwrap();
        assert!(bundle.files[0].name.ends_with("_metrics_Smith.csv"));

        // Filtered per-play table only covers Smith's events
        let text = String::from_utf8(bundle.files[0].bytes.clone()).unwrap();
        assert!(text.contains("Horns,1,2"));
    }

    #[test]
    fn test_empty_log_refuses_export() {
        let session = TagSession::new();
        assert!(matches!(
            ExportBundle::from_session(&session, None),
            Err(ExportError::EmptyLog)
        ));
    }

    #[test]
    fn test_export_is_idempotent() {
        let session = session_with_events();
        let a = ExportBundle::from_session(&session, None).unwrap();
        let b = ExportBundle::from_session(&session, None).unwrap();
        for (fa, fb) in a.files.iter().zip(&b.files) {
            assert_eq!(fa.name, fb.name);
            assert_eq!(fa.bytes, fb.bytes);
        }
    }

    #[test]
    fn test_write_to_dir() {
        let session = session_with_events();
        let bundle = ExportBundle::from_session(&session, None).unwrap();
        let dir = tempfile::tempdir().unwrap();
        bundle.write_to_dir(dir.path()).unwrap();
        for file in &bundle.files {
            assert!(dir.path().join(&file.name).exists());
        }
    }
}
