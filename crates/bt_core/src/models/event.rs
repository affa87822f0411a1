use chrono::{DateTime, Local, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::context::GameContext;

/// Outcome of a tagged possession.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TagResult {
    #[serde(rename = "Made 2")]
    Made2,
    #[serde(rename = "Made 3")]
    Made3,
    #[serde(rename = "Missed 2")]
    Missed2,
    #[serde(rename = "Missed 3")]
    Missed3,
    #[serde(rename = "Foul")]
    Foul,
}

impl TagResult {
    pub const ALL: [TagResult; 5] = [
        TagResult::Made2,
        TagResult::Made3,
        TagResult::Missed2,
        TagResult::Missed3,
        TagResult::Foul,
    ];

    /// Points awarded for this result. Total over the enum, so no event can
    /// carry a points value inconsistent with its result.
    pub fn points(&self) -> u32 {
        match self {
            TagResult::Made2 => 2,
            TagResult::Made3 => 3,
            TagResult::Missed2 | TagResult::Missed3 | TagResult::Foul => 0,
        }
    }

    /// Display label, matching the exported string form.
    pub fn label(&self) -> &'static str {
        match self {
            TagResult::Made2 => "Made 2",
            TagResult::Made3 => "Made 3",
            TagResult::Missed2 => "Missed 2",
            TagResult::Missed3 => "Missed 3",
            TagResult::Foul => "Foul",
        }
    }

    /// Parse an operator-supplied label. Returns `None` for anything outside
    /// the closed result set.
    pub fn parse(label: &str) -> Option<TagResult> {
        match label.trim() {
            "Made 2" => Some(TagResult::Made2),
            "Made 3" => Some(TagResult::Made3),
            "Missed 2" => Some(TagResult::Missed2),
            "Missed 3" => Some(TagResult::Missed3),
            "Foul" => Some(TagResult::Foul),
            _ => None,
        }
    }

    /// Whether this result is a converted field goal.
    pub fn is_made_shot(&self) -> bool {
        matches!(self, TagResult::Made2 | TagResult::Made3)
    }

    /// Whether this result counts as a shot attempt (fouls do not).
    pub fn is_shot_attempt(&self) -> bool {
        !matches!(self, TagResult::Foul)
    }
}

impl fmt::Display for TagResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Points for a raw result label. Unrecognized labels score 0 rather than
/// failing, mirroring the lookup-with-default the log format tolerates.
pub fn points_from_label(label: &str) -> u32 {
    TagResult::parse(label).map(|r| r.points()).unwrap_or(0)
}

/// One tagged possession. Context and selection are copied by value at
/// creation time; the entry is immutable afterwards except for undo removal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TagEvent {
    #[serde(with = "timestamp_format")]
    pub timestamp: DateTime<Local>,
    pub opponent: String,
    pub game_date: String,
    pub quarter: String,
    pub player: String,
    pub play: String,
    pub result: TagResult,
    pub points: u32,
}

impl TagEvent {
    /// Build an event from the current context and selection. `points` is
    /// always derived from `result` here; there is no other constructor.
    pub fn record(
        context: &GameContext,
        player: impl Into<String>,
        play: impl Into<String>,
        result: TagResult,
    ) -> Self {
        // Second resolution: the exported timestamp format carries no
        // sub-second precision, so drop it up front to keep round-trips exact.
        let now = Local::now();
        Self {
            timestamp: now.with_nanosecond(0).unwrap_or(now),
            opponent: context.opponent.clone(),
            game_date: context.date_label(),
            quarter: context.quarter.label().to_string(),
            player: player.into(),
            play: play.into(),
            result,
            points: result.points(),
        }
    }
}

/// Second-resolution local timestamps, serialized as `YYYY-MM-DD HH:MM:SS`.
mod timestamp_format {
    use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
    use serde::{self, Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn serialize<S>(dt: &DateTime<Local>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&dt.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Local>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let naive =
            NaiveDateTime::parse_from_str(&s, FORMAT).map_err(serde::de::Error::custom)?;
        Local
            .from_local_datetime(&naive)
            .single()
            .ok_or_else(|| serde::de::Error::custom("ambiguous local timestamp"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::context::Quarter;
    use chrono::NaiveDate;

    #[test]
    fn test_points_mapping_is_total() {
        assert_eq!(TagResult::Made2.points(), 2);
        assert_eq!(TagResult::Made3.points(), 3);
        assert_eq!(TagResult::Missed2.points(), 0);
        assert_eq!(TagResult::Missed3.points(), 0);
        assert_eq!(TagResult::Foul.points(), 0);
    }

    #[test]
    fn test_points_from_label_defaults_to_zero() {
        assert_eq!(points_from_label("Made 2"), 2);
        assert_eq!(points_from_label("Made 3"), 3);
        assert_eq!(points_from_label("Missed 2"), 0);
        assert_eq!(points_from_label("Foul"), 0);
        assert_eq!(points_from_label("And One"), 0);
        assert_eq!(points_from_label(""), 0);
    }

    #[test]
    fn test_result_label_roundtrip() {
        for r in TagResult::ALL {
            assert_eq!(TagResult::parse(r.label()), Some(r));
        }
        assert_eq!(TagResult::parse("made 2"), None);
    }

    #[test]
    fn test_shot_attempt_classification() {
        assert!(TagResult::Made2.is_made_shot());
        assert!(TagResult::Made3.is_made_shot());
        assert!(!TagResult::Missed2.is_made_shot());
        assert!(TagResult::Missed3.is_shot_attempt());
        assert!(!TagResult::Foul.is_shot_attempt());
    }

    #[test]
    fn test_event_snapshots_context() {
        let ctx = GameContext::new(
            "Dalhousie",
            NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
            Quarter::Third,
        );
        let event = TagEvent::record(&ctx, "Smith", "Horns", TagResult::Made3);

        assert_eq!(event.opponent, "Dalhousie");
        assert_eq!(event.game_date, "2026-02-01");
        assert_eq!(event.quarter, "3");
        assert_eq!(event.player, "Smith");
        assert_eq!(event.play, "Horns");
        assert_eq!(event.points, 3);
    }

    #[test]
    fn test_event_json_shape() {
        let ctx = GameContext::new(
            "UPEI",
            NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
            Quarter::First,
        );
        let event = TagEvent::record(&ctx, "Jones", "Flex", TagResult::Missed2);
        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["result"], "Missed 2");
        assert_eq!(json["points"], 0);
        assert_eq!(json["quarter"], "1");

        let back: TagEvent = serde_json::from_value(json).unwrap();
        assert_eq!(back, event);
    }
}
