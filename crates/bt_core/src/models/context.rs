use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Game period. `Unset` is the pre-selection blank and keeps the context
/// gate closed until the operator picks a quarter.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum Quarter {
    #[serde(rename = "")]
    #[default]
    Unset,
    #[serde(rename = "1")]
    First,
    #[serde(rename = "2")]
    Second,
    #[serde(rename = "3")]
    Third,
    #[serde(rename = "4")]
    Fourth,
    #[serde(rename = "OT")]
    Overtime,
}

impl Quarter {
    /// Short label used in filenames and exported rows.
    pub fn label(&self) -> &'static str {
        match self {
            Quarter::Unset => "",
            Quarter::First => "1",
            Quarter::Second => "2",
            Quarter::Third => "3",
            Quarter::Fourth => "4",
            Quarter::Overtime => "OT",
        }
    }

    /// Parse an operator-supplied label. Unrecognized values fall back to
    /// `Unset` rather than failing.
    pub fn parse(label: &str) -> Quarter {
        match label.trim() {
            "1" => Quarter::First,
            "2" => Quarter::Second,
            "3" => Quarter::Third,
            "4" => Quarter::Fourth,
            "OT" | "ot" | "Ot" => Quarter::Overtime,
            _ => Quarter::Unset,
        }
    }

    pub fn is_set(&self) -> bool {
        !matches!(self, Quarter::Unset)
    }
}

impl fmt::Display for Quarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Mutable game setup: opponent, date, and quarter. Events snapshot these
/// by value at tagging time, so later edits never rewrite history.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GameContext {
    pub opponent: String,
    pub game_date: Option<NaiveDate>,
    pub quarter: Quarter,
}

impl GameContext {
    pub fn new(opponent: impl Into<String>, game_date: NaiveDate, quarter: Quarter) -> Self {
        Self { opponent: opponent.into(), game_date: Some(game_date), quarter }
    }

    /// Tagging gate predicate: all three setup fields must be filled in.
    pub fn is_complete(&self) -> bool {
        !self.opponent.trim().is_empty() && self.game_date.is_some() && self.quarter.is_set()
    }

    /// Date rendered the way it lands in exported rows (empty when unset).
    pub fn date_label(&self) -> String {
        self.game_date.map(|d| d.to_string()).unwrap_or_default()
    }
}
