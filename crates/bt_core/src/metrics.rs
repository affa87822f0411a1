//! Efficiency metrics derived from the event log.
//!
//! Pure computation: every call re-derives the table from the events it is
//! handed, so filtered and teamwide views can be produced independently and
//! the result always reflects the current log. Nothing is cached.

use crate::models::TagEvent;

/// Grouping dimension for a metrics table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupBy {
    Play,
    Player,
}

impl GroupBy {
    /// Column label for the grouping key.
    pub fn label(&self) -> &'static str {
        match self {
            GroupBy::Play => "Play",
            GroupBy::Player => "Player",
        }
    }

    fn key<'a>(&self, event: &'a TagEvent) -> &'a str {
        match self {
            GroupBy::Play => &event.play,
            GroupBy::Player => &event.player,
        }
    }
}

/// One aggregated row. Rates are raw fractions; display rounding belongs to
/// the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsRow {
    pub key: String,
    pub attempts: u64,
    pub points: u64,
    /// Points per possession: points / attempts.
    pub ppp: f64,
    /// Share of total attempts in the computed view, in [0, 1].
    pub frequency: f64,
    /// Made shots over shot attempts, fouls excluded, in [0, 1].
    pub success_rate: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetricsTable {
    pub group_label: &'static str,
    pub rows: Vec<MetricsRow>,
}

impl MetricsTable {
    /// Fixed column headers, grouping key first.
    pub fn headers(&self) -> [&'static str; 6] {
        [self.group_label, "Attempts", "Points", "PPP", "Frequency", "Success Rate"]
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Per-group tallies accumulated during the partition pass.
#[derive(Debug, Default)]
struct GroupTally {
    attempts: u64,
    points: u64,
    made: u64,
    shot_attempts: u64,
}

/// Aggregate `events` by play or player.
///
/// Groups are discovered in first-seen order, then sorted by PPP descending
/// with attempts descending as the tie-break; equal pairs keep their
/// first-seen order (stable sort). An empty input yields an empty table.
pub fn compute_metrics(events: &[TagEvent], group_by: GroupBy) -> MetricsTable {
    let mut keys: Vec<String> = Vec::new();
    let mut tallies: Vec<GroupTally> = Vec::new();

    for event in events {
        let key = group_by.key(event);
        let idx = match keys.iter().position(|k| k == key) {
            Some(idx) => idx,
            None => {
                keys.push(key.to_string());
                tallies.push(GroupTally::default());
                keys.len() - 1
            }
        };

        let tally = &mut tallies[idx];
        tally.attempts += 1;
        tally.points += u64::from(event.points);
        if event.result.is_made_shot() {
            tally.made += 1;
        }
        if event.result.is_shot_attempt() {
            tally.shot_attempts += 1;
        }
    }

    let total_attempts: u64 = tallies.iter().map(|t| t.attempts).sum();

    let mut rows: Vec<MetricsRow> = keys
        .into_iter()
        .zip(tallies)
        .map(|(key, tally)| MetricsRow {
            key,
            attempts: tally.attempts,
            points: tally.points,
            // attempts >= 1 for every discovered group
            ppp: tally.points as f64 / tally.attempts as f64,
            frequency: if total_attempts > 0 {
                tally.attempts as f64 / total_attempts as f64
            } else {
                0.0
            },
            success_rate: if tally.shot_attempts > 0 {
                tally.made as f64 / tally.shot_attempts as f64
            } else {
                0.0
            },
        })
        .collect();

    rows.sort_by(|a, b| {
        b.ppp
            .partial_cmp(&a.ppp)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(b.attempts.cmp(&a.attempts))
    });

    MetricsTable { group_label: group_by.label(), rows }
}
