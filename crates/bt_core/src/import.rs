//! Bulk roster import from CSV.
//!
//! Expected headers: `name,image_url`. Rows with a blank or missing name are
//! skipped, duplicates are dropped with a warning count, and unparsable rows
//! do not abort the import. Partial success is the normal case.

use std::fmt;
use std::io::Read;

use serde::Deserialize;

use crate::models::PhotoSource;
use crate::roster::{AddOutcome, Roster};

#[derive(Debug, Deserialize)]
struct RosterRow {
    #[serde(default)]
    name: String,
    #[serde(default)]
    image_url: Option<String>,
}

/// Outcome counts for one import run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub added: usize,
    pub duplicates: usize,
    pub skipped: usize,
}

impl ImportSummary {
    pub fn total_rows(&self) -> usize {
        self.added + self.duplicates + self.skipped
    }
}

impl fmt::Display for ImportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} added, {} duplicates, {} skipped",
            self.added, self.duplicates, self.skipped
        )
    }
}

/// Read `(name, image_url)` rows and add each named player to the roster.
pub fn import_roster_csv<R: Read>(reader: R, roster: &mut Roster) -> ImportSummary {
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let mut summary = ImportSummary::default();

    for row in rdr.deserialize::<RosterRow>() {
        let row = match row {
            Ok(row) => row,
            Err(err) => {
                log::warn!("import: skipping malformed row: {}", err);
                summary.skipped += 1;
                continue;
            }
        };

        let photo = row
            .image_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .map(|url| PhotoSource::Url(url.to_string()));

        match roster.add(&row.name, photo) {
            AddOutcome::Added => summary.added += 1,
            AddOutcome::Duplicate => summary.duplicates += 1,
            AddOutcome::EmptyName => summary.skipped += 1,
        }
    }

    log::info!("import: {}", summary);
    summary
}
