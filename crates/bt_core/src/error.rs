use thiserror::Error;

/// Non-fatal precondition failures from session commands. The presentation
/// layer normally avoids these by not offering the action; when it cannot,
/// they surface as operator notices, never panics.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SessionError {
    #[error("select a player and a play before tagging")]
    NoSelection,

    #[error("set opponent, game date and quarter before tagging")]
    ContextIncomplete,

    #[error("unknown player: {0}")]
    UnknownPlayer(String),

    #[error("unknown play: {0}")]
    UnknownPlay(String),
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("nothing to export: event log is empty")]
    EmptyLog,

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
