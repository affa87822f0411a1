//! Core data model: players, plays, game context, and tagged events.

pub mod context;
pub mod event;
pub mod player;

pub use context::{GameContext, Quarter};
pub use event::{TagEvent, TagResult};
pub use player::{PhotoSource, Play, Player};
