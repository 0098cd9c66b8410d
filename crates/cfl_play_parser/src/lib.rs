//! Decodes CFL game-tracker play-by-play into flat, analytics-ready play events.
//!
//! A game is fetched phase by phase through a [`source::PlayByPlayFeed`], each
//! play description is matched against the rule tables in [`parsers`], and a
//! [`game_state::GameTracker`] carries score, timeouts and the down series from
//! one play to the next.

pub mod assembler;
pub mod error;
pub mod game_state;
pub mod parsers;
pub mod roster;
pub mod schema;
pub mod source;

pub use assembler::{FailedGame, GameAssembler, SeasonReport};
pub use error::{AssemblyError, DecodeError, FeedError};
pub use game_state::{GameContext, GameTracker, PlayState};
pub use parsers::decode_play;
pub use roster::{Roster, RosterEntry};
pub use schema::DecodedEvent;
pub use source::{DirectoryFeed, PlayByPlayFeed, RetryingFeed, ScheduleFeed};
