pub mod down_and_distance;
pub mod event;
pub mod feed;
pub mod game_clock;
pub mod play_by_play;
pub mod play_type;
pub mod scoring_events;
pub mod teams;
pub mod yards;

pub use down_and_distance::*;
pub use event::*;
pub use feed::*;
pub use game_clock::*;
pub use play_by_play::*;
pub use play_type::*;
pub use scoring_events::*;
pub use teams::*;
pub use yards::*;
