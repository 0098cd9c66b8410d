pub mod builder;
pub mod clauses;
pub mod converts;
pub mod decoder;
pub mod field_goal;
pub mod fumble;
pub mod kicks;
pub mod pass;
pub mod patterns;
pub mod penalty;
pub mod rules;
pub mod rush;

pub use builder::{BallCarrier, PlayBuilder};
pub use decoder::{decode_play, rules_for};
