pub mod context;
pub mod state;
pub mod tracker;

pub use context::*;
pub use state::*;
pub use tracker::*;
