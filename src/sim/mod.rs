//! Game rules
//!
//! All gameplay logic lives here and stays free of DOM access:
//! - Seeded RNG only
//! - Stable iteration order (balls sorted by id)
//! - State changes are reported as `GameEvent`s for the view

pub mod level;
pub mod round;
pub mod state;

pub use level::Level;
pub use round::{Verdict, finish_round, start_round, tick, verify_ball};
pub use state::{Ball, BallStatus, GameEvent, GameState, Outcome, RoundPhase};
