//! Shared simulation contract
//!
//! Every game is a pure, deterministic simulation:
//! - Fixed timestep only (driven by `GameLoop`)
//! - Seeded RNG only
//! - No rendering or platform dependencies beyond emitting a display list

pub mod collision;
pub mod difficulty;
pub mod game;
pub mod runner;

pub use collision::{Rect, bounce_side_walls, reflect_velocity};
pub use difficulty::Ramp;
pub use game::{EventQueue, Game, GameEvent, Reporter, RunStatus, Viewport};
pub use runner::GameLoop;
