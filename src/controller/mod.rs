//! The controller: the single entry point for presentation layers.
//!
//! - `orchestrator`: `GameController`, operations and projections
//! - `view`: scoreboard and status projections
//! - `scheduler`: cancellable deferred actions

pub mod orchestrator;
pub mod view;
pub mod scheduler;

pub use orchestrator::{ClueRequest, ClueTicket, GameController};
pub use view::{Scoreboard, Status};
pub use scheduler::{DeferredAction, Scheduler};
