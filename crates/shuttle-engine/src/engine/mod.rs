//! Rally tracking logic built on top of the court model.
//!
//! - [`Rally`] - Shots of the rally currently being recorded
//! - [`ScoringRule`] - Decides which side wins a point from the terminal cell
//! - [`RallySession`] - Score, rally history, undo stack and game switching
//! - [`LandingStats`] - Landing-cell percentages over the rally history
//!
//! # Session Flow
//!
//! 1. Record shots with [`RallySession::add_point`]
//! 2. Close the rally with [`RallySession::end_rally`]; the last shot's label
//!    decides the winner and the rally moves into the history
//! 3. Repeat; [`RallySession::undo_last_rally`] rolls back to the state just
//!    before the most recent close
//! 4. [`RallySession::switch_game`] logs the game score and starts the next
//!    game with swapped side names and colors

pub use self::{landing_stats::*, rally::*, scoring::*, session::*};

mod landing_stats;
mod rally;
mod scoring;
mod session;
