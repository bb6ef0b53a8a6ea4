//! Rally and scoring engine for the shuttle badminton tracker.
//!
//! The crate is split the same way a court is drawn and scored:
//!
//! - [`core`] - court geometry ([`GridConfig`], [`CellRef`], [`Point`]) and the
//!   static cell classification ([`CourtLayout`], [`CellLabel`])
//! - [`engine`] - the rally state, the scoring rule, the session state machine
//!   ([`RallySession`]) and landing aggregation ([`LandingStats`])
//! - [`config`] - the serializable [`CourtConfig`] a session is built from
//!
//! # Example
//!
//! ```
//! use shuttle_engine::{CourtConfig, RallySession, Side};
//!
//! let mut session = RallySession::new(&CourtConfig::default()).unwrap();
//! session.add_point(Side::Near, 2, 3);
//! session.add_point(Side::Far, 2, 3);
//!
//! let outcome = session.end_rally().unwrap();
//! assert_eq!(outcome.winner, Side::Near);
//! assert_eq!(session.score().near(), 1);
//! ```

pub use self::{config::*, core::*, engine::*};

pub mod config;
pub mod core;
pub mod engine;

/// Error raised when a court configuration cannot be turned into a session.
///
/// Configuration is validated once, when the session is built. A session that
/// was constructed successfully never produces this error again.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("grid must have at least one row and one column, got {rows}x{cols}")]
    EmptyGrid { rows: u8, cols: u8 },
    #[display("cell size must be positive and finite, got {width}x{height}")]
    InvalidCellSize { width: f64, height: f64 },
    #[display("out-cell ({row},{col}) on {side} side is outside the {rows}x{cols} grid")]
    OutCellOutOfRange {
        side: Side,
        row: u8,
        col: u8,
        rows: u8,
        cols: u8,
    },
    #[display("scoring cell {cell} is outside the {rows}x{cols} grid")]
    ScoringCellOutOfRange { cell: CellRef, rows: u8, cols: u8 },
    #[display("display name for {side} side is empty")]
    EmptySideName { side: Side },
    #[display("both sides use the display name {name:?}")]
    DuplicateSideName { name: String },
}
