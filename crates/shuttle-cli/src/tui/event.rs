use crossterm::event::Event as CrosstermEvent;

/// Events produced by the event loop.
#[derive(Debug, Clone, derive_more::IsVariant, derive_more::From)]
pub(super) enum TuiEvent {
    /// The screen needs to be redrawn.
    Render,
    /// Key input, mouse, resize and other terminal events.
    Crossterm(CrosstermEvent),
}
