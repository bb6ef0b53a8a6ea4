use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::event::{self, Event, MouseEventKind};

use crate::tui::event::TuiEvent;

/// When to redraw after state changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RenderMode {
    /// Redraw as soon as a pending event has been handled.
    #[default]
    OnDirty,
    /// Redraw after events, at most once per interval.
    ///
    /// Bursts of input (key repeat, rapid clicks) are batched into one frame.
    Throttled(Duration),
}

impl RenderMode {
    #[must_use]
    pub fn throttled_from_rate(rate: f64) -> Self {
        Self::Throttled(Duration::from_secs_f64(1.0 / rate))
    }
}

/// Blocks on terminal input and interleaves render requests.
///
/// There is no periodic tick: nothing changes between inputs, so an idle
/// loop sleeps inside `crossterm::event::read`.
#[derive(Debug)]
pub(super) struct EventLoop {
    render_mode: RenderMode,
    last_render: Instant,
    dirty: bool,
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl EventLoop {
    pub(super) fn new() -> Self {
        let now = Instant::now();
        let past_time = now.checked_sub(Duration::from_secs(86400)).unwrap_or(now);
        Self {
            render_mode: RenderMode::default(),
            last_render: past_time,
            // first frame
            dirty: true,
        }
    }

    pub(super) fn set_render_mode(&mut self, render_mode: RenderMode) {
        self.render_mode = render_mode;
    }

    pub(super) fn next(&mut self) -> io::Result<TuiEvent> {
        loop {
            let now = Instant::now();
            if self.render_due(now) {
                self.last_render = now;
                self.dirty = false;
                return Ok(TuiEvent::Render);
            }

            if let Some(timeout) = self.timeout(now)
                && !event::poll(timeout)?
            {
                continue;
            }

            let event = event::read()?;
            if changes_screen(&event) {
                self.dirty = true;
            }
            return Ok(event.into());
        }
    }

    fn render_due(&self, now: Instant) -> bool {
        match self.render_mode {
            RenderMode::OnDirty => self.dirty,
            RenderMode::Throttled(interval) => {
                self.dirty && now.duration_since(self.last_render) >= interval
            }
        }
    }

    /// How long to wait for input before a pending render is due.
    ///
    /// `None` means nothing is pending and the loop may block indefinitely.
    fn timeout(&self, now: Instant) -> Option<Duration> {
        if !self.dirty {
            return None;
        }
        let render_at = match self.render_mode {
            RenderMode::OnDirty => now,
            RenderMode::Throttled(interval) => self.last_render + interval,
        };
        Some(render_at.saturating_duration_since(now))
    }
}

/// Pointer motion is reported with mouse capture on but never alters state.
fn changes_screen(event: &Event) -> bool {
    !matches!(
        event,
        Event::Mouse(mouse) if matches!(mouse.kind, MouseEventKind::Moved | MouseEventKind::Drag(_))
    )
}
