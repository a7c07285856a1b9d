//! Terminal event abstraction.
//!
//! Crossterm's reader blocks, so it runs on tokio's blocking pool and
//! forwards events over a channel; the main loop only ever awaits the
//! channel.

use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent, KeyEventKind, MouseEvent};
use tokio::sync::mpsc;

/// High-level events consumed by the application.
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
    Tick,
}

impl AppEvent {
    /// Map a raw terminal event; key releases and focus/paste events are
    /// dropped.
    fn from_crossterm(ev: CtEvent) -> Option<Self> {
        match ev {
            CtEvent::Key(k) if k.kind != KeyEventKind::Release => Some(AppEvent::Key(k)),
            CtEvent::Mouse(m) => Some(AppEvent::Mouse(m)),
            CtEvent::Resize(w, h) => Some(AppEvent::Resize(w, h)),
            _ => None,
        }
    }
}

/// Start the reader and return the receiving end.  A `Tick` is sent
/// whenever `tick_rate` passes without input.
pub fn spawn_event_reader(tick_rate: Duration) -> mpsc::UnboundedReceiver<AppEvent> {
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::task::spawn_blocking(move || loop {
        let next = match event::poll(tick_rate) {
            Ok(true) => match event::read() {
                Ok(ev) => AppEvent::from_crossterm(ev),
                Err(e) => {
                    tracing::warn!(error = %e, "terminal read failed");
                    None
                }
            },
            Ok(false) => Some(AppEvent::Tick),
            Err(e) => {
                tracing::warn!(error = %e, "terminal poll failed");
                Some(AppEvent::Tick)
            }
        };
        if let Some(ev) = next {
            if tx.send(ev).is_err() {
                break; // receiver dropped
            }
        }
    });

    rx
}
