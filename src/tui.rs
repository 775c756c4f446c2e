use std::io::{self, Stderr};
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyEvent, KeyEventKind,
        MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures_util::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

pub type Tui = Terminal<CrosstermBackend<Stderr>>;

/// Terminal input reduced to the chat view's vocabulary. Wheel notches
/// arrive pre-translated so the handler never sees raw mouse state; ticks
/// drive the busy animation and give the run loop a heartbeat to poll the
/// outstanding request between key presses.
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    ScrollUp,
    ScrollDown,
    Redraw,
    Tick,
}

pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<AppEvent>,
}

impl EventHandler {
    /// Pump crossterm events and a 300ms tick into one channel. A single
    /// task owns both sources, so dropping the receiver ends the pump.
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            let mut reader = event::EventStream::new();
            let mut ticker = tokio::time::interval(Duration::from_millis(300));

            loop {
                let app_event = tokio::select! {
                    _ = ticker.tick() => Some(AppEvent::Tick),
                    evt = reader.next() => match evt {
                        Some(Ok(evt)) => translate(evt),
                        Some(Err(_)) => None,
                        None => break,
                    },
                };

                if let Some(event) = app_event {
                    if tx.send(event).is_err() {
                        break;
                    }
                }
            }
        });

        Self { rx }
    }

    pub async fn next(&mut self) -> Option<AppEvent> {
        self.rx.recv().await
    }
}

/// Map a raw terminal event onto an `AppEvent`. Key releases and mouse
/// events other than the wheel are dropped here, before they reach the
/// handler.
fn translate(evt: Event) -> Option<AppEvent> {
    match evt {
        Event::Key(key) if key.kind == KeyEventKind::Press => Some(AppEvent::Key(key)),
        Event::Mouse(mouse) => match mouse.kind {
            MouseEventKind::ScrollUp => Some(AppEvent::ScrollUp),
            MouseEventKind::ScrollDown => Some(AppEvent::ScrollDown),
            _ => None,
        },
        Event::Resize(_, _) => Some(AppEvent::Redraw),
        _ => None,
    }
}

pub fn init() -> Result<Tui> {
    enable_raw_mode()?;
    execute!(io::stderr(), EnterAlternateScreen, EnableMouseCapture)?;

    let terminal = Terminal::new(CrosstermBackend::new(io::stderr()))?;
    Ok(terminal)
}

pub fn restore() -> Result<()> {
    execute!(io::stderr(), DisableMouseCapture, LeaveAlternateScreen)?;
    disable_raw_mode()?;
    Ok(())
}

/// Restore the terminal before the default panic output runs, so the
/// message lands on a usable screen.
pub fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = restore();
        original_hook(panic_info);
    }));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers, MouseButton, MouseEvent};

    #[test]
    fn test_key_press_is_delivered() {
        let evt = Event::Key(KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE));
        assert!(matches!(translate(evt), Some(AppEvent::Key(_))));
    }

    #[test]
    fn test_key_release_is_dropped() {
        let key = KeyEvent::new_with_kind(
            KeyCode::Char('a'),
            KeyModifiers::NONE,
            KeyEventKind::Release,
        );
        assert!(translate(Event::Key(key)).is_none());
    }

    #[test]
    fn test_wheel_maps_to_scroll() {
        let mouse = MouseEvent {
            kind: MouseEventKind::ScrollUp,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        };
        assert!(matches!(
            translate(Event::Mouse(mouse)),
            Some(AppEvent::ScrollUp)
        ));

        let mouse = MouseEvent {
            kind: MouseEventKind::ScrollDown,
            ..mouse
        };
        assert!(matches!(
            translate(Event::Mouse(mouse)),
            Some(AppEvent::ScrollDown)
        ));
    }

    #[test]
    fn test_clicks_are_dropped() {
        let mouse = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        };
        assert!(translate(Event::Mouse(mouse)).is_none());
    }

    #[test]
    fn test_resize_requests_redraw() {
        assert!(matches!(
            translate(Event::Resize(80, 24)),
            Some(AppEvent::Redraw)
        ));
    }
}
