use anyhow::Result;

mod api;
mod app;
mod config;
mod handler;
mod tui;
mod ui;

use app::App;
use config::Config;
use tui::{EventHandler, Tui};

#[tokio::main]
async fn main() -> Result<()> {
    tui::install_panic_hook();

    let config = Config::load().unwrap_or_else(|_| Config::new());
    let mut app = App::new(&config.endpoint());

    let mut terminal = tui::init()?;
    let mut events = EventHandler::new();

    let result = run(&mut terminal, &mut events, &mut app).await;

    tui::restore()?;
    result
}

async fn run(terminal: &mut Tui, events: &mut EventHandler, app: &mut App) -> Result<()> {
    while !app.should_quit {
        terminal.draw(|frame| ui::render(app, frame))?;

        match events.next().await {
            Some(event) => handler::handle_event(app, event),
            None => break,
        }

        // Tick events guarantee this runs while a request is outstanding
        app.poll_pending().await;
    }

    Ok(())
}
