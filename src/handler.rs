use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crate::app::App;
use crate::tui::AppEvent;

// Lines per mouse wheel notch
const WHEEL_SCROLL_LINES: u16 = 3;

/// Convert a character index to a byte index for UTF-8 safe string operations
fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

pub fn handle_event(app: &mut App, event: AppEvent) {
    match event {
        AppEvent::Key(key) => handle_key(app, key),
        AppEvent::ScrollUp => {
            for _ in 0..WHEEL_SCROLL_LINES {
                app.scroll_up();
            }
        }
        AppEvent::ScrollDown => {
            for _ in 0..WHEEL_SCROLL_LINES {
                app.scroll_down();
            }
        }
        AppEvent::Redraw => {}
        AppEvent::Tick => {
            app.tick_animation();
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Quit keys work in any state
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    match key.code {
        KeyCode::Esc => app.should_quit = true,

        // Chat scrolling stays live while a request is outstanding
        KeyCode::Up => app.scroll_up(),
        KeyCode::Down => app.scroll_down(),
        KeyCode::PageUp => {
            for _ in 0..10 {
                app.scroll_up();
            }
        }
        KeyCode::PageDown => {
            for _ in 0..10 {
                app.scroll_down();
            }
        }

        // Submit. The trigger is disabled while a request is outstanding;
        // begin_send guards the pipeline entry as well.
        KeyCode::Enter if !app.loading => submit(app),

        // Draft editing is disabled while a request is outstanding
        KeyCode::Backspace if !app.loading => {
            if app.input_cursor > 0 {
                app.input_cursor -= 1;
                let byte_pos = char_to_byte_index(&app.input, app.input_cursor);
                app.input.remove(byte_pos);
            }
        }
        KeyCode::Delete if !app.loading => {
            let char_count = app.input.chars().count();
            if app.input_cursor < char_count {
                let byte_pos = char_to_byte_index(&app.input, app.input_cursor);
                app.input.remove(byte_pos);
            }
        }
        KeyCode::Left if !app.loading => {
            app.input_cursor = app.input_cursor.saturating_sub(1);
        }
        KeyCode::Right if !app.loading => {
            let char_count = app.input.chars().count();
            app.input_cursor = (app.input_cursor + 1).min(char_count);
        }
        KeyCode::Home if !app.loading => {
            app.input_cursor = 0;
        }
        KeyCode::End if !app.loading => {
            app.input_cursor = app.input.chars().count();
        }
        KeyCode::Char(c) if !app.loading => {
            let byte_pos = char_to_byte_index(&app.input, app.input_cursor);
            app.input.insert(byte_pos, c);
            app.input_cursor += 1;
        }

        _ => {}
    }
}

/// Run the draft through the send pipeline and spawn the request task for
/// an accepted draft.
fn submit(app: &mut App) {
    if let Some(text) = app.begin_send() {
        let client = app.client.clone();
        app.pending = Some(tokio::spawn(async move { client.send(&text).await }));
    }
}
