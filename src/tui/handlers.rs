// File: src/tui/handlers.rs
use crate::explore::FEATURED;
use crate::tui::action::{Action, AppEvent, Tab};
use crate::tui::state::{AppState, InputMode};
use crossterm::event::{KeyCode, KeyEvent};

pub fn handle_app_event(state: &mut AppState, event: AppEvent) {
    match event {
        AppEvent::Status(s) => state.message = s,
        AppEvent::SearchFinished(ticket, outcome) => {
            let found = outcome.as_ref().ok().map(|books| books.len());
            if !state.store.finish_search(&ticket, outcome) {
                return;
            }
            if !state.store.search.viewing_favorites {
                state.reset_selection();
            }
            state.message = match found {
                Some(n) => format!("{} results for \"{}\"", n, ticket.query()),
                None => "Ready.".to_string(),
            };
        }
    }
}

pub fn handle_key_event(key: KeyEvent, state: &mut AppState) -> Option<Action> {
    match state.mode {
        InputMode::Searching => match key.code {
            KeyCode::Enter => {
                state.mode = InputMode::Normal;
                let ticket = state.store.submit_query()?;
                state.tab = Tab::Books;
                state.close_detail();
                state.message = format!("Searching for \"{}\"...", ticket.query());
                return Some(Action::Search(ticket));
            }
            KeyCode::Esc => state.mode = InputMode::Normal,
            KeyCode::Char(c) => state.enter_char(c),
            KeyCode::Backspace => state.delete_char(),
            KeyCode::Left => state.move_cursor_left(),
            KeyCode::Right => state.move_cursor_right(),
            KeyCode::Home => state.cursor_position = 0,
            KeyCode::End => state.cursor_to_end(),
            _ => {}
        },

        InputMode::Normal if state.selection.is_visible() => return handle_detail_key(key, state),

        InputMode::Normal => match key.code {
            KeyCode::Char('q') => return Some(Action::Quit),
            KeyCode::Char('/') => {
                state.mode = InputMode::Searching;
                state.cursor_to_end();
            }
            KeyCode::Tab => state.toggle_tab(),
            KeyCode::Char('t') => {
                let theme = state.store.toggle_theme();
                state.message = if theme.is_dark() {
                    "Dark theme".to_string()
                } else {
                    "Light theme".to_string()
                };
            }
            KeyCode::Down | KeyCode::Char('j') => state.next(),
            KeyCode::Up | KeyCode::Char('k') => state.previous(),
            KeyCode::PageDown => state.jump_forward(10),
            KeyCode::PageUp => state.jump_backward(10),
            _ => match state.tab {
                Tab::Books => return handle_books_key(key, state),
                Tab::Explore => return handle_explore_key(key, state),
            },
        },
    }
    None
}

fn handle_books_key(key: KeyEvent, state: &mut AppState) -> Option<Action> {
    match key.code {
        KeyCode::Enter => state.open_selected(),
        KeyCode::Char('f') => {
            state.toggle_favorite_current();
        }
        KeyCode::Char('v') => state.toggle_favorites_view(),
        KeyCode::Char('s') => {
            let book = state.get_selected_book()?.clone();
            return Some(Action::Share(book));
        }
        _ => {}
    }
    None
}

fn handle_explore_key(key: KeyEvent, state: &mut AppState) -> Option<Action> {
    let idx = state.explore_state.selected()?;
    match key.code {
        KeyCode::Char(' ') => state.explore.toggle(idx),
        KeyCode::Enter => {
            let featured = FEATURED.get(idx)?;
            state.store.set_query(featured.search_query());
            state.cursor_to_end();
            let ticket = state.store.submit_query()?;
            state.tab = Tab::Books;
            state.message = format!("Searching for \"{}\"...", ticket.query());
            return Some(Action::Search(ticket));
        }
        _ => {}
    }
    None
}

fn handle_detail_key(key: KeyEvent, state: &mut AppState) -> Option<Action> {
    let book = state.selection.selected()?.clone();
    let link = |url: &Option<String>, label: &str, state: &mut AppState| match url {
        Some(u) if !u.is_empty() => Some(Action::OpenUrl(u.clone())),
        _ => {
            state.message = format!("No {} link for this book.", label);
            None
        }
    };
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Backspace => state.close_detail(),
        KeyCode::Char('p') => return link(&book.preview_link, "preview", state),
        KeyCode::Char('b') => return link(&book.buy_link, "buy", state),
        KeyCode::Char('i') => return link(&book.info_link, "info", state),
        KeyCode::Char('s') => return Some(Action::Share(book)),
        KeyCode::Char('f') => {
            state.toggle_favorite_current();
        }
        KeyCode::Char('t') => {
            state.store.toggle_theme();
        }
        KeyCode::Down | KeyCode::Char('j') => state.scroll_detail_down(),
        KeyCode::Up | KeyCode::Char('k') => state.scroll_detail_up(),
        _ => {}
    }
    None
}
