use crate::explore::{ExploreState, FEATURED};
use crate::model::Book;
use crate::presenter::SelectionState;
use crate::store::{BookStore, Theme};
use crate::tui::action::Tab;
use ratatui::widgets::ListState;

#[derive(PartialEq, Clone, Copy, Debug)]
pub enum InputMode {
    Normal,
    Searching,
}

pub struct AppState {
    // Data
    pub store: BookStore,
    pub selection: SelectionState,
    pub explore: ExploreState,

    // UI State
    pub tab: Tab,
    pub mode: InputMode,
    pub list_state: ListState,
    pub explore_state: ListState,
    pub detail_scroll: u16,
    pub message: String,

    // Cursor inside store.search.query, in chars
    pub cursor_position: usize,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(BookStore::default())
    }
}

impl AppState {
    pub fn new(store: BookStore) -> Self {
        let mut e_state = ListState::default();
        e_state.select(Some(0));

        Self {
            store,
            selection: SelectionState::default(),
            explore: ExploreState::default(),
            tab: Tab::Books,
            mode: InputMode::Normal,
            list_state: ListState::default(),
            explore_state: e_state,
            detail_scroll: 0,
            message: "Loading...".to_string(),
            cursor_position: 0,
        }
    }

    pub fn theme(&self) -> Theme {
        self.store.theme
    }

    /// Keeps the list selection inside the visible list after it changed.
    pub fn clamp_selection(&mut self) {
        let len = self.store.visible_books().len();
        if len == 0 {
            self.list_state.select(None);
        } else {
            let current = self.list_state.selected().unwrap_or(0);
            if current >= len {
                self.list_state.select(Some(len - 1));
            } else {
                self.list_state.select(Some(current));
            }
        }
    }

    /// Back to the top of a freshly loaded list.
    pub fn reset_selection(&mut self) {
        *self.list_state.offset_mut() = 0;
        if self.store.visible_books().is_empty() {
            self.list_state.select(None);
        } else {
            self.list_state.select(Some(0));
        }
    }

    pub fn get_selected_book(&self) -> Option<&Book> {
        self.list_state
            .selected()
            .and_then(|idx| self.store.visible_books().get(idx))
    }

    pub fn open_selected(&mut self) {
        if let Some(book) = self.get_selected_book().cloned() {
            self.detail_scroll = 0;
            self.selection.open(book);
        }
    }

    pub fn close_detail(&mut self) {
        self.selection.close();
        self.detail_scroll = 0;
    }

    /// Favorite toggle for the detail view if open, else the highlighted row.
    pub fn toggle_favorite_current(&mut self) -> Option<bool> {
        let book = match self.selection.selected() {
            Some(b) => b.clone(),
            None => self.get_selected_book()?.clone(),
        };
        let now_favorite = self.store.toggle_favorite(&book);
        self.clamp_selection();
        self.message = if now_favorite {
            format!("Added to favorites: {}", book.title)
        } else {
            format!("Removed from favorites: {}", book.title)
        };
        Some(now_favorite)
    }

    pub fn toggle_favorites_view(&mut self) {
        self.store.toggle_favorites_view();
        self.reset_selection();
        self.message = if self.store.search.viewing_favorites {
            format!("Favorites ({})", self.store.favorites.len())
        } else {
            "Search results".to_string()
        };
    }

    pub fn toggle_tab(&mut self) {
        self.tab = match self.tab {
            Tab::Books => Tab::Explore,
            Tab::Explore => Tab::Books,
        };
    }

    // --- INPUT HELPERS ---
    fn byte_index(&self) -> usize {
        self.store
            .search
            .query
            .char_indices()
            .map(|(i, _)| i)
            .nth(self.cursor_position)
            .unwrap_or(self.store.search.query.len())
    }
    pub fn move_cursor_left(&mut self) {
        let cursor_moved_left = self.cursor_position.saturating_sub(1);
        self.cursor_position = self.clamp_cursor(cursor_moved_left);
    }
    pub fn move_cursor_right(&mut self) {
        let cursor_moved_right = self.cursor_position.saturating_add(1);
        self.cursor_position = self.clamp_cursor(cursor_moved_right);
    }
    pub fn enter_char(&mut self, new_char: char) {
        let idx = self.byte_index();
        self.store.search.query.insert(idx, new_char);
        self.move_cursor_right();
    }
    pub fn delete_char(&mut self) {
        if self.cursor_position != 0 {
            let current_index = self.cursor_position;
            let query = &self.store.search.query;
            let before = query.chars().take(current_index - 1);
            let after = query.chars().skip(current_index);
            let edited: String = before.chain(after).collect();
            self.store.set_query(edited);
            self.move_cursor_left();
        }
    }
    pub fn cursor_to_end(&mut self) {
        self.cursor_position = self.store.search.query.chars().count();
    }
    fn clamp_cursor(&self, new_cursor_pos: usize) -> usize {
        new_cursor_pos.clamp(0, self.store.search.query.chars().count())
    }

    // --- NAVIGATION ---
    fn nav_target(&mut self) -> (&mut ListState, usize) {
        match self.tab {
            Tab::Books => {
                let len = self.store.visible_books().len();
                (&mut self.list_state, len)
            }
            Tab::Explore => (&mut self.explore_state, FEATURED.len()),
        }
    }
    pub fn next(&mut self) {
        let (list, len) = self.nav_target();
        if len == 0 {
            return;
        }
        let i = match list.selected() {
            Some(i) => {
                if i >= len - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        list.select(Some(i));
    }
    pub fn previous(&mut self) {
        let (list, len) = self.nav_target();
        if len == 0 {
            return;
        }
        let i = match list.selected() {
            Some(i) => {
                if i == 0 {
                    len - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        list.select(Some(i));
    }
    pub fn jump_forward(&mut self, step: usize) {
        let (list, len) = self.nav_target();
        if len > 0 {
            let current = list.selected().unwrap_or(0);
            list.select(Some((current + step).min(len - 1)));
        }
    }
    pub fn jump_backward(&mut self, step: usize) {
        let (list, len) = self.nav_target();
        if len > 0 {
            let current = list.selected().unwrap_or(0);
            list.select(Some(current.saturating_sub(step)));
        }
    }
    pub fn scroll_detail_down(&mut self) {
        self.detail_scroll = self.detail_scroll.saturating_add(1);
    }
    pub fn scroll_detail_up(&mut self) {
        self.detail_scroll = self.detail_scroll.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with_books(n: usize) -> AppState {
        let mut state = AppState::default();
        state.store.search.results = (0..n)
            .map(|i| Book::new(&format!("id{}", i), &format!("Book {}", i)))
            .collect();
        state.reset_selection();
        state
    }

    #[test]
    fn test_navigation_next_wraps() {
        let mut state = state_with_books(3);
        assert_eq!(state.list_state.selected(), Some(0));

        state.next();
        assert_eq!(state.list_state.selected(), Some(1));
        state.next();
        assert_eq!(state.list_state.selected(), Some(2));
        state.next();
        assert_eq!(state.list_state.selected(), Some(0));
    }

    #[test]
    fn test_navigation_previous_wraps() {
        let mut state = state_with_books(3);

        state.previous();
        assert_eq!(state.list_state.selected(), Some(2));
        state.previous();
        assert_eq!(state.list_state.selected(), Some(1));
    }

    #[test]
    fn test_navigation_empty_list_safety() {
        let mut state = state_with_books(0);
        state.next();
        state.previous();
        state.jump_forward(10);
        assert_eq!(state.list_state.selected(), None);
        assert!(state.get_selected_book().is_none());
    }

    #[test]
    fn test_explore_tab_navigates_its_own_list() {
        let mut state = state_with_books(2);
        state.toggle_tab();
        state.next();
        assert_eq!(state.explore_state.selected(), Some(1));
        assert_eq!(state.list_state.selected(), Some(0));
    }

    #[test]
    fn test_cursor_clamping() {
        let mut state = AppState::default();
        state.store.set_query("abc".to_string());
        state.cursor_position = 0;

        for _ in 0..4 {
            state.move_cursor_right();
        }
        assert_eq!(state.cursor_position, 3);

        for _ in 0..4 {
            state.move_cursor_left();
        }
        assert_eq!(state.cursor_position, 0);
    }

    #[test]
    fn test_editing_multibyte_query() {
        let mut state = AppState::default();
        for c in "café".chars() {
            state.enter_char(c);
        }
        state.move_cursor_left();
        state.enter_char('!');
        assert_eq!(state.store.search.query, "caf!é");

        state.cursor_to_end();
        state.delete_char();
        assert_eq!(state.store.search.query, "caf!");
    }

    #[test]
    fn test_unfavoriting_in_favorites_view_clamps_selection() {
        let mut state = state_with_books(2);
        state.toggle_favorite_current();
        state.next();
        state.toggle_favorite_current();
        state.toggle_favorites_view();
        assert_eq!(state.store.visible_books().len(), 2);

        state.list_state.select(Some(1));
        assert_eq!(state.toggle_favorite_current(), Some(false));
        assert_eq!(state.list_state.selected(), Some(0));
        assert_eq!(state.store.favorites.len(), 1);
    }

    #[test]
    fn test_detail_favorite_targets_open_book() {
        let mut state = state_with_books(3);
        state.next();
        state.open_selected();
        state.list_state.select(Some(0));

        state.toggle_favorite_current();
        assert!(state.store.is_favorite("id1"));
        assert!(!state.store.is_favorite("id0"));
    }
}
