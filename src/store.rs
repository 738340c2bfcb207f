// File: src/store.rs
use crate::client::{Catalog, CatalogError};
use crate::config::DEFAULT_QUERY;
use crate::model::Book;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn from_dark_flag(dark: bool) -> Self {
        if dark { Theme::Dark } else { Theme::Light }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }
}

#[derive(Debug, Clone, Default)]
pub struct SearchState {
    pub query: String,
    pub results: Vec<Book>,
    pub is_loading: bool,
    pub viewing_favorites: bool,
}

/// Favorite books keyed by id, kept in the order they were added.
#[derive(Debug, Clone, Default)]
pub struct Favorites {
    books: Vec<Book>,
}

impl Favorites {
    pub fn contains(&self, id: &str) -> bool {
        self.books.iter().any(|b| b.id == id)
    }

    /// Removes the book if present, inserts it otherwise.
    /// Returns whether the book is a favorite afterwards.
    pub fn toggle(&mut self, book: &Book) -> bool {
        if self.contains(&book.id) {
            self.books.retain(|b| b.id != book.id);
            false
        } else {
            self.books.push(book.clone());
            true
        }
    }

    pub fn as_slice(&self) -> &[Book] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}

/// Handed out when a search starts; completing with an outdated ticket is a no-op.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    seq: u64,
    query: String,
}

impl SearchTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn query(&self) -> &str {
        &self.query
    }
}

/// One rendered list entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Row<'a> {
    pub book: &'a Book,
    pub is_favorite: bool,
}

/// Search/list controller: query text, fetch lifecycle, favorites and theme.
#[derive(Debug, Clone)]
pub struct BookStore {
    pub search: SearchState,
    pub favorites: Favorites,
    pub theme: Theme,
    default_query: String,
    latest_seq: u64,
}

impl Default for BookStore {
    fn default() -> Self {
        Self::new(DEFAULT_QUERY, Theme::Light)
    }
}

impl BookStore {
    pub fn new(default_query: &str, theme: Theme) -> Self {
        Self {
            search: SearchState::default(),
            favorites: Favorites::default(),
            theme,
            default_query: default_query.to_string(),
            latest_seq: 0,
        }
    }

    pub fn default_query(&self) -> &str {
        &self.default_query
    }

    pub fn set_query(&mut self, query: String) {
        self.search.query = query;
    }

    /// Starts a search. Blank queries are ignored and return `None`.
    pub fn begin_search(&mut self, query: &str) -> Option<SearchTicket> {
        if query.trim().is_empty() {
            return None;
        }
        self.latest_seq += 1;
        self.search.is_loading = true;
        self.search.viewing_favorites = false;
        Some(SearchTicket {
            seq: self.latest_seq,
            query: query.to_string(),
        })
    }

    /// Searches for whatever is currently in the query field.
    pub fn submit_query(&mut self) -> Option<SearchTicket> {
        let query = self.search.query.clone();
        self.begin_search(&query)
    }

    /// Startup load: clears the query field and searches the default query.
    pub fn begin_default_load(&mut self) -> Option<SearchTicket> {
        self.search.query.clear();
        self.search.viewing_favorites = false;
        let query = self.default_query.clone();
        self.begin_search(&query)
    }

    /// Applies a finished fetch. Returns `false` when the ticket was superseded
    /// by a newer search and the outcome was dropped.
    ///
    /// On failure the previous results are kept.
    pub fn finish_search(
        &mut self,
        ticket: &SearchTicket,
        outcome: Result<Vec<Book>, CatalogError>,
    ) -> bool {
        if ticket.seq != self.latest_seq {
            log::debug!(
                "Discarding stale results for {:?} (#{}, latest #{})",
                ticket.query,
                ticket.seq,
                self.latest_seq
            );
            return false;
        }
        self.search.is_loading = false;
        match outcome {
            Ok(books) => {
                self.search.results = books;
            }
            Err(e) => {
                log::error!("Error fetching books for {:?}: {}", ticket.query, e);
            }
        }
        true
    }

    pub async fn search<C: Catalog>(&mut self, catalog: &C, query: &str) -> bool {
        let Some(ticket) = self.begin_search(query) else {
            return false;
        };
        let outcome = catalog.search_volumes(ticket.query()).await;
        self.finish_search(&ticket, outcome)
    }

    pub async fn load_default<C: Catalog>(&mut self, catalog: &C) -> bool {
        let Some(ticket) = self.begin_default_load() else {
            return false;
        };
        let outcome = catalog.search_volumes(ticket.query()).await;
        self.finish_search(&ticket, outcome)
    }

    pub fn toggle_favorite(&mut self, book: &Book) -> bool {
        self.favorites.toggle(book)
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.favorites.contains(id)
    }

    pub fn toggle_favorites_view(&mut self) {
        self.search.viewing_favorites = !self.search.viewing_favorites;
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.theme
    }

    /// Favorites when the favorites view is on, search results otherwise.
    pub fn visible_books(&self) -> &[Book] {
        if self.search.viewing_favorites {
            self.favorites.as_slice()
        } else {
            &self.search.results
        }
    }

    pub fn rows(&self) -> Vec<Row<'_>> {
        self.visible_books()
            .iter()
            .map(|book| Row {
                book,
                is_favorite: self.favorites.contains(&book.id),
            })
            .collect()
    }

    pub fn find_visible(&self, id: &str) -> Option<&Book> {
        self.visible_books().iter().find(|b| b.id == id)
    }
}
