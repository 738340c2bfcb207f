// File: src/presenter.rs
use crate::model::Book;
use crate::platform::{ShareSheet, UrlOpener};

pub const AUTHORS_UNAVAILABLE: &str = "Author info unavailable";
pub const NO_DESCRIPTION: &str = "No description available";
pub const MISSING_LINK: &str = "N/A";

/// Which book the detail view shows. Hidden when nothing is selected.
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    selected: Option<Book>,
}

impl SelectionState {
    pub fn open(&mut self, book: Book) {
        self.selected = Some(book);
    }

    pub fn close(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<&Book> {
        self.selected.as_ref()
    }

    pub fn is_visible(&self) -> bool {
        self.selected.is_some()
    }
}

/// `By: a, b` for the detail header.
pub fn authors_line(book: &Book) -> String {
    match book.joined_authors() {
        Some(a) => format!("By: {}", a),
        None => AUTHORS_UNAVAILABLE.to_string(),
    }
}

pub fn description_or_default(book: &Book) -> &str {
    book.description
        .as_deref()
        .filter(|d| !d.trim().is_empty())
        .unwrap_or(NO_DESCRIPTION)
}

/// Plain-text payload handed to the share sheet.
pub fn share_message(book: &Book) -> String {
    let authors = book
        .joined_authors()
        .unwrap_or_else(|| AUTHORS_UNAVAILABLE.to_string());
    format!(
        "Check out this book: {}\nAuthors: {}\nPreview: {}\nBuy: {}",
        book.title,
        authors,
        book.preview_link.as_deref().unwrap_or(MISSING_LINK),
        book.buy_link.as_deref().unwrap_or(MISSING_LINK),
    )
}

/// Opens `url` if there is one. Failures are logged, never returned.
/// Returns whether the opener accepted the link.
pub fn open_external(opener: &dyn UrlOpener, url: Option<&str>) -> bool {
    let Some(url) = url.filter(|u| !u.is_empty()) else {
        return false;
    };
    match opener.open_url(url) {
        Ok(()) => true,
        Err(e) => {
            log::error!("Failed to open link {}: {}", url, e);
            false
        }
    }
}

/// Hands the share text to the platform. Failures are logged, never returned.
pub fn share(sheet: &dyn ShareSheet, book: &Book) -> bool {
    match sheet.share_text(&share_message(book)) {
        Ok(()) => true,
        Err(e) => {
            log::error!("Error sharing {:?}: {}", book.title, e);
            false
        }
    }
}
