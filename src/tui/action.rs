use crate::client::CatalogError;
use crate::model::Book;
use crate::store::SearchTicket;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tab {
    Books,
    Explore,
}

#[derive(Debug)]
pub enum Action {
    Search(SearchTicket),
    OpenUrl(String),
    Share(Book),
    Quit,
}

#[derive(Debug)]
pub enum AppEvent {
    SearchFinished(SearchTicket, Result<Vec<Book>, CatalogError>),
    Status(String),
}
