// File: ./src/mobile.rs
use crate::client::{CatalogClient, CatalogError};
use crate::config::Config;
use crate::explore::FEATURED;
use crate::model::Book;
use crate::paths::AppPaths;
use crate::presenter::{self, SelectionState};
use crate::store::{BookStore, SearchTicket, Theme};
use std::sync::Arc;
use tokio::sync::Mutex;

#[cfg(target_os = "android")]
use android_logger::Config as LogConfig;
#[cfg(target_os = "android")]
use log::LevelFilter;

#[derive(Debug, uniffi::Error)]
#[uniffi(flat_error)]
pub enum MobileError {
    Generic(String),
}
impl From<String> for MobileError {
    fn from(e: String) -> Self {
        Self::Generic(e)
    }
}
impl From<anyhow::Error> for MobileError {
    fn from(e: anyhow::Error) -> Self {
        Self::Generic(e.to_string())
    }
}
impl From<CatalogError> for MobileError {
    fn from(e: CatalogError) -> Self {
        Self::Generic(e.to_string())
    }
}
impl std::fmt::Display for MobileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                MobileError::Generic(s) => s,
            }
        )
    }
}
impl std::error::Error for MobileError {}

// --- DTOs ---

#[derive(uniffi::Record)]
pub struct MobileBook {
    pub id: String,
    pub title: String,
    pub authors: Vec<String>,
    pub authors_line: String,
    pub description: String,
    pub thumbnail_url: Option<String>,
    pub preview_link: Option<String>,
    pub buy_link: Option<String>,
    pub info_link: Option<String>,
    pub is_favorite: bool,
}

#[derive(uniffi::Record)]
pub struct MobileFeatured {
    pub title: String,
    pub author: String,
    pub blurb: String,
    pub search_query: String,
}

#[derive(uniffi::Record)]
pub struct MobileConfig {
    pub catalog_url: String,
    pub default_query: String,
    pub dark_theme: bool,
    pub allow_insecure: bool,
}

fn book_to_mobile(b: &Book, store: &BookStore) -> MobileBook {
    MobileBook {
        id: b.id.clone(),
        title: b.title.clone(),
        authors: b.authors.clone(),
        authors_line: presenter::authors_line(b),
        description: presenter::description_or_default(b).to_string(),
        thumbnail_url: b.thumbnail_url.clone(),
        preview_link: b.preview_link.clone(),
        buy_link: b.buy_link.clone(),
        info_link: b.info_link.clone(),
        is_favorite: store.is_favorite(&b.id),
    }
}

fn visible_rows(store: &BookStore) -> Vec<MobileBook> {
    store
        .visible_books()
        .iter()
        .map(|b| book_to_mobile(b, store))
        .collect()
}

// --- MAIN OBJECT ---

#[derive(uniffi::Object)]
pub struct FolioMobile {
    client: Arc<Mutex<Option<CatalogClient>>>,
    store: Arc<Mutex<BookStore>>,
    selection: Arc<Mutex<SelectionState>>,
}

impl FolioMobile {
    async fn client(&self) -> Result<CatalogClient, CatalogError> {
        let mut guard = self.client.lock().await;
        if let Some(c) = guard.as_ref() {
            return Ok(c.clone());
        }
        let c = CatalogClient::from_config(&Config::load_or_default())?;
        *guard = Some(c.clone());
        Ok(c)
    }

    // The store lock is not held across the network call, so a newer search
    // can start meanwhile; its ticket then wins.
    async fn run_search(&self, ticket: SearchTicket) -> Vec<MobileBook> {
        let outcome = match self.client().await {
            Ok(c) => c.search_volumes(ticket.query()).await,
            Err(e) => Err(e),
        };
        let mut store = self.store.lock().await;
        store.finish_search(&ticket, outcome);
        visible_rows(&store)
    }

    async fn find_book(&self, id: &str) -> Option<Book> {
        if let Some(b) = self.selection.lock().await.selected()
            && b.id == id
        {
            return Some(b.clone());
        }
        let store = self.store.lock().await;
        store
            .search
            .results
            .iter()
            .chain(store.favorites.as_slice())
            .find(|b| b.id == id)
            .cloned()
    }
}

#[uniffi::export(async_runtime = "tokio")]
impl FolioMobile {
    #[uniffi::constructor]
    pub fn new(android_files_dir: String) -> Self {
        #[cfg(target_os = "android")]
        android_logger::init_once(
            LogConfig::default()
                .with_max_level(LevelFilter::Debug)
                .with_tag("FolioRust"),
        );
        AppPaths::init_android_path(android_files_dir);
        let config = Config::load_or_default();
        Self {
            client: Arc::new(Mutex::new(None)),
            store: Arc::new(Mutex::new(BookStore::new(
                &config.default_query,
                Theme::from_dark_flag(config.dark_theme),
            ))),
            selection: Arc::new(Mutex::new(SelectionState::default())),
        }
    }

    pub fn get_config(&self) -> MobileConfig {
        let c = Config::load_or_default();
        MobileConfig {
            catalog_url: c.catalog_url,
            default_query: c.default_query,
            dark_theme: c.dark_theme,
            allow_insecure: c.allow_insecure_certs,
        }
    }

    pub async fn save_config(
        &self,
        catalog_url: String,
        default_query: String,
        dark_theme: bool,
        insecure: bool,
    ) -> Result<(), MobileError> {
        let mut c = Config::load_or_default();
        c.catalog_url = catalog_url;
        c.default_query = default_query;
        c.dark_theme = dark_theme;
        c.allow_insecure_certs = insecure;

        let client = CatalogClient::from_config(&c)?;
        c.save().map_err(MobileError::from)?;
        *self.client.lock().await = Some(client);
        Ok(())
    }

    /// Startup fill with the configured default query.
    pub async fn load_default(&self) -> Vec<MobileBook> {
        let ticket = {
            let mut store = self.store.lock().await;
            match store.begin_default_load() {
                Some(t) => t,
                None => return visible_rows(&store),
            }
        };
        self.run_search(ticket).await
    }

    /// Blank queries leave everything as it was.
    pub async fn search(&self, query: String) -> Vec<MobileBook> {
        let ticket = {
            let mut store = self.store.lock().await;
            store.set_query(query.clone());
            match store.begin_search(&query) {
                Some(t) => t,
                None => return visible_rows(&store),
            }
        };
        self.run_search(ticket).await
    }

    pub async fn get_visible_books(&self) -> Vec<MobileBook> {
        visible_rows(&*self.store.lock().await)
    }

    pub async fn is_loading(&self) -> bool {
        self.store.lock().await.search.is_loading
    }

    /// Returns whether the book is a favorite afterwards.
    pub async fn toggle_favorite(&self, id: String) -> Result<bool, MobileError> {
        let book = self
            .find_book(&id)
            .await
            .ok_or_else(|| MobileError::Generic(format!("Unknown book {}", id)))?;
        Ok(self.store.lock().await.toggle_favorite(&book))
    }

    pub async fn toggle_favorites_view(&self) -> Vec<MobileBook> {
        let mut store = self.store.lock().await;
        store.toggle_favorites_view();
        visible_rows(&store)
    }

    pub async fn is_viewing_favorites(&self) -> bool {
        self.store.lock().await.search.viewing_favorites
    }

    /// Returns true when the dark theme is now active.
    pub async fn toggle_theme(&self) -> bool {
        self.store.lock().await.toggle_theme().is_dark()
    }

    pub async fn is_dark_theme(&self) -> bool {
        self.store.lock().await.theme.is_dark()
    }

    pub async fn open_book(&self, id: String) -> Option<MobileBook> {
        let book = self.find_book(&id).await?;
        let dto = book_to_mobile(&book, &*self.store.lock().await);
        self.selection.lock().await.open(book);
        Some(dto)
    }

    pub async fn close_book(&self) {
        self.selection.lock().await.close();
    }

    pub async fn get_selected_book(&self) -> Option<MobileBook> {
        let selection = self.selection.lock().await;
        let book = selection.selected()?;
        let store = self.store.lock().await;
        Some(book_to_mobile(book, &store))
    }

    /// Text for the Android share sheet.
    pub async fn share_text(&self, id: String) -> Option<String> {
        let book = self.find_book(&id).await?;
        Some(presenter::share_message(&book))
    }

    pub fn get_featured(&self) -> Vec<MobileFeatured> {
        FEATURED
            .iter()
            .map(|f| MobileFeatured {
                title: f.title.to_string(),
                author: f.author.to_string(),
                blurb: f.blurb.to_string(),
                search_query: f.search_query(),
            })
            .collect()
    }
}
