// File: src/client.rs
mod cert;
mod core;

pub use self::core::{CatalogClient, DEFAULT_CATALOG_URL, encode_query_component, volumes_uri};

use crate::model::Book;
use std::future::Future;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("invalid catalog url: {0}")]
    InvalidUrl(String),
    #[error("request failed: {0}")]
    Transport(String),
    #[error("catalog answered with HTTP {0}")]
    Status(http::StatusCode),
    #[error("malformed catalog response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Anything that can answer a volume search.
///
/// The HTTP client is the real implementation; the store only depends on this
/// trait so search flows can run against an in-memory catalog.
pub trait Catalog {
    fn search_volumes(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<Vec<Book>, CatalogError>> + Send;
}

impl Catalog for CatalogClient {
    async fn search_volumes(&self, query: &str) -> Result<Vec<Book>, CatalogError> {
        CatalogClient::search_volumes(self, query).await
    }
}
