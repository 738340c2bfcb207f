// File: src/client/core.rs

use crate::client::CatalogError;
use crate::client::cert::NoVerifier;
use crate::config::Config;
use crate::model::{Book, VolumesResponse};

use http::{Request, Uri};
use http_body_util::BodyExt;
use hyper_rustls::HttpsConnectorBuilder;
use hyper_util::client::legacy::Client;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::rt::TokioExecutor;
use std::fmt::Write;
use std::sync::Arc;

pub const DEFAULT_CATALOG_URL: &str = "https://www.googleapis.com/books/v1";

type HttpsClient = Client<hyper_rustls::HttpsConnector<HttpConnector>, String>;

/// Percent-encodes a query value the way `encodeURIComponent` does.
///
/// Unreserved marks `- _ . ! ~ * ' ( )` and ASCII alphanumerics pass through,
/// every other UTF-8 byte becomes `%XX`.
pub fn encode_query_component(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => out.push(byte as char),
            _ => {
                let _ = write!(out, "%{:02X}", byte);
            }
        }
    }
    out
}

/// `{base}/volumes?q={query}`
pub fn volumes_uri(base_url: &str, query: &str) -> Result<Uri, CatalogError> {
    let raw = format!(
        "{}/volumes?q={}",
        base_url.trim_end_matches('/'),
        encode_query_component(query)
    );
    raw.parse::<Uri>()
        .map_err(|e| CatalogError::InvalidUrl(format!("{}: {}", raw, e)))
}

#[derive(Clone, Debug)]
pub struct CatalogClient {
    http: HttpsClient,
    base_url: String,
}

impl CatalogClient {
    pub fn new(base_url: &str, insecure: bool) -> Result<Self, CatalogError> {
        let base_url = base_url.trim_end_matches('/').to_string();
        let uri: Uri = base_url
            .parse()
            .map_err(|e: http::uri::InvalidUri| CatalogError::InvalidUrl(e.to_string()))?;
        if uri.scheme().is_none() || uri.authority().is_none() {
            return Err(CatalogError::InvalidUrl(format!(
                "{} is not an absolute URL",
                base_url
            )));
        }

        let https_connector = if insecure {
            let tls_config = rustls::ClientConfig::builder()
                .dangerous()
                .with_custom_certificate_verifier(Arc::new(NoVerifier))
                .with_no_client_auth();
            HttpsConnectorBuilder::new()
                .with_tls_config(tls_config)
                .https_or_http()
                .enable_http1()
                .build()
        } else {
            let mut root_store = rustls::RootCertStore::empty();
            let result = rustls_native_certs::load_native_certs();
            root_store.add_parsable_certificates(result.certs);
            if root_store.is_empty() {
                // Plain http mirrors still work; https requests will fail at handshake.
                log::warn!("No valid system certificates found");
            }
            let tls_config = rustls::ClientConfig::builder()
                .with_root_certificates(root_store)
                .with_no_client_auth();
            HttpsConnectorBuilder::new()
                .with_tls_config(tls_config)
                .https_or_http()
                .enable_http1()
                .build()
        };

        let http = Client::builder(TokioExecutor::new()).build(https_connector);
        Ok(Self { http, base_url })
    }

    pub fn from_config(config: &Config) -> Result<Self, CatalogError> {
        Self::new(&config.catalog_url, config.allow_insecure_certs)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// One GET against the volumes endpoint. A response without `items`
    /// yields an empty list.
    pub async fn search_volumes(&self, query: &str) -> Result<Vec<Book>, CatalogError> {
        let uri = volumes_uri(&self.base_url, query)?;
        log::debug!("GET {}", uri);

        let req = Request::get(uri)
            .body(String::new())
            .map_err(|e| CatalogError::InvalidUrl(e.to_string()))?;

        let resp = self
            .http
            .request(req)
            .await
            .map_err(|e| CatalogError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(CatalogError::Status(status));
        }

        let body = resp
            .into_body()
            .collect()
            .await
            .map_err(|e| CatalogError::Transport(e.to_string()))?
            .to_bytes();

        let parsed: VolumesResponse = serde_json::from_slice(&body)?;
        let books = parsed.into_books();
        log::debug!("Catalog returned {} volumes for {:?}", books.len(), query);
        Ok(books)
    }
}
