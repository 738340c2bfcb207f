// File: src/model.rs
use serde::{Deserialize, Serialize};

/// A catalog entry as the rest of the app sees it.
///
/// Flattened from the catalog's `Volume` wire shape. Identity is `id`; two
/// books with the same id are the same book regardless of the other fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: String,
    pub title: String,
    pub authors: Vec<String>,
    pub description: Option<String>,
    pub thumbnail_url: Option<String>,
    pub preview_link: Option<String>,
    pub buy_link: Option<String>,
    pub info_link: Option<String>,
}

impl Book {
    /// Minimal constructor, handy for fixtures and the explore tab.
    pub fn new(id: &str, title: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            authors: Vec::new(),
            description: None,
            thumbnail_url: None,
            preview_link: None,
            buy_link: None,
            info_link: None,
        }
    }

    pub fn has_thumbnail(&self) -> bool {
        self.thumbnail_url.as_deref().is_some_and(|u| !u.is_empty())
    }

    /// Comma-joined author list, `None` when the catalog reported no authors.
    pub fn joined_authors(&self) -> Option<String> {
        if self.authors.is_empty() {
            None
        } else {
            Some(self.authors.join(", "))
        }
    }
}

// --- Wire format ---

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VolumesResponse {
    #[serde(default)]
    pub items: Option<Vec<Volume>>,
}

impl VolumesResponse {
    pub fn into_books(self) -> Vec<Book> {
        self.items
            .unwrap_or_default()
            .into_iter()
            .map(Book::from)
            .collect()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Volume {
    pub id: String,
    #[serde(rename = "volumeInfo", default)]
    pub volume_info: VolumeInfo,
    #[serde(rename = "saleInfo", default)]
    pub sale_info: Option<SaleInfo>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeInfo {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub authors: Option<Vec<String>>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_links: Option<ImageLinks>,
    #[serde(default)]
    pub preview_link: Option<String>,
    #[serde(default)]
    pub buy_link: Option<String>,
    #[serde(default)]
    pub info_link: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageLinks {
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub small_thumbnail: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleInfo {
    #[serde(default)]
    pub buy_link: Option<String>,
}

impl From<Volume> for Book {
    fn from(v: Volume) -> Self {
        let info = v.volume_info;
        let thumbnail_url = info
            .image_links
            .and_then(|links| links.thumbnail.or(links.small_thumbnail));
        // The public catalog reports purchase links under saleInfo.
        let buy_link = info
            .buy_link
            .or_else(|| v.sale_info.and_then(|s| s.buy_link));

        Book {
            id: v.id,
            title: info.title,
            authors: info.authors.unwrap_or_default(),
            description: info.description,
            thumbnail_url,
            preview_link: info.preview_link,
            buy_link,
            info_link: info.info_link,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_without_items_is_empty() {
        let resp: VolumesResponse =
            serde_json::from_str(r#"{"kind":"books#volumes","totalItems":0}"#).unwrap();
        assert!(resp.into_books().is_empty());
    }

    #[test]
    fn test_volume_flattening() {
        let json = r#"{
            "items": [{
                "id": "zyTCAlFPjgYC",
                "volumeInfo": {
                    "title": "The Google Story",
                    "authors": ["David A. Vise", "Mark Malseed"],
                    "imageLinks": {"smallThumbnail": "http://s", "thumbnail": "http://t"},
                    "previewLink": "http://preview",
                    "infoLink": "http://info"
                },
                "saleInfo": {"buyLink": "http://buy"}
            }]
        }"#;
        let books = serde_json::from_str::<VolumesResponse>(json)
            .unwrap()
            .into_books();
        assert_eq!(books.len(), 1);
        let b = &books[0];
        assert_eq!(b.id, "zyTCAlFPjgYC");
        assert_eq!(b.joined_authors().as_deref(), Some("David A. Vise, Mark Malseed"));
        assert_eq!(b.thumbnail_url.as_deref(), Some("http://t"));
        assert_eq!(b.buy_link.as_deref(), Some("http://buy"));
        assert_eq!(b.info_link.as_deref(), Some("http://info"));
        assert!(b.description.is_none());
    }

    #[test]
    fn test_volume_info_buy_link_wins_over_sale_info() {
        let json = r#"{"id":"x","volumeInfo":{"title":"T","buyLink":"http://a"},"saleInfo":{"buyLink":"http://b"}}"#;
        let book = Book::from(serde_json::from_str::<Volume>(json).unwrap());
        assert_eq!(book.buy_link.as_deref(), Some("http://a"));
    }

    #[test]
    fn test_missing_volume_info_defaults() {
        let book = Book::from(serde_json::from_str::<Volume>(r#"{"id":"bare"}"#).unwrap());
        assert_eq!(book.title, "");
        assert!(book.authors.is_empty());
        assert!(!book.has_thumbnail());
        assert!(book.joined_authors().is_none());
    }
}
