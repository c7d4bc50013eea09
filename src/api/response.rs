//! List Response Normalization
//!
//! The backend answers list requests with either a bare array or a
//! pagination envelope. Both wire shapes collapse into one canonical
//! [`Page`].

use serde::Deserialize;

/// Raw list payload as found on the wire
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ListResponse<T> {
    /// `{ "data": [...], "pagination": { "totalPages": n } }`
    Envelope {
        #[serde(default = "Vec::new")]
        data: Vec<T>,
        #[serde(default)]
        pagination: Option<Pagination>,
    },
    /// Bare `[...]`
    Flat(Vec<T>),
}

/// Pagination metadata of an envelope response
#[derive(Debug, Deserialize)]
pub struct Pagination {
    #[serde(rename = "totalPages", default)]
    pub total_pages: Option<u32>,
}

/// Canonical page of entities plus pagination metadata
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_pages: u32,
}

impl<T> ListResponse<T> {
    /// Collapse either wire shape into a [`Page`]. Missing pagination
    /// metadata means a single page.
    pub fn normalize(self) -> Page<T> {
        match self {
            ListResponse::Flat(items) => Page {
                items,
                total_pages: 1,
            },
            ListResponse::Envelope { data, pagination } => Page {
                items: data,
                total_pages: pagination.and_then(|p| p.total_pages).unwrap_or(1),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Item;

    #[test]
    fn normalizes_flat_array() {
        let raw = r#"[{"_id":"1","itemName":"A","itemPrice":"1"}]"#;
        let page = serde_json::from_str::<ListResponse<Item>>(raw)
            .expect("flat shape")
            .normalize();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].name, "A");
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn normalizes_envelope_with_pagination() {
        let raw = r#"{"data":[{"_id":"1","itemName":"A","itemPrice":"1"}],"pagination":{"totalPages":2}}"#;
        let page = serde_json::from_str::<ListResponse<Item>>(raw)
            .expect("envelope shape")
            .normalize();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.total_pages, 2);
    }

    #[test]
    fn envelope_without_pagination_defaults_to_one_page() {
        let raw = r#"{"data":[]}"#;
        let page = serde_json::from_str::<ListResponse<Item>>(raw)
            .expect("envelope without pagination")
            .normalize();
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 1);
    }
}
