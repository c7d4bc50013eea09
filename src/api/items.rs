//! Item Resource Client
//!
//! CRUD façade over the `/api/item` endpoints.

use serde::Serialize;

use super::response::{ListResponse, Page};
use super::transport::{HttpRequest, Method, Transport};
use super::ApiError;
use crate::models::Item;

/// Creation payload
#[derive(Debug, Serialize)]
pub struct NewItem<'a> {
    pub name: &'a str,
    pub category: &'a str,
    pub price: &'a str,
}

/// Partial update payload; absent fields are left untouched server-side
#[derive(Debug, Default, Serialize)]
pub struct ItemPatch<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<&'a str>,
}

/// Resource client for inventory items
pub struct ItemApi<T: Transport> {
    transport: T,
    base_url: String,
}

impl<T: Transport> ItemApi<T> {
    pub fn new(transport: T, base_url: impl Into<String>) -> Self {
        Self {
            transport,
            base_url: base_url.into(),
        }
    }

    fn url(&self, suffix: &str) -> String {
        format!("{}/api/item{}", self.base_url, suffix)
    }

    /// Fetch one page of items, tolerating both list wire shapes.
    pub async fn list(&self, page: u32, limit: u32) -> Result<Page<Item>, ApiError> {
        let request = HttpRequest::new(Method::Get, self.url(&format!("?page={page}&limit={limit}")));
        let response = self.transport.send(request).await?;
        if !response.ok() {
            return Err(ApiError::from_response(&response, "Loading items failed"));
        }
        Ok(response.json::<ListResponse<Item>>()?.normalize())
    }

    /// Fetch a single item by id.
    pub async fn get(&self, id: &str) -> Result<Item, ApiError> {
        let request = HttpRequest::new(Method::Get, self.url(&format!("/{id}")));
        let response = self.transport.send(request).await?;
        if !response.ok() {
            return Err(ApiError::from_response(&response, "Loading item failed"));
        }
        response.json()
    }

    /// Create an item. Name and price must be non-blank; the check
    /// runs before any request is issued.
    pub async fn create(&self, item: &NewItem<'_>) -> Result<(), ApiError> {
        if item.name.trim().is_empty() || item.price.trim().is_empty() {
            return Err(ApiError::Validation("Name and Price required".to_string()));
        }
        let body = serde_json::to_value(item).map_err(|err| ApiError::Decode(err.to_string()))?;
        let request = HttpRequest::new(Method::Post, self.url("")).json(body);
        let response = self.transport.send(request).await?;
        if !response.ok() {
            return Err(ApiError::from_response(&response, "Failed to add item"));
        }
        Ok(())
    }

    /// Apply a partial update; only provided fields are sent.
    pub async fn update(&self, id: &str, patch: &ItemPatch<'_>) -> Result<(), ApiError> {
        let body = serde_json::to_value(patch).map_err(|err| ApiError::Decode(err.to_string()))?;
        let request = HttpRequest::new(Method::Patch, self.url(&format!("/{id}"))).json(body);
        let response = self.transport.send(request).await?;
        if !response.ok() {
            return Err(ApiError::from_response(&response, "Failed to update item"));
        }
        Ok(())
    }

    /// Delete an item. Callers obtain user confirmation first.
    pub async fn remove(&self, id: &str) -> Result<(), ApiError> {
        let request = HttpRequest::new(Method::Delete, self.url(&format!("/{id}")));
        let response = self.transport.send(request).await?;
        if !response.ok() {
            return Err(ApiError::from_response(&response, "Failed to delete item"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::transport::testing::MockTransport;
    use crate::api::Body;

    #[tokio::test]
    async fn create_with_blank_name_issues_no_request() {
        let mock = MockTransport::default();
        let api = ItemApi::new(&mock, "http://test");

        let result = api
            .create(&NewItem {
                name: "  ",
                category: "Stationary",
                price: "5",
            })
            .await;

        assert!(matches!(result, Err(ApiError::Validation(_))));
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn create_with_blank_price_issues_no_request() {
        let mock = MockTransport::default();
        let api = ItemApi::new(&mock, "http://test");

        let result = api
            .create(&NewItem {
                name: "Pen",
                category: "Stationary",
                price: "",
            })
            .await;

        assert!(matches!(result, Err(ApiError::Validation(_))));
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn create_posts_payload_to_item_collection() {
        let mock = MockTransport::default();
        let api = ItemApi::new(&mock, "http://test");

        api.create(&NewItem {
            name: "Pen",
            category: "Stationary",
            price: "5",
        })
        .await
        .expect("create");

        let requests = mock.requests.borrow();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, Method::Post);
        assert_eq!(requests[0].url, "http://test/api/item");
        match &requests[0].body {
            Body::Json(value) => assert_eq!(value["name"], "Pen"),
            other => panic!("unexpected body: {other:?}"),
        }
    }

    #[tokio::test]
    async fn create_surfaces_server_message() {
        let mock = MockTransport::respond_with(400, r#"{"message":"price must be positive"}"#);
        let api = ItemApi::new(&mock, "http://test");

        let result = api
            .create(&NewItem {
                name: "Pen",
                category: "Stationary",
                price: "-1",
            })
            .await;

        assert_eq!(
            result,
            Err(ApiError::Server("price must be positive".to_string()))
        );
    }

    #[tokio::test]
    async fn list_requests_page_and_limit() {
        let mock = MockTransport::respond_with(200, "[]");
        let api = ItemApi::new(&mock, "http://test");

        let page = api.list(2, 5).await.expect("list");

        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 1);
        assert_eq!(
            mock.requests.borrow()[0].url,
            "http://test/api/item?page=2&limit=5"
        );
    }

    #[tokio::test]
    async fn patch_serializes_only_provided_fields() {
        let patch = ItemPatch {
            name: Some("Pen"),
            ..ItemPatch::default()
        };
        let value = serde_json::to_value(&patch).expect("patch json");
        let object = value.as_object().expect("object");
        assert_eq!(object.len(), 1);
        assert_eq!(object["name"], "Pen");
    }

    #[tokio::test]
    async fn remove_targets_the_item_by_id() {
        let mock = MockTransport::default();
        let api = ItemApi::new(&mock, "http://test");

        api.remove("42").await.expect("remove");

        let requests = mock.requests.borrow();
        assert_eq!(requests[0].method, Method::Delete);
        assert_eq!(requests[0].url, "http://test/api/item/42");
    }

    // The item view re-fetches the page after a delete settles instead
    // of patching the cached list, so the refreshed page is requested
    // strictly after the delete completed.
    #[tokio::test]
    async fn delete_then_refetch_issues_requests_in_order() {
        let mock = MockTransport::returning(vec![
            Ok(crate::api::HttpResponse {
                status: 200,
                body: String::new(),
            }),
            Ok(crate::api::HttpResponse {
                status: 200,
                body: "[]".to_string(),
            }),
        ]);
        let api = ItemApi::new(&mock, "http://test");

        api.remove("1").await.expect("remove");
        api.list(1, 5).await.expect("list");

        let requests = mock.requests.borrow();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].method, Method::Delete);
        assert_eq!(requests[1].method, Method::Get);
    }
}
