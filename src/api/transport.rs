//! HTTP Transport
//!
//! Request/response plumbing over the browser fetch API. Resource
//! clients are generic over [`Transport`] so tests can substitute a
//! recording double for the network.

use serde_json::Value;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{FormData, Request, RequestCredentials, RequestInit, Response};

use super::ApiError;

/// HTTP method of an [`HttpRequest`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

/// Request body variants
#[derive(Debug, Clone)]
pub enum Body {
    Empty,
    Json(Value),
    Multipart(FormData),
}

/// A single backend request
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub body: Body,
    /// Send the session cookie along with the request
    pub with_credentials: bool,
}

impl HttpRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            body: Body::Empty,
            with_credentials: false,
        }
    }

    pub fn json(mut self, body: Value) -> Self {
        self.body = Body::Json(body);
        self
    }

    pub fn multipart(mut self, form: FormData) -> Self {
        self.body = Body::Multipart(form);
        self
    }

    pub fn with_credentials(mut self) -> Self {
        self.with_credentials = true;
        self
    }
}

/// Raw response: status code plus body text
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    /// 2xx status
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, ApiError> {
        serde_json::from_str(&self.body).map_err(|err| ApiError::Decode(err.to_string()))
    }
}

/// Seam between resource clients and the network
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

/// Browser fetch-backed transport
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchTransport;

impl Transport for FetchTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let init = RequestInit::new();
        init.set_method(request.method.as_str());
        if request.with_credentials {
            init.set_credentials(RequestCredentials::Include);
        }
        let mut json_body = false;
        match &request.body {
            Body::Empty => {}
            Body::Json(value) => {
                init.set_body(&JsValue::from_str(&value.to_string()));
                json_body = true;
            }
            // The browser supplies the multipart boundary header itself.
            Body::Multipart(form) => init.set_body(form.as_ref()),
        }

        let fetch_request = Request::new_with_str_and_init(&request.url, &init)
            .map_err(|err| ApiError::Network(js_error(&err)))?;
        if json_body {
            let _ = fetch_request.headers().set("Content-Type", "application/json");
        }

        let window =
            web_sys::window().ok_or_else(|| ApiError::Network("no window".to_string()))?;
        let response = JsFuture::from(window.fetch_with_request(&fetch_request))
            .await
            .map_err(|err| ApiError::Network(js_error(&err)))?;
        let response: Response = response
            .dyn_into()
            .map_err(|_| ApiError::Network("unexpected fetch result".to_string()))?;

        let status = response.status();
        let text_promise = response
            .text()
            .map_err(|err| ApiError::Network(js_error(&err)))?;
        let body = JsFuture::from(text_promise)
            .await
            .map_err(|err| ApiError::Network(js_error(&err)))?
            .as_string()
            .unwrap_or_default();

        Ok(HttpResponse { status, body })
    }
}

fn js_error(value: &JsValue) -> String {
    value
        .as_string()
        .unwrap_or_else(|| format!("{value:?}"))
}

#[cfg(test)]
pub(crate) mod testing {
    use std::cell::RefCell;

    use super::*;

    /// Transport double that records every request and replays canned
    /// responses in order. An exhausted response queue answers 200
    /// with an empty body.
    #[derive(Default)]
    pub(crate) struct MockTransport {
        pub requests: RefCell<Vec<HttpRequest>>,
        pub responses: RefCell<Vec<Result<HttpResponse, ApiError>>>,
    }

    impl MockTransport {
        pub fn returning(responses: Vec<Result<HttpResponse, ApiError>>) -> Self {
            Self {
                requests: RefCell::new(Vec::new()),
                responses: RefCell::new(responses),
            }
        }

        pub fn respond_with(status: u16, body: &str) -> Self {
            Self::returning(vec![Ok(HttpResponse {
                status,
                body: body.to_string(),
            })])
        }

        pub fn call_count(&self) -> usize {
            self.requests.borrow().len()
        }
    }

    impl Transport for &MockTransport {
        async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
            self.requests.borrow_mut().push(request);
            if self.responses.borrow().is_empty() {
                Ok(HttpResponse {
                    status: 200,
                    body: String::new(),
                })
            } else {
                self.responses.borrow_mut().remove(0)
            }
        }
    }
}
