//! Backend REST Clients
//!
//! HTTP façades over the item and user resources, organized by entity.

mod items;
mod response;
mod transport;
mod users;

pub use items::{ItemApi, ItemPatch, NewItem};
pub use response::{ListResponse, Page};
pub use transport::{Body, FetchTransport, HttpRequest, HttpResponse, Method, Transport};
pub use users::{NewUser, ProfileUpdate, UserApi, UserPatch};

#[cfg(test)]
pub(crate) use transport::testing;

use thiserror::Error;

use crate::config::api_base_url;

/// Unified error surface for resource client calls. Callers receive an
/// error value, never a thrown exception; retry policy stays with the
/// caller.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// Rejected locally before any request was issued
    #[error("{0}")]
    Validation(String),
    /// The server rejected the session (HTTP 401)
    #[error("Not authenticated.")]
    Unauthorized,
    /// The server rejected the request with a message
    #[error("{0}")]
    Server(String),
    /// A response arrived but did not decode as expected
    #[error("Invalid response: {0}")]
    Decode(String),
    /// Transport-level failure before any response arrived
    #[error("Network error: {0}")]
    Network(String),
}

impl ApiError {
    /// Map a non-OK response to an error. 401 always becomes
    /// [`ApiError::Unauthorized`]; otherwise the JSON `message` field
    /// is surfaced when the body parses, with `fallback` covering
    /// everything else.
    pub fn from_response(response: &HttpResponse, fallback: &str) -> Self {
        if response.status == 401 {
            return ApiError::Unauthorized;
        }

        #[derive(serde::Deserialize)]
        struct ErrorBody {
            message: Option<String>,
        }

        match serde_json::from_str::<ErrorBody>(&response.body) {
            Ok(ErrorBody {
                message: Some(message),
            }) if !message.is_empty() => ApiError::Server(message),
            _ => ApiError::Server(fallback.to_string()),
        }
    }

    /// Like [`ApiError::from_response`] but surfaces a plain-text body
    /// verbatim, for endpoints that answer failures with raw text.
    pub fn from_text_response(response: &HttpResponse, fallback: &str) -> Self {
        if response.status == 401 {
            return ApiError::Unauthorized;
        }
        if response.body.trim().is_empty() {
            ApiError::Server(fallback.to_string())
        } else {
            ApiError::Server(response.body.clone())
        }
    }
}

/// Item client wired to the browser transport
pub fn item_api() -> ItemApi<FetchTransport> {
    ItemApi::new(FetchTransport, api_base_url())
}

/// User client wired to the browser transport
pub fn user_api() -> UserApi<FetchTransport> {
    UserApi::new(FetchTransport, api_base_url())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            body: body.to_string(),
        }
    }

    #[test]
    fn unauthorized_wins_over_body_contents() {
        let err = ApiError::from_response(&response(401, r#"{"message":"nope"}"#), "fallback");
        assert_eq!(err, ApiError::Unauthorized);
    }

    #[test]
    fn json_message_is_extracted() {
        let err = ApiError::from_response(&response(400, r#"{"message":"bad price"}"#), "fallback");
        assert_eq!(err, ApiError::Server("bad price".to_string()));
    }

    #[test]
    fn undecodable_body_falls_back_to_generic_message() {
        let err = ApiError::from_response(&response(500, "<html>boom</html>"), "fallback");
        assert_eq!(err, ApiError::Server("fallback".to_string()));
    }

    #[test]
    fn text_response_is_surfaced_verbatim() {
        let err = ApiError::from_text_response(&response(409, "email already taken"), "fallback");
        assert_eq!(err, ApiError::Server("email already taken".to_string()));

        let err = ApiError::from_text_response(&response(500, "  "), "fallback");
        assert_eq!(err, ApiError::Server("fallback".to_string()));
    }
}
