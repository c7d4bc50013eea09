//! Session Store
//!
//! Client-held authentication state, persisted to local storage under
//! one durable key and rebuilt from it at startup.

use leptos::prelude::window;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::api::{ApiError, HttpRequest, Method, Transport};

/// Local storage key backing the session
pub const SESSION_KEY: &str = "session";

/// Client-held authentication status. Field names match the persisted
/// JSON, so sessions written by earlier deployments keep loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    #[serde(rename = "isLoggedIn")]
    pub is_logged_in: bool,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

impl Session {
    /// Logged-out default
    pub fn logged_out() -> Self {
        Self {
            is_logged_in: false,
            name: String::new(),
            email: String::new(),
        }
    }

    /// Session for a freshly authenticated email
    pub fn logged_in(email: &str) -> Self {
        Self {
            is_logged_in: true,
            name: String::new(),
            email: email.to_string(),
        }
    }

    /// Rebuild a session from a raw storage value. Absent or malformed
    /// values fall back to logged out instead of surfacing an error.
    pub fn from_stored(raw: Option<&str>) -> Self {
        raw.and_then(|value| serde_json::from_str(value).ok())
            .unwrap_or_else(Session::logged_out)
    }
}

/// Read the persisted session, defaulting to logged out.
pub fn load_session() -> Session {
    let raw = window()
        .local_storage()
        .ok()
        .flatten()
        .and_then(|storage| storage.get_item(SESSION_KEY).ok().flatten());
    Session::from_stored(raw.as_deref())
}

/// Write the full session to local storage synchronously. Storage
/// failures are ignored.
pub fn persist_session(session: &Session) {
    if let (Some(storage), Ok(serialized)) = (
        window().local_storage().ok().flatten(),
        serde_json::to_string(session),
    ) {
        let _ = storage.set_item(SESSION_KEY, &serialized);
    }
}

/// Authentication calls backing [`SessionContext`](crate::context::SessionContext)
pub struct AuthClient<T: Transport> {
    transport: T,
    base_url: String,
}

impl<T: Transport> AuthClient<T> {
    pub fn new(transport: T, base_url: impl Into<String>) -> Self {
        Self {
            transport,
            base_url: base_url.into(),
        }
    }

    /// Exchange credentials for a server-issued session cookie.
    /// Anything but a 200 is a failed login.
    pub async fn login(&self, email: &str, password: &str) -> Result<(), ApiError> {
        let request = HttpRequest::new(
            Method::Post,
            format!("{}/api/user/login", self.base_url),
        )
        .json(json!({ "email": email, "password": password }))
        .with_credentials();
        let response = self.transport.send(request).await?;
        if response.status == 200 {
            Ok(())
        } else {
            Err(ApiError::from_response(&response, "Invalid credentials"))
        }
    }

    /// Invalidate the server-side session.
    pub async fn logout(&self) -> Result<(), ApiError> {
        let request = HttpRequest::new(
            Method::Post,
            format!("{}/api/user/logout", self.base_url),
        )
        .with_credentials();
        let response = self.transport.send(request).await?;
        if response.ok() {
            Ok(())
        } else {
            Err(ApiError::from_response(&response, "Logout failed"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::MockTransport;
    use crate::api::HttpResponse;

    #[test]
    fn absent_storage_value_yields_logged_out_default() {
        let session = Session::from_stored(None);
        assert!(!session.is_logged_in);
        assert_eq!(session.email, "");
    }

    #[test]
    fn malformed_storage_values_yield_logged_out_default() {
        for raw in ["not json", "42", r#"{"isLoggedIn":"yes"}"#, ""] {
            let session = Session::from_stored(Some(raw));
            assert!(!session.is_logged_in, "raw value {raw:?} should not log in");
        }
    }

    #[test]
    fn valid_session_round_trips_through_storage_format() {
        let session = Session::logged_in("ada@example.com");
        let serialized = serde_json::to_string(&session).expect("serialize");
        assert!(serialized.contains("\"isLoggedIn\":true"));
        assert_eq!(Session::from_stored(Some(&serialized)), session);
    }

    #[tokio::test]
    async fn login_with_rejected_credentials_errors_after_one_request() {
        let mock = MockTransport::respond_with(401, "");
        let auth = AuthClient::new(&mock, "http://test");

        let result = auth.login("ada@example.com", "wrong").await;

        assert!(result.is_err());
        assert_eq!(mock.call_count(), 1);
        let requests = mock.requests.borrow();
        assert_eq!(requests[0].url, "http://test/api/user/login");
        assert!(requests[0].with_credentials);
    }

    #[tokio::test]
    async fn login_treats_only_200_as_success() {
        let mock = MockTransport::respond_with(204, "");
        let auth = AuthClient::new(&mock, "http://test");
        assert!(auth.login("a@b.c", "pw").await.is_err());

        let mock = MockTransport::respond_with(200, "");
        let auth = AuthClient::new(&mock, "http://test");
        assert!(auth.login("a@b.c", "pw").await.is_ok());
    }

    #[tokio::test]
    async fn logout_propagates_transport_failure() {
        let mock = MockTransport::returning(vec![Err(ApiError::Network(
            "connection refused".to_string(),
        ))]);
        let auth = AuthClient::new(&mock, "http://test");

        // The session context clears local state regardless of this result.
        assert!(auth.logout().await.is_err());
    }

    #[tokio::test]
    async fn logout_posts_with_credentials() {
        let mock = MockTransport::returning(vec![Ok(HttpResponse {
            status: 200,
            body: String::new(),
        })]);
        let auth = AuthClient::new(&mock, "http://test");

        auth.logout().await.expect("logout");

        let requests = mock.requests.borrow();
        assert_eq!(requests[0].url, "http://test/api/user/logout");
        assert!(requests[0].with_credentials);
    }
}
