//! User Resource Client
//!
//! CRUD façade over the `/api/user` endpoints, including the profile
//! self-service calls and the image attachment sub-flow.

use serde::{Deserialize, Serialize};
use web_sys::{File, FormData};

use super::response::ListResponse;
use super::transport::{HttpRequest, Method, Transport};
use super::ApiError;
use crate::models::{Profile, User};

/// Creation payload. The only place a password crosses the wire.
#[derive(Debug, Serialize)]
pub struct NewUser<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub firstname: &'a str,
    pub lastname: &'a str,
}

/// Partial update payload for a managed user
#[derive(Debug, Default, Serialize)]
pub struct UserPatch<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub firstname: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lastname: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<&'a str>,
}

/// Profile self-update payload
#[derive(Debug, Serialize)]
pub struct ProfileUpdate<'a> {
    pub firstname: &'a str,
    pub lastname: &'a str,
    pub email: &'a str,
}

#[derive(Deserialize)]
struct ImageResponse {
    #[serde(rename = "imageUrl")]
    image_url: String,
}

/// PUT /api/user/profile may echo the accepted fields back under `data`.
#[derive(Deserialize)]
struct ProfileEnvelope {
    #[serde(default)]
    data: Option<ProfileEcho>,
}

#[derive(Deserialize)]
struct ProfileEcho {
    #[serde(default)]
    email: Option<String>,
}

/// Image uploads are gated on MIME type before any request is built.
fn validate_image_type(mime: &str) -> Result<(), ApiError> {
    if mime.starts_with("image/") {
        Ok(())
    } else {
        Err(ApiError::Validation(
            "Only image files are allowed.".to_string(),
        ))
    }
}

fn image_form(file: &File) -> Result<FormData, ApiError> {
    let form = FormData::new().map_err(|_| ApiError::Network("form construction".to_string()))?;
    form.append_with_blob("file", file)
        .map_err(|_| ApiError::Network("form construction".to_string()))?;
    Ok(form)
}

/// Resource client for managed users and the logged-in profile
pub struct UserApi<T: Transport> {
    transport: T,
    base_url: String,
}

impl<T: Transport> UserApi<T> {
    pub fn new(transport: T, base_url: impl Into<String>) -> Self {
        Self {
            transport,
            base_url: base_url.into(),
        }
    }

    fn url(&self, suffix: &str) -> String {
        format!("{}/api/user{}", self.base_url, suffix)
    }

    /// Fetch all users, tolerating both list wire shapes.
    pub async fn list(&self) -> Result<Vec<User>, ApiError> {
        let request = HttpRequest::new(Method::Get, self.url(""));
        let response = self.transport.send(request).await?;
        if !response.ok() {
            return Err(ApiError::from_response(&response, "Loading users failed"));
        }
        Ok(response.json::<ListResponse<User>>()?.normalize().items)
    }

    /// Create a user. Username, email and password must be non-blank;
    /// the check runs before any request is issued. Server failures
    /// surface the response text verbatim.
    pub async fn create(&self, user: &NewUser<'_>) -> Result<(), ApiError> {
        if user.username.trim().is_empty()
            || user.email.trim().is_empty()
            || user.password.trim().is_empty()
        {
            return Err(ApiError::Validation(
                "Username, email and password are required".to_string(),
            ));
        }
        let body = serde_json::to_value(user).map_err(|err| ApiError::Decode(err.to_string()))?;
        let request = HttpRequest::new(Method::Post, self.url("")).json(body);
        let response = self.transport.send(request).await?;
        if !response.ok() {
            return Err(ApiError::from_text_response(&response, "Create failed"));
        }
        Ok(())
    }

    /// Apply a partial update; only provided fields are sent.
    pub async fn update(&self, id: &str, patch: &UserPatch<'_>) -> Result<(), ApiError> {
        let body = serde_json::to_value(patch).map_err(|err| ApiError::Decode(err.to_string()))?;
        let request = HttpRequest::new(Method::Patch, self.url(&format!("/{id}"))).json(body);
        let response = self.transport.send(request).await?;
        if !response.ok() {
            return Err(ApiError::from_text_response(&response, "Failed to update"));
        }
        Ok(())
    }

    /// Delete a user. Callers obtain user confirmation first.
    pub async fn remove(&self, id: &str) -> Result<(), ApiError> {
        let request = HttpRequest::new(Method::Delete, self.url(&format!("/{id}")));
        let response = self.transport.send(request).await?;
        if !response.ok() {
            return Err(ApiError::from_response(&response, "Failed to delete user"));
        }
        Ok(())
    }

    /// Upload a managed user's profile image. Returns the stored image
    /// URL for the caller's local list patch.
    pub async fn upload_image(&self, id: &str, file: &File) -> Result<String, ApiError> {
        validate_image_type(&file.type_())?;
        let request = HttpRequest::new(Method::Post, self.url(&format!("/{id}/image")))
            .multipart(image_form(file)?);
        let response = self.transport.send(request).await?;
        if !response.ok() {
            return Err(ApiError::from_response(&response, "Failed to upload image."));
        }
        Ok(response.json::<ImageResponse>()?.image_url)
    }

    /// Remove a managed user's profile image.
    pub async fn remove_image(&self, id: &str) -> Result<(), ApiError> {
        let request = HttpRequest::new(Method::Delete, self.url(&format!("/{id}/image")));
        let response = self.transport.send(request).await?;
        if !response.ok() {
            return Err(ApiError::from_response(&response, "Failed to remove image."));
        }
        Ok(())
    }

    /// Fetch the logged-in user's profile. A 401 maps to
    /// [`ApiError::Unauthorized`] so callers can force a logout.
    pub async fn profile(&self) -> Result<Profile, ApiError> {
        let request = HttpRequest::new(Method::Get, self.url("/profile")).with_credentials();
        let response = self.transport.send(request).await?;
        if !response.ok() {
            return Err(ApiError::from_response(&response, "Loading profile failed"));
        }
        response.json()
    }

    /// Update the logged-in user's profile. Returns the email the
    /// server echoed back, when it did.
    pub async fn update_profile(
        &self,
        update: &ProfileUpdate<'_>,
    ) -> Result<Option<String>, ApiError> {
        let body = serde_json::to_value(update).map_err(|err| ApiError::Decode(err.to_string()))?;
        let request = HttpRequest::new(Method::Put, self.url("/profile"))
            .json(body)
            .with_credentials();
        let response = self.transport.send(request).await?;
        if !response.ok() {
            return Err(ApiError::from_response(&response, "Failed to update profile."));
        }
        let echoed = serde_json::from_str::<ProfileEnvelope>(&response.body)
            .ok()
            .and_then(|envelope| envelope.data)
            .and_then(|echo| echo.email);
        Ok(echoed)
    }

    /// Upload the logged-in user's profile image. The caller re-fetches
    /// the profile afterwards.
    pub async fn upload_profile_image(&self, file: &File) -> Result<(), ApiError> {
        validate_image_type(&file.type_())?;
        let request = HttpRequest::new(Method::Post, self.url("/profile/image"))
            .multipart(image_form(file)?)
            .with_credentials();
        let response = self.transport.send(request).await?;
        if !response.ok() {
            return Err(ApiError::from_response(&response, "Failed to update image."));
        }
        Ok(())
    }

    /// Remove the logged-in user's profile image.
    pub async fn remove_profile_image(&self) -> Result<(), ApiError> {
        let request =
            HttpRequest::new(Method::Delete, self.url("/profile/image")).with_credentials();
        let response = self.transport.send(request).await?;
        if !response.ok() {
            return Err(ApiError::from_response(&response, "Failed to delete image."));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::transport::testing::MockTransport;

    #[tokio::test]
    async fn create_with_missing_required_fields_issues_no_request() {
        let mock = MockTransport::default();
        let api = UserApi::new(&mock, "http://test");

        let result = api
            .create(&NewUser {
                username: "ada",
                email: "",
                password: "secret",
                firstname: "Ada",
                lastname: "Lovelace",
            })
            .await;

        assert!(matches!(result, Err(ApiError::Validation(_))));
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn create_failure_surfaces_response_text() {
        let mock = MockTransport::respond_with(409, "email already taken");
        let api = UserApi::new(&mock, "http://test");

        let result = api
            .create(&NewUser {
                username: "ada",
                email: "ada@example.com",
                password: "secret",
                firstname: "",
                lastname: "",
            })
            .await;

        assert_eq!(
            result,
            Err(ApiError::Server("email already taken".to_string()))
        );
    }

    #[tokio::test]
    async fn list_normalizes_flat_array() {
        let mock = MockTransport::respond_with(200, r#"[{"_id":"u1","username":"ada"}]"#);
        let api = UserApi::new(&mock, "http://test");

        let users = api.list().await.expect("list");

        assert_eq!(users.len(), 1);
        assert_eq!(users[0].username, "ada");
        assert_eq!(mock.requests.borrow()[0].url, "http://test/api/user");
    }

    #[tokio::test]
    async fn profile_maps_401_to_unauthorized() {
        let mock = MockTransport::respond_with(401, "");
        let api = UserApi::new(&mock, "http://test");

        let result = api.profile().await;

        assert_eq!(result, Err(ApiError::Unauthorized));
        assert!(mock.requests.borrow()[0].with_credentials);
    }

    #[tokio::test]
    async fn update_profile_returns_echoed_email() {
        let mock = MockTransport::respond_with(200, r#"{"data":{"email":"new@example.com"}}"#);
        let api = UserApi::new(&mock, "http://test");

        let echoed = api
            .update_profile(&ProfileUpdate {
                firstname: "Ada",
                lastname: "Lovelace",
                email: "new@example.com",
            })
            .await
            .expect("update");

        assert_eq!(echoed, Some("new@example.com".to_string()));
    }

    #[tokio::test]
    async fn update_profile_tolerates_bodies_without_echo() {
        let mock = MockTransport::respond_with(200, r#"{"ok":true}"#);
        let api = UserApi::new(&mock, "http://test");

        let echoed = api
            .update_profile(&ProfileUpdate {
                firstname: "Ada",
                lastname: "Lovelace",
                email: "a@b.c",
            })
            .await
            .expect("update");

        assert_eq!(echoed, None);
    }

    #[test]
    fn non_image_mime_types_are_rejected() {
        assert!(matches!(
            validate_image_type("text/plain"),
            Err(ApiError::Validation(_))
        ));
        assert!(validate_image_type("image/png").is_ok());
    }

    #[tokio::test]
    async fn user_patch_serializes_only_provided_fields() {
        let patch = UserPatch {
            email: Some("a@b.c"),
            ..UserPatch::default()
        };
        let value = serde_json::to_value(&patch).expect("patch json");
        let object = value.as_object().expect("object");
        assert_eq!(object.len(), 1);
        assert_eq!(object["email"], "a@b.c");
    }
}
