//! Runtime Configuration
//!
//! Backend endpoint selection.

/// Backend base URL.
///
/// Override at compile time with the `APP_API_URL` environment
/// variable; defaults to the local development backend.
pub fn api_base_url() -> &'static str {
    option_env!("APP_API_URL").unwrap_or("http://localhost:3000")
}
