//! Browser Dialogs
//!
//! Blocking alert/confirm prompts via the window object.

use leptos::prelude::window;

/// Show a blocking alert.
pub fn alert(message: &str) {
    let _ = window().alert_with_message(message);
}

/// Ask for an explicit yes/no confirmation. Answers "no" when the
/// dialog cannot be shown.
pub fn confirm(message: &str) -> bool {
    window().confirm_with_message(message).unwrap_or(false)
}
