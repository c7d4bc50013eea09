//! Logout View
//!
//! Clears the session on mount. The auth gate redirects to the login
//! view as soon as the session signal flips.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::use_session;

#[component]
pub fn Logout() -> impl IntoView {
    let ctx = use_session();

    Effect::new(move |_| {
        spawn_local(async move {
            ctx.logout().await;
        });
    });

    view! { <p>"Signing out..."</p> }
}
