//! Auth Gate
//!
//! Guard wrapper for protected routes. Re-evaluated reactively on
//! every navigation and every session change, so a forced logout
//! anywhere in the app trips the redirect.

use leptos::prelude::*;
use leptos_router::components::Redirect;

use crate::context::use_session;

/// Renders its children only for a logged-in session; everything else
/// is sent to the login view.
#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let ctx = use_session();

    view! {
        {move || {
            if ctx.session.get().is_logged_in {
                children().into_any()
            } else {
                view! { <Redirect path="/login"/> }.into_any()
            }
        }}
    }
}
