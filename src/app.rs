//! Inventory Admin App
//!
//! Root component wiring the session provider and the client-side
//! routes. Unknown paths and the root path land on the login view.

use leptos::prelude::*;
use leptos_router::components::{Redirect, Route, Router, Routes};
use leptos_router::path;

use crate::components::{ItemDetail, Items, Login, Logout, Profile, RequireAuth, UserList};
use crate::context::SessionContext;

#[component]
pub fn App() -> impl IntoView {
    // One session store for the whole tab, seeded from local storage
    provide_context(SessionContext::new());

    view! {
        <Router>
            <main class="app-main">
                <Routes fallback=|| view! { <Redirect path="/login"/> }>
                    <Route path=path!("/") view=|| view! { <Redirect path="/login"/> }/>
                    <Route path=path!("/login") view=Login/>
                    <Route path=path!("/items") view=Items/>
                    <Route path=path!("/items/:id") view=ItemDetail/>
                    <Route
                        path=path!("/profile")
                        view=|| view! { <RequireAuth><Profile/></RequireAuth> }
                    />
                    <Route
                        path=path!("/logout")
                        view=|| view! { <RequireAuth><Logout/></RequireAuth> }
                    />
                    <Route
                        path=path!("/users")
                        view=|| view! { <RequireAuth><UserList/></RequireAuth> }
                    />
                </Routes>
            </main>
        </Router>
    }
}
