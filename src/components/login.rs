//! Login View
//!
//! Credential form driving the session store. Already-authenticated
//! sessions skip straight to the profile.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::Redirect;

use crate::context::use_session;

#[component]
pub fn Login() -> impl IntoView {
    let ctx = use_session();

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (logging_in, set_logging_in) = signal(false);
    let (login_failed, set_login_failed) = signal(false);

    let on_login = move |_| {
        set_logging_in.set(true);
        let email_value = email.get();
        let password_value = password.get();
        spawn_local(async move {
            let ok = ctx.login(&email_value, &password_value).await;
            set_logging_in.set(false);
            set_login_failed.set(!ok);
        });
    };

    view! {
        {move || {
            if ctx.session.get().is_logged_in {
                view! { <Redirect path="/profile"/> }.into_any()
            } else {
                view! {
                    <div class="login-page">
                        <h1>"Login"</h1>
                        <div class="login-card">
                            <div class="field">
                                <label>"Email: "</label>
                                <input
                                    type="text"
                                    placeholder="Enter email"
                                    prop:value=move || email.get()
                                    on:input=move |ev| set_email.set(event_target_value(&ev))
                                />
                            </div>
                            <div class="field">
                                <label>"Password: "</label>
                                <input
                                    type="password"
                                    placeholder="Enter password"
                                    prop:value=move || password.get()
                                    on:input=move |ev| set_password.set(event_target_value(&ev))
                                />
                            </div>
                            <button on:click=on_login prop:disabled=move || logging_in.get()>
                                {move || if logging_in.get() { "Logging in..." } else { "Login" }}
                            </button>
                            <Show when=move || login_failed.get()>
                                <p class="error-text">"Login Failed: Invalid credentials"</p>
                            </Show>
                        </div>
                    </div>
                }
                .into_any()
            }
        }}
    }
}
