//! Profile View
//!
//! Self-service profile form with image upload/removal. Field saves
//! and image operations keep independent busy flags. Any 401 forces a
//! logout, which the auth gate turns into a redirect.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;

use crate::api::{user_api, ApiError, ProfileUpdate};
use crate::components::view_guard::ViewGuard;
use crate::config::api_base_url;
use crate::context::use_session;
use crate::dialog;
use crate::models::Profile;

#[component]
pub fn Profile() -> impl IntoView {
    let ctx = use_session();

    let (profile, set_profile) = signal(Profile::default());
    let (loading, set_loading) = signal(true);
    let (saving, set_saving) = signal(false);
    let (uploading, set_uploading) = signal(false);
    let (reload_trigger, set_reload_trigger) = signal(0u32);
    let file_input: NodeRef<leptos::html::Input> = NodeRef::new();
    let guard = ViewGuard::new();

    let reload = move || set_reload_trigger.update(|v| *v += 1);

    // Fetch the profile on mount and after every successful mutation
    Effect::new({
        let guard = guard.clone();
        move |_| {
            let _ = reload_trigger.get();
            let guard = guard.clone();
            spawn_local(async move {
                let result = user_api().profile().await;
                if !guard.active() {
                    return;
                }
                match result {
                    Ok(loaded) => {
                        set_profile.set(loaded);
                        set_loading.set(false);
                    }
                    Err(ApiError::Unauthorized) => ctx.logout().await,
                    Err(err) => {
                        web_sys::console::error_1(&format!("load profile: {err}").into());
                        set_loading.set(false);
                    }
                }
            });
        }
    });

    let on_logout = move |_| {
        spawn_local(async move {
            ctx.logout().await;
        });
    };

    let on_save = {
        let guard = guard.clone();
        move |_| {
            let current = profile.get();
            if current.firstname.trim().is_empty()
                || current.lastname.trim().is_empty()
                || current.email.trim().is_empty()
            {
                dialog::alert("First name, last name and email are required.");
                return;
            }
            set_saving.set(true);
            let guard = guard.clone();
            spawn_local(async move {
                let update = ProfileUpdate {
                    firstname: &current.firstname,
                    lastname: &current.lastname,
                    email: &current.email,
                };
                let result = user_api().update_profile(&update).await;
                if !guard.active() {
                    return;
                }
                match result {
                    Ok(echoed) => {
                        ctx.update_email(echoed.as_deref().unwrap_or(&current.email));
                        dialog::alert("Profile updated successfully.");
                        reload();
                    }
                    Err(ApiError::Unauthorized) => ctx.logout().await,
                    Err(ApiError::Network(_)) => dialog::alert("Error updating profile."),
                    Err(err) => dialog::alert(&err.to_string()),
                }
                set_saving.set(false);
            });
        }
    };

    let on_upload = {
        let guard = guard.clone();
        move |_| {
            let Some(input) = file_input.get() else {
                return;
            };
            let Some(file) = input.files().and_then(|files| files.get(0)) else {
                dialog::alert("Please select a file.");
                return;
            };
            set_uploading.set(true);
            let guard = guard.clone();
            spawn_local(async move {
                let result = user_api().upload_profile_image(&file).await;
                if !guard.active() {
                    return;
                }
                match result {
                    Ok(()) => {
                        dialog::alert("Image updated successfully.");
                        if let Some(input) = file_input.get_untracked() {
                            input.set_value("");
                        }
                        reload();
                    }
                    Err(ApiError::Unauthorized) => ctx.logout().await,
                    Err(ApiError::Network(_)) => dialog::alert("Error uploading image."),
                    Err(err) => dialog::alert(&err.to_string()),
                }
                set_uploading.set(false);
            });
        }
    };

    let on_remove_image = {
        let guard = guard.clone();
        move |_| {
            set_uploading.set(true);
            let guard = guard.clone();
            spawn_local(async move {
                let result = user_api().remove_profile_image().await;
                if !guard.active() {
                    return;
                }
                match result {
                    Ok(()) => reload(),
                    Err(ApiError::Unauthorized) => ctx.logout().await,
                    Err(ApiError::Network(_)) => dialog::alert("Error deleting image."),
                    Err(err) => dialog::alert(&err.to_string()),
                }
                set_uploading.set(false);
            });
        }
    };

    view! {
        <div class="profile-page">
            <h3>"User Profile Management"</h3>
            <div class="profile-nav">
                <A href="/users">
                    <button>"Go to User Management"</button>
                </A>
                <button on:click=on_logout>"Logout"</button>
            </div>

            <Show when=move || !loading.get() fallback=|| view! { <div>"Loading..."</div> }>
                <div class="profile-form">
                    <div class="field">
                        <label>"ID:"</label>
                        <div>{move || profile.get().id}</div>
                    </div>

                    <div class="field">
                        <label>"First Name:"</label>
                        <input
                            type="text"
                            prop:value=move || profile.get().firstname
                            on:input=move |ev| {
                                set_profile.update(|p| p.firstname = event_target_value(&ev))
                            }
                        />
                    </div>

                    <div class="field">
                        <label>"Last Name:"</label>
                        <input
                            type="text"
                            prop:value=move || profile.get().lastname
                            on:input=move |ev| {
                                set_profile.update(|p| p.lastname = event_target_value(&ev))
                            }
                        />
                    </div>

                    <div class="field">
                        <label>"Email:"</label>
                        <input
                            type="email"
                            prop:value=move || profile.get().email
                            on:input=move |ev| {
                                set_profile.update(|p| p.email = event_target_value(&ev))
                            }
                        />
                    </div>

                    <button on:click=on_save.clone() prop:disabled=move || saving.get()>
                        {move || if saving.get() { "Saving..." } else { "Save Profile" }}
                    </button>

                    <div class="profile-image-section">
                        <label>"Profile Image:"</label>
                        {move || match profile.get().profile_image {
                            Some(path) => view! {
                                <img
                                    src=format!("{}{}", api_base_url(), path)
                                    width="150"
                                    height="150"
                                    alt="Profile"
                                />
                            }
                                .into_any(),
                            None => view! { <div>"No profile image"</div> }.into_any(),
                        }}
                        <input
                            type="file"
                            accept="image/jpeg,image/png,image/gif,image/webp"
                            node_ref=file_input
                        />
                        <div class="image-actions">
                            <button
                                on:click=on_upload.clone()
                                prop:disabled=move || uploading.get()
                            >
                                {move || if uploading.get() { "Uploading..." } else { "Upload Image" }}
                            </button>
                            <button
                                on:click=on_remove_image.clone()
                                prop:disabled=move || {
                                    uploading.get() || profile.get().profile_image.is_none()
                                }
                            >
                                "Remove Image"
                            </button>
                        </div>
                    </div>
                </div>
            </Show>
        </div>
    }
}
