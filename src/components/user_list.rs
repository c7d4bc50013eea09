//! User Management View
//!
//! Account table with a creation form and a modal editor. Field saves
//! patch the cached list from the draft; deletes patch it by removal;
//! image changes patch both the list row and the open draft.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;

use crate::api::{user_api, ApiError, NewUser, UserPatch};
use crate::components::view_guard::ViewGuard;
use crate::config::api_base_url;
use crate::dialog;
use crate::models::{NewUserDraft, User};

#[component]
pub fn UserList() -> impl IntoView {
    let (users, set_users) = signal(Vec::<User>::new());
    let (modal_open, set_modal_open) = signal(false);
    // Draft of the user open in the modal editor
    let (editing, set_editing) = signal::<Option<User>>(None);
    let (uploading, set_uploading) = signal(false);
    let (new_user, set_new_user) = signal(NewUserDraft::default());
    let (reload_trigger, set_reload_trigger) = signal(0u32);
    let file_input: NodeRef<leptos::html::Input> = NodeRef::new();
    let guard = ViewGuard::new();

    let reload = move || set_reload_trigger.update(|v| *v += 1);

    // Fetch all users on mount, on Refresh and after every creation
    Effect::new({
        let guard = guard.clone();
        move |_| {
            let _ = reload_trigger.get();
            let guard = guard.clone();
            spawn_local(async move {
                let result = user_api().list().await;
                if !guard.active() {
                    return;
                }
                match result {
                    Ok(loaded) => set_users.set(loaded),
                    Err(err) => {
                        web_sys::console::error_1(&format!("load users: {err}").into());
                    }
                }
            });
        }
    });

    // Patch the cached row and the open draft together so the modal
    // and the table never disagree.
    let sync_image = move |user_id: String, image: Option<String>| {
        set_users.update(|list| {
            if let Some(user) = list.iter_mut().find(|u| u.id == user_id) {
                user.profile_image = image.clone();
            }
        });
        set_editing.update(|draft| {
            if let Some(user) = draft.as_mut() {
                if user.id == user_id {
                    user.profile_image = image;
                }
            }
        });
    };

    let on_create = {
        let guard = guard.clone();
        move |ev: web_sys::SubmitEvent| {
            ev.prevent_default();
            let draft = new_user.get();
            let guard = guard.clone();
            spawn_local(async move {
                let payload = NewUser {
                    username: &draft.username,
                    email: &draft.email,
                    password: &draft.password,
                    firstname: &draft.firstname,
                    lastname: &draft.lastname,
                };
                let result = user_api().create(&payload).await;
                if !guard.active() {
                    return;
                }
                match result {
                    Ok(()) => {
                        reload();
                        set_new_user.set(NewUserDraft::default());
                        dialog::alert("User created. They can now log in.");
                    }
                    Err(ApiError::Validation(message)) => dialog::alert(&message),
                    Err(err) => dialog::alert(&format!("Create failed: {err}")),
                }
            });
        }
    };

    let on_delete = move |id: String| {
        if !dialog::confirm("Are you sure you want to delete this user?") {
            return;
        }
        spawn_local(async move {
            match user_api().remove(&id).await {
                // Patch the cached list instead of re-fetching
                Ok(()) => set_users.update(|list| list.retain(|u| u.id != id)),
                Err(_) => dialog::alert("Failed to delete user"),
            }
        });
    };

    let on_save = move |_| {
        let Some(draft) = editing.get() else {
            return;
        };
        spawn_local(async move {
            let patch = UserPatch {
                firstname: Some(&draft.firstname),
                lastname: Some(&draft.lastname),
                email: Some(&draft.email),
            };
            match user_api().update(&draft.id, &patch).await {
                Ok(()) => {
                    // The committed draft becomes the cached row
                    set_users.update(|list| {
                        if let Some(user) = list.iter_mut().find(|u| u.id == draft.id) {
                            *user = draft.clone();
                        }
                    });
                    set_modal_open.set(false);
                    dialog::alert("User updated successfully!");
                }
                Err(ApiError::Network(err)) => {
                    web_sys::console::error_1(&format!("update user: {err}").into());
                }
                Err(err) => dialog::alert(&format!("Failed to update. {err}")),
            }
        });
    };

    let on_upload = {
        let guard = guard.clone();
        move |_| {
            let Some(draft) = editing.get() else {
                return;
            };
            let Some(input) = file_input.get() else {
                return;
            };
            let Some(file) = input.files().and_then(|files| files.get(0)) else {
                dialog::alert("Please choose an image file.");
                return;
            };
            set_uploading.set(true);
            let guard = guard.clone();
            spawn_local(async move {
                let result = user_api().upload_image(&draft.id, &file).await;
                if !guard.active() {
                    return;
                }
                match result {
                    Ok(image_url) => {
                        sync_image(draft.id.clone(), Some(image_url));
                        if let Some(input) = file_input.get_untracked() {
                            input.set_value("");
                        }
                        dialog::alert("Profile image updated.");
                    }
                    Err(ApiError::Network(_)) => dialog::alert("Failed to upload image."),
                    Err(err) => dialog::alert(&err.to_string()),
                }
                set_uploading.set(false);
            });
        }
    };

    let on_remove_image = {
        let guard = guard.clone();
        move |_| {
            let Some(draft) = editing.get() else {
                return;
            };
            set_uploading.set(true);
            let guard = guard.clone();
            spawn_local(async move {
                let result = user_api().remove_image(&draft.id).await;
                if !guard.active() {
                    return;
                }
                match result {
                    Ok(()) => {
                        sync_image(draft.id.clone(), None);
                        if let Some(input) = file_input.get_untracked() {
                            input.set_value("");
                        }
                    }
                    Err(ApiError::Network(_)) => dialog::alert("Failed to remove image."),
                    Err(err) => dialog::alert(&err.to_string()),
                }
                set_uploading.set(false);
            });
        }
    };

    view! {
        <div class="user-page">
            <div class="user-card">
                <div class="user-header">
                    <div>
                        <h2>"User Management"</h2>
                        <p class="subtitle">"Create, edit or remove accounts"</p>
                    </div>
                    <div class="header-actions">
                        <A href="/profile">
                            <button class="btn-ghost">"Back to Profile"</button>
                        </A>
                        <button class="btn-primary" on:click=move |_| reload()>
                            "Refresh"
                        </button>
                    </div>
                </div>

                <form class="new-user-form" on:submit=on_create>
                    <div class="field">
                        <label>"Username"</label>
                        <input
                            prop:value=move || new_user.get().username
                            on:input=move |ev| {
                                set_new_user.update(|d| d.username = event_target_value(&ev))
                            }
                        />
                    </div>
                    <div class="field">
                        <label>"Email"</label>
                        <input
                            type="email"
                            prop:value=move || new_user.get().email
                            on:input=move |ev| {
                                set_new_user.update(|d| d.email = event_target_value(&ev))
                            }
                        />
                    </div>
                    <div class="field">
                        <label>"Password"</label>
                        <input
                            type="password"
                            prop:value=move || new_user.get().password
                            on:input=move |ev| {
                                set_new_user.update(|d| d.password = event_target_value(&ev))
                            }
                        />
                    </div>
                    <div class="field">
                        <label>"First Name"</label>
                        <input
                            prop:value=move || new_user.get().firstname
                            on:input=move |ev| {
                                set_new_user.update(|d| d.firstname = event_target_value(&ev))
                            }
                        />
                    </div>
                    <div class="field">
                        <label>"Last Name"</label>
                        <input
                            prop:value=move || new_user.get().lastname
                            on:input=move |ev| {
                                set_new_user.update(|d| d.lastname = event_target_value(&ev))
                            }
                        />
                    </div>
                    <button class="btn-primary" type="submit">
                        "Add User"
                    </button>
                </form>

                <table class="user-table">
                    <thead>
                        <tr>
                            <th>"Photo"</th>
                            <th>"Name"</th>
                            <th>"Email"</th>
                            <th>"Status"</th>
                            <th>"Actions"</th>
                        </tr>
                    </thead>
                    <tbody>
                        <Show when=move || users.get().is_empty()>
                            <tr>
                                <td colspan="5" class="empty-cell">
                                    "No users found."
                                </td>
                            </tr>
                        </Show>
                        <For
                            each=move || users.get()
                            key=|user| user.id.clone()
                            children=move |user: User| {
                                let delete_id = user.id.clone();
                                let open_user = user.clone();
                                view! {
                                    <tr class="user-row">
                                        <td>
                                            {match user.profile_image.clone() {
                                                Some(path) => view! {
                                                    <img
                                                        src=format!("{}{}", api_base_url(), path)
                                                        alt="User"
                                                        width="44"
                                                        height="44"
                                                        class="avatar"
                                                    />
                                                }
                                                    .into_any(),
                                                None => view! {
                                                    <div class="avatar-placeholder">"N/A"</div>
                                                }
                                                    .into_any(),
                                            }}
                                        </td>
                                        <td>
                                            <div class="user-name">
                                                {format!("{} {}", user.firstname, user.lastname)}
                                            </div>
                                            <div class="user-handle">{format!("@{}", user.username)}</div>
                                        </td>
                                        <td>{user.email.clone()}</td>
                                        <td>
                                            <span class="pill">{user.status.clone()}</span>
                                        </td>
                                        <td>
                                            <button
                                                class="btn-ghost"
                                                on:click=move |_| {
                                                    set_editing.set(Some(open_user.clone()));
                                                    set_modal_open.set(true);
                                                }
                                            >
                                                "Edit"
                                            </button>
                                            <button
                                                class="btn-danger"
                                                on:click=move |_| on_delete(delete_id.clone())
                                            >
                                                "Delete"
                                            </button>
                                        </td>
                                    </tr>
                                }
                            }
                        />
                    </tbody>
                </table>
            </div>

            <Show when=move || modal_open.get()>
                <div class="modal-backdrop" on:click=move |_| set_modal_open.set(false)>
                    <div class="modal" on:click=|ev| ev.stop_propagation()>
                        <div class="user-header">
                            <h3>"Edit User"</h3>
                            <button class="btn-ghost" on:click=move |_| set_modal_open.set(false)>
                                "Close"
                            </button>
                        </div>

                        <div class="form-grid">
                            <div class="field field-wide">
                                <label>"Profile Image"</label>
                                {move || match editing.get().and_then(|u| u.profile_image) {
                                    Some(path) => view! {
                                        <img
                                            src=format!("{}{}", api_base_url(), path)
                                            alt="Profile"
                                            width="90"
                                            height="90"
                                            class="avatar"
                                        />
                                    }
                                        .into_any(),
                                    None => view! {
                                        <div class="muted">"No profile image"</div>
                                    }
                                        .into_any(),
                                }}
                                <input
                                    type="file"
                                    accept="image/jpeg,image/png,image/gif,image/webp"
                                    node_ref=file_input
                                />
                                <div class="image-actions">
                                    <button
                                        class="btn-primary"
                                        on:click=on_upload.clone()
                                        prop:disabled=move || uploading.get()
                                    >
                                        {move || if uploading.get() { "Uploading..." } else { "Upload" }}
                                    </button>
                                    <button
                                        class="btn-ghost"
                                        on:click=on_remove_image.clone()
                                        prop:disabled=move || {
                                            uploading.get()
                                                || editing
                                                    .get()
                                                    .and_then(|u| u.profile_image)
                                                    .is_none()
                                        }
                                    >
                                        "Remove"
                                    </button>
                                </div>
                            </div>

                            <div class="field">
                                <label>"First Name"</label>
                                <input
                                    type="text"
                                    prop:value=move || {
                                        editing.get().map(|u| u.firstname).unwrap_or_default()
                                    }
                                    on:input=move |ev| {
                                        set_editing.update(|draft| {
                                            if let Some(user) = draft.as_mut() {
                                                user.firstname = event_target_value(&ev);
                                            }
                                        })
                                    }
                                />
                            </div>
                            <div class="field">
                                <label>"Last Name"</label>
                                <input
                                    type="text"
                                    prop:value=move || {
                                        editing.get().map(|u| u.lastname).unwrap_or_default()
                                    }
                                    on:input=move |ev| {
                                        set_editing.update(|draft| {
                                            if let Some(user) = draft.as_mut() {
                                                user.lastname = event_target_value(&ev);
                                            }
                                        })
                                    }
                                />
                            </div>
                            <div class="field">
                                <label>"Email"</label>
                                <input
                                    type="email"
                                    prop:value=move || {
                                        editing.get().map(|u| u.email).unwrap_or_default()
                                    }
                                    on:input=move |ev| {
                                        set_editing.update(|draft| {
                                            if let Some(user) = draft.as_mut() {
                                                user.email = event_target_value(&ev);
                                            }
                                        })
                                    }
                                />
                            </div>
                        </div>

                        <div class="modal-actions">
                            <button class="btn-primary" on:click=on_save>
                                "Save"
                            </button>
                            <button
                                class="btn-danger"
                                on:click=move |_| {
                                    if let Some(user) = editing.get() {
                                        on_delete(user.id);
                                    }
                                }
                            >
                                "Delete"
                            </button>
                        </div>
                    </div>
                </div>
            </Show>
        </div>
    }
}
