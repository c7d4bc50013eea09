//! Item Detail View
//!
//! Standalone edit form for one item, reached via `/items/:id`. A
//! successful update navigates back to the item list.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::{use_navigate, use_params_map};

use crate::api::{item_api, ItemPatch};
use crate::components::view_guard::ViewGuard;
use crate::dialog;
use crate::models::{ItemDraft, ITEM_CATEGORIES};

#[component]
pub fn ItemDetail() -> impl IntoView {
    let params = use_params_map();
    let navigate = use_navigate();
    let (draft, set_draft) = signal(ItemDraft::default());
    let guard = ViewGuard::new();

    let item_id = move || params.get().get("id").unwrap_or_default();

    // Load the item into the draft when the route parameter settles
    Effect::new({
        let guard = guard.clone();
        move |_| {
            let id = item_id();
            if id.is_empty() {
                return;
            }
            let guard = guard.clone();
            spawn_local(async move {
                let result = item_api().get(&id).await;
                if !guard.active() {
                    return;
                }
                match result {
                    Ok(item) => set_draft.set(ItemDraft::from_item(&item)),
                    Err(err) => {
                        web_sys::console::error_1(&format!("load item: {err}").into());
                    }
                }
            });
        }
    });

    let on_update = move |_| {
        let id = item_id();
        let current = draft.get();
        let navigate = navigate.clone();
        spawn_local(async move {
            let patch = ItemPatch {
                name: Some(&current.name),
                category: Some(&current.category),
                price: Some(&current.price),
                status: None,
            };
            match item_api().update(&id, &patch).await {
                Ok(()) => navigate("/items", Default::default()),
                Err(err) => dialog::alert(&err.to_string()),
            }
        });
    };

    view! {
        <div class="item-detail">
            <table>
                <tbody>
                    <tr>
                        <th>"Name"</th>
                        <td>
                            <input
                                type="text"
                                prop:value=move || draft.get().name
                                on:input=move |ev| {
                                    set_draft.update(|d| d.name = event_target_value(&ev))
                                }
                            />
                        </td>
                    </tr>
                    <tr>
                        <th>"Category"</th>
                        <td>
                            <select on:change=move |ev| {
                                set_draft.update(|d| d.category = event_target_value(&ev))
                            }>
                                {ITEM_CATEGORIES
                                    .iter()
                                    .map(|&category| {
                                        view! {
                                            <option
                                                value=category
                                                selected=move || draft.get().category == category
                                            >
                                                {category}
                                            </option>
                                        }
                                    })
                                    .collect_view()}
                            </select>
                        </td>
                    </tr>
                    <tr>
                        <th>"Price"</th>
                        <td>
                            <input
                                type="text"
                                prop:value=move || draft.get().price
                                on:input=move |ev| {
                                    set_draft.update(|d| d.price = event_target_value(&ev))
                                }
                            />
                        </td>
                    </tr>
                </tbody>
            </table>
            <hr/>
            <button on:click=on_update>"Update"</button>
        </div>
    }
}
