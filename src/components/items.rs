//! Item Management View
//!
//! Paginated item table with an add form, inline row editing and
//! delete confirmation. Every mutation re-fetches the current page.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{item_api, ItemPatch, NewItem};
use crate::components::pagination::Pagination;
use crate::components::view_guard::ViewGuard;
use crate::dialog;
use crate::models::{Item, ItemDraft, ITEM_CATEGORIES, ITEM_STATUSES};

/// Items requested per page
const PAGE_SIZE: u32 = 5;

#[component]
pub fn Items() -> impl IntoView {
    let (items, set_items) = signal(Vec::<Item>::new());
    let (page, set_page) = signal(1u32);
    let (total_pages, set_total_pages) = signal(1u32);
    let (loading, set_loading) = signal(false);
    // Row currently in edit mode; None = nothing editing
    let (edit_target, set_edit_target) = signal::<Option<String>>(None);
    let (edit_draft, set_edit_draft) = signal(ItemDraft::default());
    let (new_draft, set_new_draft) = signal(ItemDraft::default());
    let (reload_trigger, set_reload_trigger) = signal(0u32);
    let guard = ViewGuard::new();

    let reload = move || set_reload_trigger.update(|v| *v += 1);

    // Fetch the current page on mount, on page change and after every
    // mutation.
    Effect::new({
        let guard = guard.clone();
        move |_| {
            let _ = reload_trigger.get();
            let current_page = page.get();
            let guard = guard.clone();
            set_loading.set(true);
            spawn_local(async move {
                let result = item_api().list(current_page, PAGE_SIZE).await;
                if !guard.active() {
                    return;
                }
                match result {
                    Ok(loaded) => {
                        set_items.set(loaded.items);
                        set_total_pages.set(loaded.total_pages);
                    }
                    Err(err) => {
                        web_sys::console::error_1(&format!("load items: {err}").into());
                    }
                }
                set_loading.set(false);
            });
        }
    });

    let on_add = {
        let guard = guard.clone();
        move |_| {
            let draft = new_draft.get();
            let guard = guard.clone();
            spawn_local(async move {
                let payload = NewItem {
                    name: &draft.name,
                    category: &draft.category,
                    price: &draft.price,
                };
                let result = item_api().create(&payload).await;
                if !guard.active() {
                    return;
                }
                match result {
                    Ok(()) => {
                        set_new_draft.set(ItemDraft::default());
                        reload();
                    }
                    Err(err) => dialog::alert(&err.to_string()),
                }
            });
        }
    };

    view! {
        <div class="items-page">
            <h1>"Item Management"</h1>

            <div class="add-item-card">
                <h3>"Add New Item"</h3>
                <input
                    placeholder="Item Name"
                    prop:value=move || new_draft.get().name
                    on:input=move |ev| set_new_draft.update(|d| d.name = event_target_value(&ev))
                />
                <select on:change=move |ev| {
                    set_new_draft.update(|d| d.category = event_target_value(&ev))
                }>
                    {ITEM_CATEGORIES
                        .iter()
                        .map(|&category| {
                            view! {
                                <option
                                    value=category
                                    selected=move || new_draft.get().category == category
                                >
                                    {category}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>
                <input
                    type="number"
                    placeholder="Price"
                    prop:value=move || new_draft.get().price
                    on:input=move |ev| set_new_draft.update(|d| d.price = event_target_value(&ev))
                />
                <button on:click=on_add>"Add"</button>
            </div>

            <Show when=move || !loading.get() fallback=|| view! { <p>"Loading..."</p> }>
                <table class="item-table">
                    <thead>
                        <tr>
                            <th>"Name"</th>
                            <th>"Category"</th>
                            <th>"Price"</th>
                            <th>"Status"</th>
                            <th>"Actions"</th>
                        </tr>
                    </thead>
                    <tbody>
                        <Show when=move || items.get().is_empty()>
                            <tr>
                                <td colspan="5" class="empty-cell">
                                    "No Items Found"
                                </td>
                            </tr>
                        </Show>
                        <For
                            each=move || items.get()
                            key=|item| item.id.clone()
                            children=move |item| {
                                view! {
                                    <ItemRow
                                        item=item
                                        edit_target=edit_target
                                        set_edit_target=set_edit_target
                                        edit_draft=edit_draft
                                        set_edit_draft=set_edit_draft
                                        on_changed=move |_| reload()
                                    />
                                }
                            }
                        />
                    </tbody>
                </table>
            </Show>

            <Pagination page=page total_pages=total_pages set_page=set_page/>
        </div>
    }
}

/// One table row; swaps to inline edit inputs when targeted.
///
/// Targeting a different row replaces the edit target outright and the
/// previous row's draft is dropped without warning.
#[component]
fn ItemRow(
    item: Item,
    edit_target: ReadSignal<Option<String>>,
    set_edit_target: WriteSignal<Option<String>>,
    edit_draft: ReadSignal<ItemDraft>,
    set_edit_draft: WriteSignal<ItemDraft>,
    #[prop(into)] on_changed: Callback<()>,
) -> impl IntoView {
    let item = StoredValue::new(item);

    let is_editing =
        move || edit_target.get().as_deref() == Some(item.read_value().id.as_str());

    let on_edit = move |_| {
        let current = item.get_value();
        set_edit_draft.set(ItemDraft::from_item(&current));
        set_edit_target.set(Some(current.id));
    };

    let on_cancel = move |_| set_edit_target.set(None);

    let on_save = move |_| {
        let id = item.read_value().id.clone();
        let draft = edit_draft.get();
        spawn_local(async move {
            let patch = ItemPatch {
                name: Some(&draft.name),
                category: Some(&draft.category),
                price: Some(&draft.price),
                status: Some(&draft.status),
            };
            match item_api().update(&id, &patch).await {
                Ok(()) => {
                    set_edit_target.set(None);
                    on_changed.run(());
                }
                Err(err) => dialog::alert(&err.to_string()),
            }
        });
    };

    let on_delete = move |_| {
        if !dialog::confirm("Delete this item?") {
            return;
        }
        let id = item.read_value().id.clone();
        spawn_local(async move {
            match item_api().remove(&id).await {
                // Re-fetch rather than patching the cached page
                Ok(()) => on_changed.run(()),
                Err(err) => dialog::alert(&err.to_string()),
            }
        });
    };

    view! {
        <tr>
            {move || {
                if is_editing() {
                    view! {
                        <td>
                            <input
                                prop:value=move || edit_draft.get().name
                                on:input=move |ev| {
                                    set_edit_draft.update(|d| d.name = event_target_value(&ev))
                                }
                            />
                        </td>
                        <td>
                            <select on:change=move |ev| {
                                set_edit_draft.update(|d| d.category = event_target_value(&ev))
                            }>
                                {ITEM_CATEGORIES
                                    .iter()
                                    .map(|&category| {
                                        view! {
                                            <option
                                                value=category
                                                selected=move || edit_draft.get().category == category
                                            >
                                                {category}
                                            </option>
                                        }
                                    })
                                    .collect_view()}
                            </select>
                        </td>
                        <td>
                            <input
                                type="number"
                                prop:value=move || edit_draft.get().price
                                on:input=move |ev| {
                                    set_edit_draft.update(|d| d.price = event_target_value(&ev))
                                }
                            />
                        </td>
                        <td>
                            <select on:change=move |ev| {
                                set_edit_draft.update(|d| d.status = event_target_value(&ev))
                            }>
                                {ITEM_STATUSES
                                    .iter()
                                    .map(|&status| {
                                        view! {
                                            <option
                                                value=status
                                                selected=move || edit_draft.get().status == status
                                            >
                                                {status}
                                            </option>
                                        }
                                    })
                                    .collect_view()}
                            </select>
                        </td>
                        <td>
                            <button class="btn-save" on:click=on_save>
                                "Save"
                            </button>
                            <button class="btn-ghost" on:click=on_cancel>
                                "Cancel"
                            </button>
                        </td>
                    }
                        .into_any()
                } else {
                    let current = item.get_value();
                    view! {
                        <td>{current.name}</td>
                        <td>{current.category}</td>
                        <td>{format!("${}", current.price)}</td>
                        <td>{current.status}</td>
                        <td>
                            <button on:click=on_edit>"Edit"</button>
                            <button class="btn-danger" on:click=on_delete>
                                "Delete"
                            </button>
                        </td>
                    }
                        .into_any()
                }
            }}
        </tr>
    }
}
