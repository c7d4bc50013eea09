//! Pagination Controls
//!
//! Previous/Next controls plus the pure paging state they render from.

use leptos::prelude::*;

/// Paging state of a list view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    pub page: u32,
    pub total_pages: u32,
}

impl Pager {
    pub fn new(page: u32, total_pages: u32) -> Self {
        Self { page, total_pages }
    }

    /// Previous is available strictly after the first page.
    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    /// Next is available strictly before the last page.
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Previous/Next pagination controls. Page changes re-trigger the
/// owning view's list fetch through the page signal.
#[component]
pub fn Pagination(
    page: ReadSignal<u32>,
    total_pages: ReadSignal<u32>,
    set_page: WriteSignal<u32>,
) -> impl IntoView {
    let pager = move || Pager::new(page.get(), total_pages.get());

    view! {
        <div class="pagination">
            <button
                prop:disabled=move || !pager().has_prev()
                on:click=move |_| set_page.update(|p| *p -= 1)
            >
                "Previous"
            </button>
            <span>{move || format!("Page {} of {}", page.get(), total_pages.get())}</span>
            <button
                prop:disabled=move || !pager().has_next()
                on:click=move |_| set_page.update(|p| *p += 1)
            >
                "Next"
            </button>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_page_disables_previous_and_enables_next() {
        let pager = Pager::new(1, 3);
        assert!(!pager.has_prev());
        assert!(pager.has_next());
    }

    #[test]
    fn last_page_enables_previous_and_disables_next() {
        let pager = Pager::new(3, 3);
        assert!(pager.has_prev());
        assert!(!pager.has_next());
    }

    #[test]
    fn middle_page_enables_both() {
        let pager = Pager::new(2, 3);
        assert!(pager.has_prev());
        assert!(pager.has_next());
    }

    #[test]
    fn single_page_disables_both() {
        let pager = Pager::new(1, 1);
        assert!(!pager.has_prev());
        assert!(!pager.has_next());
    }
}
