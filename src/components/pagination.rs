//! Prev/next pagination control.

use leptos::prelude::*;

/// One-based page indicator with previous/next buttons. The callback
/// receives the requested page; out-of-range presses are disabled.
#[component]
pub fn Pagination(
    #[prop(into)] page: Signal<u32>,
    #[prop(into)] total_pages: Signal<u32>,
    #[prop(into)] on_page: Callback<u32>,
) -> impl IntoView {
    let at_start = move || page.get() <= 1;
    let at_end = move || page.get() >= total_pages.get();

    view! {
        <div class="pagination">
            <button
                class="pagination__prev"
                disabled=at_start
                on:click=move |_| {
                    if !at_start() {
                        on_page.run(page.get() - 1);
                    }
                }
            >
                "‹"
            </button>
            <span class="pagination__label">
                {move || format!("{}/{}", page.get(), total_pages.get().max(1))}
            </span>
            <button
                class="pagination__next"
                disabled=at_end
                on:click=move |_| {
                    if !at_end() {
                        on_page.run(page.get() + 1);
                    }
                }
            >
                "›"
            </button>
        </div>
    }
}
