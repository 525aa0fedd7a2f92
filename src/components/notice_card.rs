//! One notice in a list: title, department, date, bookmark toggle.

use leptos::prelude::*;

use crate::net::types::Notice;

/// List row for a notice. Clicking the body opens the detail view; the
/// bookmark button reports the desired new state and flips only after the
/// server confirms.
#[component]
pub fn NoticeCard(
    notice: Notice,
    #[prop(into)] on_open: Callback<Notice>,
    #[prop(into)] on_bookmark: Callback<(String, bool)>,
) -> impl IntoView {
    let open_notice = notice.clone();
    let bookmark_id = notice.id.clone();
    let bookmarked = notice.is_bookmarked;
    let is_new = notice.is_new;
    let title = notice.title.clone();
    let department = notice.department.clone();
    let date = notice.date.clone();

    view! {
        <div class="notice-card" class=("notice-card--bookmarked", move || bookmarked)>
            <div class="notice-card__body" on:click=move |_| on_open.run(open_notice.clone())>
                <h3 class="notice-card__title">
                    {title}
                    <Show when=move || is_new>
                        <span class="notice-card__new">"N"</span>
                    </Show>
                </h3>
                <div class="notice-card__meta">
                    <span>{department}</span>
                    <span>{date}</span>
                </div>
            </div>
            <button
                class="notice-card__bookmark"
                on:click=move |ev| {
                    ev.stop_propagation();
                    on_bookmark.run((bookmark_id.clone(), !bookmarked));
                }
            >
                {if bookmarked { "★" } else { "☆" }}
            </button>
        </div>
    }
}
