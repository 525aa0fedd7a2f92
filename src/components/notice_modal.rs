//! Notice detail modal with bookmark, calendar, and original-link actions.

use leptos::prelude::*;

use crate::net::types::Notice;

/// Detail overlay for a single notice.
///
/// Calendar registration and bookmark changes are delegated upward; the
/// modal itself holds no state beyond the notice it was opened with.
#[component]
pub fn NoticeModal(
    notice: Notice,
    #[prop(into)] on_close: Callback<()>,
    #[prop(into)] on_bookmark: Callback<(String, bool)>,
    #[prop(into)] on_calendar: Callback<String>,
) -> impl IntoView {
    let bookmarked = notice.is_bookmarked;
    let bookmark_id = notice.id.clone();
    let calendar_id = notice.id.clone();
    let title = notice.title.clone();
    let department = notice.department.clone();
    let date = notice.date.clone();
    let content = notice.content.clone();
    let image = notice.image.clone();
    let original_link = notice.original_link.clone();

    view! {
        <div class="modal-backdrop" on:click=move |_| on_close.run(())>
            <div class="modal" on:click=move |ev| ev.stop_propagation()>
                <h2 class="modal__title">{title}</h2>
                <div class="modal__meta">
                    <span>{department}</span>
                    <span>{date}</span>
                </div>
                {image.map(|src| view! { <img class="modal__image" src=src/> })}
                <p class="modal__content">{content}</p>
                <div class="modal__actions">
                    <button
                        class="modal__bookmark"
                        on:click=move |_| on_bookmark.run((bookmark_id.clone(), !bookmarked))
                    >
                        {if bookmarked { "저장 해제" } else { "저장하기" }}
                    </button>
                    <button
                        class="modal__calendar"
                        on:click=move |_| on_calendar.run(calendar_id.clone())
                    >
                        "캘린더 등록"
                    </button>
                    <a class="modal__original" href=original_link target="_blank">
                        "원문 보기"
                    </a>
                </div>
                <button class="modal__close" on:click=move |_| on_close.run(())>
                    "닫기"
                </button>
            </div>
        </div>
    }
}
