//! Keyword search over the notice archive.

use std::rc::Rc;

use leptos::prelude::*;
use send_wrapper::SendWrapper;

use crate::components::alert::AlertBanner;
use crate::components::notice_card::NoticeCard;
use crate::components::notice_modal::NoticeModal;
use crate::components::pagination::Pagination;
use crate::net::api::{self, NoticeQuery};
use crate::net::client::ApiClient;
use crate::net::types::Notice;
use crate::state::notices::NoticesState;

/// Search page. Submitting re-queries page 1; pagination keeps the last
/// submitted keyword.
#[component]
pub fn SearchPage() -> impl IntoView {
    let api = expect_context::<SendWrapper<Rc<ApiClient>>>();

    let input = RwSignal::new(String::new());
    let submitted = RwSignal::new(String::new());
    let results = RwSignal::new(NoticesState::default());
    let selected_notice = RwSignal::new(Option::<Notice>::None);
    let alert = RwSignal::new(Option::<String>::None);

    let run_search = {
        let api = api.clone();
        move |page: u32| {
            let keyword = submitted.get_untracked();
            if keyword.is_empty() {
                return;
            }
            let api = api.clone();
            results.update(|s| s.loading = true);
            leptos::task::spawn_local(async move {
                let query = NoticeQuery {
                    page,
                    keyword: Some(keyword),
                    ..NoticeQuery::default()
                };
                match api::search_notices(&api, &query).await {
                    Ok((items, page_info)) => {
                        results.update(|s| s.apply_page(items, &page_info));
                    }
                    Err(err) => {
                        leptos::logging::warn!("search failed: {err}");
                        results.update(|s| s.apply_error("검색에 실패했습니다."));
                    }
                }
            });
        }
    };

    let submit = {
        let run_search = run_search.clone();
        move || {
            let keyword = input.get_untracked().trim().to_owned();
            if keyword.is_empty() {
                return;
            }
            submitted.set(keyword);
            run_search(1);
        }
    };

    let on_bookmark = Callback::new({
        let api = api.clone();
        move |(id, bookmarked): (String, bool)| {
            let api = api.clone();
            leptos::task::spawn_local(async move {
                match api::set_bookmark(&api, &id, bookmarked).await {
                    Ok(()) => results.update(|s| s.set_bookmark(&id, bookmarked)),
                    Err(err) => {
                        leptos::logging::warn!("bookmark update failed: {err}");
                        alert.set(Some("북마크 처리에 실패했습니다.".to_owned()));
                    }
                }
            });
        }
    });

    let on_open = Callback::new(move |notice: Notice| selected_notice.set(Some(notice)));
    let on_close = Callback::new(move |()| selected_notice.set(None));
    let on_calendar = Callback::new(move |_id: String| {
        alert.set(Some("홈 화면에서 캘린더 등록을 사용할 수 있습니다.".to_owned()));
    });

    let submit_click = submit.clone();
    let page_load = run_search.clone();

    view! {
        <div class="search-page">
            <AlertBanner message=alert/>

            <div class="search-page__bar">
                <input
                    class="search-page__input"
                    type="text"
                    placeholder="키워드로 검색"
                    prop:value=move || input.get()
                    on:input=move |ev| input.set(event_target_value(&ev))
                    on:keydown={
                        let submit = submit.clone();
                        move |ev: leptos::ev::KeyboardEvent| {
                            if ev.key() == "Enter" {
                                ev.prevent_default();
                                submit();
                            }
                        }
                    }
                />
                <button class="search-page__submit" on:click=move |_| submit_click()>
                    "검색"
                </button>
            </div>

            {move || {
                results
                    .get()
                    .error
                    .map(|message| view! { <p class="search-page__error">{message}</p> })
            }}

            <div class="search-page__list">
                {move || {
                    results
                        .get()
                        .items
                        .into_iter()
                        .map(|notice| {
                            view! {
                                <NoticeCard notice=notice on_open=on_open on_bookmark=on_bookmark/>
                            }
                        })
                        .collect::<Vec<_>>()
                }}
            </div>

            <Show when=move || { results.get().total_pages > 1 }>
                <Pagination
                    page=Signal::derive(move || results.get().page)
                    total_pages=Signal::derive(move || results.get().total_pages)
                    on_page={
                        let load = page_load.clone();
                        Callback::new(move |page| load(page))
                    }
                />
            </Show>

            {move || {
                selected_notice.get().map(|notice| {
                    view! {
                        <NoticeModal
                            notice=notice
                            on_close=on_close
                            on_bookmark=on_bookmark
                            on_calendar=on_calendar
                        />
                    }
                })
            }}
        </div>
    }
}
