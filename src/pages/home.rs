//! Home page: category-filtered, paginated notice list with bookmarks.

use std::rc::Rc;

use leptos::prelude::*;
use send_wrapper::SendWrapper;

use crate::components::alert::AlertBanner;
use crate::components::header::Header;
use crate::components::notice_card::NoticeCard;
use crate::components::notice_modal::NoticeModal;
use crate::components::pagination::Pagination;
use crate::net::api::{self, NoticeQuery};
use crate::net::client::ApiClient;
use crate::net::types::{Category, Notice};
use crate::state::notices::NoticesState;

/// Main feed. Filters and pagination re-fetch from the server; bookmark
/// toggles apply locally only after the server confirms.
#[component]
pub fn HomePage() -> impl IntoView {
    let api = expect_context::<SendWrapper<Rc<ApiClient>>>();

    let notices = RwSignal::new(NoticesState::default());
    let categories = RwSignal::new(Vec::<Category>::new());
    let selected_category = RwSignal::new(Option::<i64>::None);
    let saved_only = RwSignal::new(false);
    let selected_notice = RwSignal::new(Option::<Notice>::None);
    let alert = RwSignal::new(Option::<String>::None);

    let load_page = {
        let api = api.clone();
        move |page: u32| {
            let api = api.clone();
            notices.update(|s| s.loading = true);
            leptos::task::spawn_local(async move {
                let query = NoticeQuery {
                    page,
                    category_id: selected_category.get_untracked(),
                    ..NoticeQuery::default()
                };
                let result = if saved_only.get_untracked() {
                    api::fetch_saved_notices(&api, &query).await
                } else {
                    api::fetch_notices(&api, &query).await
                };
                match result {
                    Ok((items, page_info)) => {
                        notices.update(|s| s.apply_page(items, &page_info));
                    }
                    Err(err) => {
                        leptos::logging::warn!("notice fetch failed: {err}");
                        notices.update(|s| s.apply_error("공지 목록을 불러오지 못했습니다."));
                    }
                }
            });
        }
    };

    // Category catalog, fetched once.
    {
        let api = api.clone();
        leptos::task::spawn_local(async move {
            match api::fetch_categories(&api).await {
                Ok(list) => categories.set(list),
                Err(err) => leptos::logging::warn!("category fetch failed: {err}"),
            }
        });
    }
    load_page(1);

    let on_bookmark = Callback::new({
        let api = api.clone();
        move |(id, bookmarked): (String, bool)| {
            let api = api.clone();
            leptos::task::spawn_local(async move {
                match api::set_bookmark(&api, &id, bookmarked).await {
                    Ok(()) => {
                        notices.update(|s| s.set_bookmark(&id, bookmarked));
                        selected_notice.update(|sel| {
                            if let Some(n) = sel {
                                if n.id == id {
                                    n.is_bookmarked = bookmarked;
                                }
                            }
                        });
                    }
                    Err(err) => {
                        leptos::logging::warn!("bookmark update failed: {err}");
                        alert.set(Some("북마크 처리에 실패했습니다.".to_owned()));
                    }
                }
            });
        }
    });

    let on_calendar = Callback::new({
        let api = api.clone();
        move |id: String| {
            let api = api.clone();
            leptos::task::spawn_local(async move {
                // The backend maps the session token to the linked Google
                // account; there is no separate provider credential here.
                let access_token = api.token_store().load().access_token.unwrap_or_default();
                match api::register_calendar(&api, &id, &access_token).await {
                    Ok(()) => alert.set(Some("캘린더에 등록했습니다.".to_owned())),
                    Err(err) => {
                        leptos::logging::warn!("calendar registration failed: {err}");
                        alert.set(Some("캘린더 등록에 실패했습니다.".to_owned()));
                    }
                }
            });
        }
    });

    let on_open = Callback::new(move |notice: Notice| selected_notice.set(Some(notice)));
    let on_close = Callback::new(move |()| selected_notice.set(None));

    let chip_load = load_page.clone();
    let saved_load = load_page.clone();
    let page_load = load_page.clone();

    view! {
        <div class="home-page">
            <Header/>
            <AlertBanner message=alert/>

            <h2 class="home-page__heading">"카테고리"</h2>
            <div class="home-page__chips">
                <button
                    class="chip"
                    class=("chip--active", move || selected_category.get().is_none())
                    on:click={
                        let load = chip_load.clone();
                        move |_| {
                            selected_category.set(None);
                            load(1);
                        }
                    }
                >
                    "전체"
                </button>
                {move || {
                    categories
                        .get()
                        .into_iter()
                        .map(|category| {
                            let id = category.id;
                            let load = chip_load.clone();
                            view! {
                                <button
                                    class="chip"
                                    class=("chip--active", move || selected_category.get() == Some(id))
                                    on:click=move |_| {
                                        selected_category.set(Some(id));
                                        load(1);
                                    }
                                >
                                    {category.name}
                                </button>
                            }
                        })
                        .collect::<Vec<_>>()
                }}
            </div>

            <label class="home-page__saved-toggle">
                <input
                    type="checkbox"
                    prop:checked=move || saved_only.get()
                    on:change={
                        let load = saved_load.clone();
                        move |ev| {
                            saved_only.set(event_target_checked(&ev));
                            load(1);
                        }
                    }
                />
                "저장 게시글만 보기"
            </label>

            {move || {
                notices
                    .get()
                    .error
                    .map(|message| view! { <p class="home-page__error">{message}</p> })
            }}

            <div class="home-page__list">
                <Show
                    when=move || !notices.get().loading
                    fallback=|| view! { <p class="home-page__loading">"불러오는 중..."</p> }
                >
                    {move || {
                        notices
                            .get()
                            .items
                            .into_iter()
                            .map(|notice| {
                                view! {
                                    <NoticeCard
                                        notice=notice
                                        on_open=on_open
                                        on_bookmark=on_bookmark
                                    />
                                }
                            })
                            .collect::<Vec<_>>()
                    }}
                </Show>
            </div>

            <Pagination
                page=Signal::derive(move || notices.get().page)
                total_pages=Signal::derive(move || notices.get().total_pages)
                on_page=Callback::new(move |page| page_load(page))
            />

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
