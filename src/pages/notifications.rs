//! Personalized alarm feeds: keyword matches and subscribed categories.

use std::rc::Rc;

use leptos::prelude::*;
use send_wrapper::SendWrapper;

use crate::components::alert::AlertBanner;
use crate::components::notice_card::NoticeCard;
use crate::components::notice_modal::NoticeModal;
use crate::net::api;
use crate::net::client::ApiClient;
use crate::net::types::Notice;

#[derive(Clone, Copy, PartialEq, Eq)]
enum AlarmTab {
    Keyword,
    Category,
}

/// Notifications page with two tabs, both loaded on mount.
#[component]
pub fn NotificationsPage() -> impl IntoView {
    let api = expect_context::<SendWrapper<Rc<ApiClient>>>();

    let tab = RwSignal::new(AlarmTab::Keyword);
    let keyword_items = RwSignal::new(Vec::<Notice>::new());
    let category_items = RwSignal::new(Vec::<Notice>::new());
    let loading = RwSignal::new(true);
    let selected_notice = RwSignal::new(Option::<Notice>::None);
    let alert = RwSignal::new(Option::<String>::None);

    {
        let api = api.clone();
        leptos::task::spawn_local(async move {
            match api::fetch_keyword_alarms(&api).await {
                Ok(items) => keyword_items.set(items),
                Err(err) => {
                    leptos::logging::warn!("keyword alarm fetch failed: {err}");
                    alert.set(Some("키워드 알림을 불러오지 못했습니다.".to_owned()));
                }
            }
            match api::fetch_category_alarms(&api).await {
                Ok(items) => category_items.set(items),
                Err(err) => {
                    leptos::logging::warn!("category alarm fetch failed: {err}");
                    alert.set(Some("카테고리 알림을 불러오지 못했습니다.".to_owned()));
                }
            }
            loading.set(false);
        });
    }

    let on_bookmark = Callback::new({
        let api = api.clone();
        move |(id, bookmarked): (String, bool)| {
            let api = api.clone();
            leptos::task::spawn_local(async move {
                match api::set_bookmark(&api, &id, bookmarked).await {
                    Ok(()) => {
                        let flip = move |items: &mut Vec<Notice>| {
                            if let Some(item) = items.iter_mut().find(|n| n.id == id) {
                                item.is_bookmarked = bookmarked;
                            }
                        };
                        keyword_items.update(&flip);
                        category_items.update(&flip);
                    }
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

    let visible = move || match tab.get() {
        AlarmTab::Keyword => keyword_items.get(),
        AlarmTab::Category => category_items.get(),
    };

    view! {
        <div class="notifications-page">
            <AlertBanner message=alert/>

            <div class="notifications-page__tabs">
                <button
                    class="tab"
                    class=("tab--active", move || tab.get() == AlarmTab::Keyword)
                    on:click=move |_| tab.set(AlarmTab::Keyword)
                >
                    "키워드 알림"
                </button>
                <button
                    class="tab"
                    class=("tab--active", move || tab.get() == AlarmTab::Category)
                    on:click=move |_| tab.set(AlarmTab::Category)
                >
                    "카테고리 알림"
                </button>
            </div>

            <Show
                when=move || !loading.get()
                fallback=|| view! { <p class="notifications-page__loading">"불러오는 중..."</p> }
            >
                <div class="notifications-page__list">
                    {move || {
                        let items = visible();
                        if items.is_empty() {
                            view! { <p class="notifications-page__empty">"알림이 없습니다."</p> }
                                .into_any()
                        } else {
                            items
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
                                .into_any()
                        }
                    }}
                </div>
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
