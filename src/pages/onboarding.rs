//! Onboarding page: profile setup for department, year, status, categories,
//! and alarm keywords.

use std::rc::Rc;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use send_wrapper::SendWrapper;
use leptos_router::hooks::use_navigate;

use crate::components::alert::AlertBanner;
use crate::net::api;
use crate::net::client::ApiClient;
use crate::net::types::Category;
use crate::state::onboarding::{
    DEPARTMENTS, GRADES, OnboardingForm, STATUSES, clear_draft, load_draft,
    mark_onboarding_completed, save_draft,
};

/// Profile form. Edits persist to a localStorage draft; saving posts the
/// profile and returns home.
#[component]
pub fn OnboardingPage() -> impl IntoView {
    let api = expect_context::<SendWrapper<Rc<ApiClient>>>();
    let navigate = use_navigate();

    let had_draft = load_draft().is_some();
    let form = RwSignal::new(load_draft().unwrap_or_default());
    let categories = RwSignal::new(Vec::<Category>::new());
    let saving = RwSignal::new(false);
    let alert = RwSignal::new(Option::<String>::None);

    // Category catalog plus, when no draft exists, the server-side profile.
    {
        let api = api.clone();
        leptos::task::spawn_local(async move {
            match api::fetch_categories(&api).await {
                Ok(list) => categories.set(list),
                Err(err) => leptos::logging::warn!("category fetch failed: {err}"),
            }
            if !had_draft {
                if let Ok(profile) = api::fetch_profile(&api).await {
                    form.set(OnboardingForm::from_profile(&profile));
                }
            }
        });
    }

    let persist = move || save_draft(&form.get_untracked());

    let on_save = {
        let api = api.clone();
        let navigate = navigate.clone();
        move |_| {
            if saving.get_untracked() {
                return;
            }
            saving.set(true);
            let api = api.clone();
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                let profile = form.get_untracked().to_profile();
                match api::save_profile(&api, &profile).await {
                    Ok(()) => {
                        mark_onboarding_completed();
                        clear_draft();
                        navigate("/", NavigateOptions::default());
                    }
                    Err(err) => {
                        leptos::logging::warn!("profile save failed: {err}");
                        alert.set(Some("프로필 저장에 실패했습니다.".to_owned()));
                    }
                }
                saving.set(false);
            });
        }
    };

    view! {
        <div class="onboarding-page">
            <AlertBanner message=alert/>

            <section class="onboarding-page__section">
                <p class="onboarding-page__label">"학과 *"</p>
                <select
                    class="onboarding-page__select"
                    on:change=move |ev| {
                        form.update(|f| f.department = event_target_value(&ev));
                        persist();
                    }
                >
                    {DEPARTMENTS
                        .iter()
                        .map(|dept| {
                            view! {
                                <option
                                    value=*dept
                                    selected=move || form.get().department == *dept
                                >
                                    {*dept}
                                </option>
                            }
                        })
                        .collect::<Vec<_>>()}
                </select>
            </section>

            <section class="onboarding-page__section">
                <p class="onboarding-page__label">"학사정보 *"</p>
                <div class="onboarding-page__row">
                    <select
                        class="onboarding-page__select"
                        on:change=move |ev| {
                            form.update(|f| f.grade = event_target_value(&ev));
                            persist();
                        }
                    >
                        {GRADES
                            .iter()
                            .map(|grade| {
                                view! {
                                    <option value=*grade selected=move || form.get().grade == *grade>
                                        {*grade}
                                    </option>
                                }
                            })
                            .collect::<Vec<_>>()}
                    </select>
                    <select
                        class="onboarding-page__select"
                        on:change=move |ev| {
                            form.update(|f| f.status = event_target_value(&ev));
                            persist();
                        }
                    >
                        {STATUSES
                            .iter()
                            .map(|status| {
                                view! {
                                    <option value=*status selected=move || form.get().status == *status>
                                        {*status}
                                    </option>
                                }
                            })
                            .collect::<Vec<_>>()}
                    </select>
                </div>
            </section>

            <section class="onboarding-page__section">
                <p class="onboarding-page__label">"알림받을 정보"</p>
                <div class="onboarding-page__chips">
                    {move || {
                        categories
                            .get()
                            .into_iter()
                            .map(|category| {
                                let id = category.id;
                                view! {
                                    <button
                                        class="chip"
                                        class=(
                                            "chip--active",
                                            move || form.get().category_ids.contains(&id),
                                        )
                                        on:click=move |_| {
                                            form.update(|f| f.toggle_category(id));
                                            persist();
                                        }
                                    >
                                        {category.name}
                                    </button>
                                }
                            })
                            .collect::<Vec<_>>()
                    }}
                </div>
            </section>

            <section class="onboarding-page__section">
                <p class="onboarding-page__label">"알림 받을 키워드"</p>
                <div class="onboarding-page__keyword-bar">
                    <input
                        class="onboarding-page__keyword-input"
                        type="text"
                        placeholder="ex) 엔지니어링페어, 프로젝트페어"
                        prop:value=move || form.get().new_keyword
                        on:input=move |ev| {
                            form.update(|f| f.new_keyword = event_target_value(&ev));
                        }
                        on:keydown=move |ev: leptos::ev::KeyboardEvent| {
                            if ev.key() == "Enter" {
                                ev.prevent_default();
                                form.update(|f| {
                                    f.add_keyword();
                                });
                                persist();
                            }
                        }
                    />
                    <button
                        class="onboarding-page__keyword-add"
                        on:click=move |_| {
                            form.update(|f| {
                                f.add_keyword();
                            });
                            persist();
                        }
                    >
                        "+"
                    </button>
                </div>
                <div class="onboarding-page__keywords">
                    {move || {
                        form.get()
                            .keywords
                            .into_iter()
                            .map(|keyword| {
                                let remove_target = keyword.clone();
                                view! {
                                    <span class="keyword-tag">
                                        {format!("#{keyword}")}
                                        <button
                                            class="keyword-tag__remove"
                                            on:click=move |_| {
                                                form.update(|f| f.remove_keyword(&remove_target));
                                                persist();
                                            }
                                        >
                                            "✕"
                                        </button>
                                    </span>
                                }
                            })
                            .collect::<Vec<_>>()
                    }}
                </div>
            </section>

            <button class="onboarding-page__save" disabled=move || saving.get() on:click=on_save>
                {move || if saving.get() { "저장 중..." } else { "저장하기" }}
            </button>
        </div>
    }
}
