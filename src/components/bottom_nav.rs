//! Fixed bottom tab bar: home, search, notifications.

use leptos::prelude::*;
use leptos_router::hooks::use_location;

/// Bottom navigation for the three main tabs. Hidden on the login and
/// onboarding routes by the caller.
#[component]
pub fn BottomNav() -> impl IntoView {
    let pathname = use_location().pathname;
    let active = move |path: &'static str| pathname.get() == path;

    let item = move |path: &'static str, label: &'static str| {
        view! {
            <a
                href=path
                class="bottom-nav__item"
                class=("bottom-nav__item--active", move || active(path))
            >
                <span class="bottom-nav__label">{label}</span>
            </a>
        }
    };

    view! {
        <nav class="bottom-nav">
            {item("/", "홈")}
            {item("/search", "검색")}
            {item("/notifications", "알림")}
        </nav>
    }
}
