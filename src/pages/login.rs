//! Login page with the Google OAuth redirect button.

use leptos::prelude::*;

use crate::app::google_login_url;

/// Login entry point. The button navigates to the backend's Google
/// authorization redirect; the provider sends the user back to
/// `/oauth/callback`.
#[component]
pub fn LoginPage() -> impl IntoView {
    view! {
        <div class="login-page">
            <div class="login-page__hero">
                <h1 class="login-page__title">"차차캐치"</h1>
                <p class="login-page__subtitle">"공지사항을 놓치지 마세요!"</p>
            </div>
            <a href=google_login_url() class="login-page__google">
                "Google로 로그인"
            </a>
            <p class="login-page__terms">
                "로그인하면 차차캐치의 이용약관과 개인정보처리방침에 동의하게 됩니다."
            </p>
        </div>
    }
}
