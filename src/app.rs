//! Root application component: context providers, session startup, routing.

use std::rc::Rc;

use leptos::prelude::*;
use send_wrapper::SendWrapper;
use leptos_meta::{Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
    hooks::use_location,
};

use crate::components::bottom_nav::BottomNav;
use crate::components::require_auth::RequireAuth;
use crate::net::client::ApiClient;
use crate::net::http::Http;
use crate::net::token_store::{LocalStore, TokenStore};
use crate::pages::{
    home::HomePage, login::LoginPage, notifications::NotificationsPage,
    oauth_callback::OAuthCallbackPage, onboarding::OnboardingPage, search::SearchPage,
};
use crate::state::auth::{AuthState, StartupSession, resolve_startup_session};

/// Backend origin for all API traffic.
pub const API_BASE_URL: &str = "https://chacha-catch.shop";

/// The backend's Google authorization redirect; the provider returns the
/// user to `/oauth/callback`.
#[must_use]
pub fn google_login_url() -> String {
    format!("{API_BASE_URL}/oauth2/authorization/google")
}

fn transport() -> Rc<dyn Http> {
    #[cfg(feature = "csr")]
    {
        Rc::new(crate::net::http::BrowserHttp)
    }
    #[cfg(not(feature = "csr"))]
    {
        Rc::new(crate::net::http::NullHttp)
    }
}

/// Hard redirect used when the session expires outside any component.
fn redirect_to_login() {
    #[cfg(feature = "csr")]
    {
        if let Some(w) = web_sys::window() {
            let _ = w.location().set_href("/login");
        }
    }
}

fn build_api_client() -> Rc<ApiClient> {
    let store: Rc<dyn TokenStore> = Rc::new(LocalStore);
    Rc::new(ApiClient::new(
        API_BASE_URL,
        transport(),
        store,
        Box::new(redirect_to_login),
    ))
}

/// Root application component.
///
/// Provides the auth signal and the shared API client, hydrates the session
/// once, and sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let auth = RwSignal::new(AuthState::startup());
    provide_context(auth);

    let api = build_api_client();
    provide_context(SendWrapper::new(Rc::clone(&api)));

    // Hydrate the session from storage, verifying the token against the
    // backend. Loading settles on every path.
    {
        let api = Rc::clone(&api);
        leptos::task::spawn_local(async move {
            let store = api.token_store();
            let outcome = resolve_startup_session(&api, &*store).await;
            auth.update(|state| {
                state.user = match outcome {
                    StartupSession::Authenticated(user) => Some(user),
                    StartupSession::Unauthenticated => None,
                };
                state.loading = false;
            });
        });
    }

    view! {
        <Stylesheet id="leptos" href="/pkg/chachacatch.css"/>
        <Title text="차차캐치"/>

        <Router>
            <main class="app-main">
                <Routes fallback=|| "Page not found.".into_view()>
                    <Route path=StaticSegment("login") view=LoginPage/>
                    <Route
                        path=(StaticSegment("oauth"), StaticSegment("callback"))
                        view=OAuthCallbackPage
                    />
                    <Route
                        path=StaticSegment("onboarding")
                        view=|| view! { <RequireAuth><OnboardingPage/></RequireAuth> }
                    />
                    <Route
                        path=StaticSegment("search")
                        view=|| view! { <RequireAuth><SearchPage/></RequireAuth> }
                    />
                    <Route
                        path=StaticSegment("notifications")
                        view=|| view! { <RequireAuth><NotificationsPage/></RequireAuth> }
                    />
                    <Route
                        path=StaticSegment("")
                        view=|| view! { <RequireAuth><HomePage/></RequireAuth> }
                    />
                </Routes>
            </main>
            <NavGate/>
        </Router>
    }
}

/// Bottom navigation is hidden on the login, onboarding, and callback routes.
#[component]
fn NavGate() -> impl IntoView {
    let location = use_location();
    let hidden = move || {
        let path = location.pathname.get();
        path == "/login" || path == "/onboarding" || path.starts_with("/oauth")
    };

    view! {
        <Show when=move || !hidden()>
            <BottomNav/>
        </Show>
    }
}
