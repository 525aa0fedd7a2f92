//! OAuth callback route: completes the redirect handshake and bootstraps
//! the session.

use std::rc::Rc;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use send_wrapper::SendWrapper;
use leptos_router::hooks::{use_location, use_navigate};

use crate::net::client::ApiClient;
use crate::net::oauth::{exchange_redirect, parse_redirect};
use crate::state::auth::{AuthState, apply_login};
use crate::state::onboarding::onboarding_completed;

/// Unauthenticated callback page. Runs the handshake exactly once per mount:
/// classify the redirect, exchange it with the backend, log in, and move on.
/// Every failure path lands back on `/login` with nothing logged in.
#[component]
pub fn OAuthCallbackPage() -> impl IntoView {
    let api = expect_context::<SendWrapper<Rc<ApiClient>>>();
    let auth = expect_context::<RwSignal<AuthState>>();
    let navigate = use_navigate();
    let location = use_location();

    let query = location.search.get_untracked();
    let fragment = location.hash.get_untracked();

    leptos::task::spawn_local(async move {
        let redirect = parse_redirect(&query, &fragment);
        match exchange_redirect(&api, &redirect, &callback_redirect_uri()).await {
            Ok(bundle) => {
                let store = api.token_store();
                auth.update(|state| {
                    apply_login(
                        state,
                        &*store,
                        &bundle.access_token,
                        bundle.refresh_token.as_deref(),
                        bundle.user,
                    );
                });
                let target = if onboarding_completed() { "/" } else { "/onboarding" };
                navigate(target, NavigateOptions::default());
            }
            Err(err) => {
                leptos::logging::warn!("login handshake failed: {err}");
                navigate("/login", NavigateOptions::default());
            }
        }
    });

    view! {
        <div class="callback-page">
            <div class="callback-page__spinner"></div>
            <p>"로그인 처리 중..."</p>
        </div>
    }
}

/// The redirect URI registered with the provider: current origin plus the
/// callback path.
fn callback_redirect_uri() -> String {
    #[cfg(feature = "csr")]
    {
        if let Some(origin) = web_sys::window().and_then(|w| w.location().origin().ok()) {
            return format!("{origin}/oauth/callback");
        }
    }
    "/oauth/callback".to_owned()
}
