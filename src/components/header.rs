//! Top bar with the service title and a logout action.

use leptos::prelude::*;

use crate::net::client::ApiClient;
use crate::state::auth::{AuthState, apply_logout};

/// Page header showing the service name, the signed-in user, and logout.
#[component]
pub fn Header() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let api = expect_context::<send_wrapper::SendWrapper<std::rc::Rc<ApiClient>>>();

    let user_name = move || auth.get().user.map_or_else(String::new, |u| u.name);

    let on_logout = move |_| {
        let store = api.token_store();
        auth.update(|state| apply_logout(state, &*store));
        #[cfg(feature = "csr")]
        {
            // Hard navigation for a clean state.
            if let Some(w) = web_sys::window() {
                let _ = w.location().set_href("/login");
            }
        }
    };

    view! {
        <header class="header">
            <h1 class="header__title">"차차캐치"</h1>
            <span class="header__spacer"></span>
            <span class="header__user">{user_name}</span>
            <button class="header__logout" on:click=on_logout>
                "로그아웃"
            </button>
        </header>
    }
}
