//! Route guard for pages that require an authenticated session.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::state::auth::AuthState;

/// Gate for protected content.
///
/// While the session is still hydrating, shows a neutral spinner and performs
/// no navigation. Once loading settles: unauthenticated users are sent to
/// `/login` and nothing is rendered for them; authenticated users get the
/// wrapped content unchanged.
#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let navigate = use_navigate();

    Effect::new(move || {
        let state = auth.get();
        if !state.loading && !state.is_authenticated() {
            navigate("/login", NavigateOptions::default());
        }
    });

    view! {
        <Show
            when=move || {
                let state = auth.get();
                !state.loading && state.is_authenticated()
            }
            fallback=move || {
                view! {
                    // Redirect in progress renders nothing at all.
                    <Show when=move || auth.get().loading fallback=|| ()>
                        <div class="loading-screen">
                            <div class="loading-screen__spinner"></div>
                            <p>"로딩 중..."</p>
                        </div>
                    </Show>
                }
            }
        >
            {children()}
        </Show>
    }
}
