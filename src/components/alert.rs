//! Inline alert banner for page-level action failures.

use leptos::prelude::*;

/// Dismissible banner bound to an optional message signal. Rendered only
/// while a message is present; page actions set it, dismissal clears it.
#[component]
pub fn AlertBanner(message: RwSignal<Option<String>>) -> impl IntoView {
    view! {
        <Show when=move || message.get().is_some()>
            <div class="alert-banner" role="alert">
                <span class="alert-banner__text">
                    {move || message.get().unwrap_or_default()}
                </span>
                <button class="alert-banner__close" on:click=move |_| message.set(None)>
                    "✕"
                </button>
            </div>
        </Show>
    }
}
