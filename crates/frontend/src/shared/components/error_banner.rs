use crate::shared::icons::icon;
use leptos::prelude::*;

/// Dismissible banner for fetch-cycle errors.
#[component]
pub fn ErrorBanner(
    #[prop(into)] error: Signal<Option<String>>,
    on_dismiss: Callback<()>,
) -> impl IntoView {
    view! {
        <Show when=move || error.get().is_some()>
            <div class="error-banner" role="alert">
                <span class="error-banner__icon">{icon("alert")}</span>
                <span class="error-banner__text">
                    {move || error.get().unwrap_or_default()}
                </span>
                <button
                    class="error-banner__dismiss"
                    title="Dismiss"
                    on:click=move |_| on_dismiss.run(())
                >
                    {icon("x")}
                </button>
            </div>
        </Show>
    }
}
