use leptos::prelude::*;

/// Thin progress bar pinned under the page header while a fetch cycle runs.
///
/// Progress is coarse (a handful of steps per cycle), so the bar animates
/// between values with CSS rather than tracking bytes.
#[component]
pub fn LoadingBar(
    #[prop(into)] visible: Signal<bool>,
    /// Progress percentage, 0-100
    #[prop(into)]
    progress: Signal<u8>,
) -> impl IntoView {
    view! {
        <Show when=move || visible.get()>
            <div class="loading-bar">
                <div
                    class="loading-bar__fill"
                    style:width=move || format!("{}%", progress.get().min(100))
                ></div>
            </div>
        </Show>
    }
}
