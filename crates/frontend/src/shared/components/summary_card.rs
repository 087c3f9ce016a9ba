use crate::shared::icons::icon;
use leptos::prelude::*;

/// Metric card shown in the dashboard header row.
///
/// `value` is `None` until the first reconcile completes, which renders
/// as a dash instead of a misleading zero.
#[component]
pub fn SummaryCard(
    /// Label displayed above the value
    label: String,
    /// Icon name from the icon() helper
    icon_name: String,
    /// Preformatted value text (None = not loaded yet)
    #[prop(into)]
    value: Signal<Option<String>>,
    /// Optional subtitle below the value
    #[prop(into, optional)]
    subtitle: Signal<Option<String>>,
) -> impl IntoView {
    let formatted = move || value.get().unwrap_or_else(|| "\u{2014}".to_string());

    let subtitle_view = move || {
        subtitle
            .get()
            .map(|s| view! { <div class="summary-card__subtitle">{s}</div> })
    };

    view! {
        <div class="summary-card">
            <div class="summary-card__icon">{icon(&icon_name)}</div>
            <div class="summary-card__content">
                <div class="summary-card__label">{label}</div>
                <div class="summary-card__value">{formatted}</div>
                {subtitle_view}
            </div>
        </div>
    }
}
