//! Top-level page switching. Three pages behind a signed-in session;
//! no URL router, the active page is plain signal state.

use leptos::prelude::*;

use crate::cart::api::CartKind;
use crate::cart::state::use_cart;
use crate::inventory::ui::DashboardPage;
use crate::requests::ui::RequestsPage;
use crate::shared::icons::icon;
use crate::shared::status_message::{use_status, StatusKind};
use crate::system::session::context::{sign_out, use_session};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Dashboard,
    Orders,
    Transfers,
}

impl Page {
    const ALL: [Page; 3] = [Page::Dashboard, Page::Orders, Page::Transfers];

    fn label(self) -> &'static str {
        match self {
            Page::Dashboard => "Dashboard",
            Page::Orders => "Orders",
            Page::Transfers => "Transfers",
        }
    }

    fn icon_name(self) -> &'static str {
        match self {
            Page::Dashboard => "dashboard",
            Page::Orders => "orders",
            Page::Transfers => "transfers",
        }
    }
}

#[component]
pub fn AppRoutes() -> impl IntoView {
    let page = RwSignal::new(Page::Dashboard);

    view! {
        <TopNav page=page />
        <StatusStrip />
        <main class="page">
            {move || match page.get() {
                Page::Dashboard => view! { <DashboardPage /> }.into_any(),
                Page::Orders => view! { <RequestsPage kind=CartKind::Orders /> }.into_any(),
                Page::Transfers => view! { <RequestsPage kind=CartKind::Transfers /> }.into_any(),
            }}
        </main>
    }
}

#[component]
fn TopNav(page: RwSignal<Page>) -> impl IntoView {
    let session = use_session();
    let cart = use_cart();

    let user_label = move || {
        session.with(|s| {
            s.user
                .as_ref()
                .map(|u| u.display_name.clone())
                .unwrap_or_default()
        })
    };

    view! {
        <nav class="top-nav">
            <div class="top-nav__brand">
                {icon("box")}
                <span>"Inventory Dashboard"</span>
            </div>
            <div class="top-nav__pages">
                {Page::ALL
                    .into_iter()
                    .map(|target| {
                        view! {
                            <button
                                class="top-nav__link"
                                class:active=move || page.get() == target
                                on:click=move |_| page.set(target)
                            >
                                {icon(target.icon_name())}
                                <span>{target.label()}</span>
                            </button>
                        }
                    })
                    .collect_view()}
            </div>
            <div class="top-nav__session">
                <span class="top-nav__cart" title="Cart lines">
                    {icon("cart")}
                    <span>{move || cart.total_lines()}</span>
                </span>
                <span class="top-nav__user">{user_label}</span>
                <button
                    class="btn-icon"
                    title="Sign out"
                    on:click=move |_| sign_out(session)
                >
                    {icon("sign-out")}
                </button>
            </div>
        </nav>
    }
}

/// Transient success/error strip under the nav, fed by the status channel.
#[component]
fn StatusStrip() -> impl IntoView {
    let status = use_status();
    let message = status.message();

    view! {
        <Show when=move || message.get().is_some()>
            <div
                class="status-strip"
                class=(
                    "status-strip--error",
                    move || {
                        message.with(|m| {
                            m.as_ref().map(|m| m.kind == StatusKind::Error).unwrap_or(false)
                        })
                    },
                )
            >
                <span>{move || message.get().map(|m| m.text).unwrap_or_default()}</span>
                <button class="btn-icon" title="Dismiss" on:click=move |_| status.clear()>
                    {icon("x")}
                </button>
            </div>
        </Show>
    }
}
