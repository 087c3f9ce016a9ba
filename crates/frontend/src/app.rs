use leptos::prelude::*;

use crate::cart::state::provide_cart_store;
use crate::inventory::store::provide_dashboard_store;
use crate::routes::AppRoutes;
use crate::shared::status_message::provide_status_channel;
use crate::system::pages::signin::SignInPage;
use crate::system::session::context::{use_session, SessionProvider};

#[component]
pub fn App() -> impl IntoView {
    view! {
        <SessionProvider>
            <Gate />
        </SessionProvider>
    }
}

/// Sign-in gate. The data stores live inside the gate so the dashboard
/// bootstrap only runs for a signed-in session.
#[component]
fn Gate() -> impl IntoView {
    let session = use_session();

    view! {
        <Show
            when=move || session.with(|s| s.user.is_some())
            fallback=|| view! { <SignInPage /> }
        >
            <Shell />
        </Show>
    }
}

#[component]
fn Shell() -> impl IntoView {
    let status = provide_status_channel();
    let cart = provide_cart_store(status);
    let dashboard = provide_dashboard_store();
    let session = use_session();

    // Bootstrap: entity catalog and part-branch map, then the one effect
    // driving fetch cycles off the intent memo. The cart loads alongside.
    dashboard.init();
    dashboard.start_pipeline();
    if let Some(email) = session.with_untracked(|s| s.email().map(String::from)) {
        cart.load(email);
    }

    view! { <AppRoutes /> }
}
