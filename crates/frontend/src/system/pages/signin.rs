use leptos::prelude::*;

use crate::system::session::context::{sign_in, use_session, SessionUser, UserRole};

#[component]
pub fn SignInPage() -> impl IntoView {
    let (email, set_email) = signal(String::new());
    let (display_name, set_display_name) = signal(String::new());
    let (role, set_role) = signal(UserRole::User);
    let (error_message, set_error_message) = signal(Option::<String>::None);

    let session = use_session();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        let email_val = email.get().trim().to_string();
        let name_val = display_name.get().trim().to_string();

        if email_val.is_empty() || !email_val.contains('@') {
            set_error_message.set(Some("Enter a valid email address.".to_string()));
            return;
        }

        set_error_message.set(None);
        sign_in(
            session,
            SessionUser {
                display_name: if name_val.is_empty() {
                    email_val.clone()
                } else {
                    name_val
                },
                email: email_val,
                role: role.get(),
            },
        );
    };

    view! {
        <div class="signin-container">
            <div class="signin-box">
                <h1>"Inventory Dashboard"</h1>
                <h2>"Sign in"</h2>

                <Show when=move || error_message.get().is_some()>
                    <div class="error-message">
                        {move || error_message.get().unwrap_or_default()}
                    </div>
                </Show>

                <form on:submit=on_submit>
                    <div class="form-group">
                        <label for="email">"Email"</label>
                        <input
                            type="email"
                            id="email"
                            placeholder="you@company.com"
                            value=move || email.get()
                            on:input=move |ev| set_email.set(event_target_value(&ev))
                            required
                        />
                    </div>

                    <div class="form-group">
                        <label for="display-name">"Name"</label>
                        <input
                            type="text"
                            id="display-name"
                            placeholder="Your name"
                            value=move || display_name.get()
                            on:input=move |ev| set_display_name.set(event_target_value(&ev))
                        />
                    </div>

                    <div class="form-group">
                        <label for="role">"Role"</label>
                        <select
                            id="role"
                            on:change=move |ev| {
                                set_role.set(UserRole::parse(&event_target_value(&ev)));
                            }
                        >
                            <option value=UserRole::User.as_str() selected=true>
                                {UserRole::User.label()}
                            </option>
                            <option value=UserRole::Admin.as_str()>
                                {UserRole::Admin.label()}
                            </option>
                            <option value=UserRole::ReadOnly.as_str()>
                                {UserRole::ReadOnly.label()}
                            </option>
                        </select>
                    </div>

                    <button type="submit" class="btn-primary">
                        "Sign in"
                    </button>
                </form>
            </div>
        </div>
    }
}
