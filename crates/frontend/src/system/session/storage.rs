use web_sys::window;

use super::context::{SessionUser, UserRole};

const EMAIL_KEY: &str = "session_user_email";
const NAME_KEY: &str = "session_user_name";
const ROLE_KEY: &str = "session_user_role";

fn get_local_storage() -> Option<web_sys::Storage> {
    window()?.local_storage().ok()?
}

/// Persist the signed-in user to localStorage.
pub fn save_session(user: &SessionUser) {
    if let Some(storage) = get_local_storage() {
        let _ = storage.set_item(EMAIL_KEY, &user.email);
        let _ = storage.set_item(NAME_KEY, &user.display_name);
        let _ = storage.set_item(ROLE_KEY, user.role.as_str());
    }
}

/// Restore the session from localStorage, if one was saved.
pub fn load_session() -> Option<SessionUser> {
    let storage = get_local_storage()?;
    let email = storage.get_item(EMAIL_KEY).ok()??;
    if email.trim().is_empty() {
        return None;
    }
    let display_name = storage
        .get_item(NAME_KEY)
        .ok()
        .flatten()
        .unwrap_or_default();
    let role = storage
        .get_item(ROLE_KEY)
        .ok()
        .flatten()
        .map(|r| UserRole::parse(&r))
        .unwrap_or_default();
    Some(SessionUser {
        email,
        display_name,
        role,
    })
}

/// Remove the saved session.
pub fn clear_session() {
    if let Some(storage) = get_local_storage() {
        let _ = storage.remove_item(EMAIL_KEY);
        let _ = storage.remove_item(NAME_KEY);
        let _ = storage.remove_item(ROLE_KEY);
    }
}
