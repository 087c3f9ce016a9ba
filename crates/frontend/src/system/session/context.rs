use leptos::prelude::*;

use super::storage;

/// Role hierarchy: Admin > User > ReadOnly.
///
/// ReadOnly users can browse the dashboard but not add to the cart or
/// change request statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UserRole {
    Admin,
    User,
    #[default]
    ReadOnly,
}

impl UserRole {
    pub fn parse(s: &str) -> Self {
        match s {
            "Inventory.Admin" => UserRole::Admin,
            "Inventory.User" => UserRole::User,
            _ => UserRole::ReadOnly,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "Inventory.Admin",
            UserRole::User => "Inventory.User",
            UserRole::ReadOnly => "Inventory.ReadOnly",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            UserRole::Admin => "Admin",
            UserRole::User => "User",
            UserRole::ReadOnly => "Read only",
        }
    }

    /// Whether this role may create orders/transfers and edit requests.
    pub fn can_edit(&self) -> bool {
        matches!(self, UserRole::Admin | UserRole::User)
    }

    /// Whether this role satisfies a required role.
    pub fn allows(&self, required: UserRole) -> bool {
        match required {
            UserRole::ReadOnly => true,
            UserRole::User => self.can_edit(),
            UserRole::Admin => matches!(self, UserRole::Admin),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionUser {
    pub email: String,
    pub display_name: String,
    pub role: UserRole,
}

#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub user: Option<SessionUser>,
}

impl SessionState {
    pub fn email(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.email.as_str())
    }

    pub fn can_edit(&self) -> bool {
        self.user.as_ref().map(|u| u.role.can_edit()).unwrap_or(false)
    }
}

/// Session context provider. Restores a saved session from localStorage
/// before the first render so a page refresh keeps the user signed in.
#[component]
pub fn SessionProvider(children: ChildrenFn) -> impl IntoView {
    let session = RwSignal::new(SessionState {
        user: storage::load_session(),
    });

    provide_context(session);

    children()
}

/// Hook to access session state
pub fn use_session() -> RwSignal<SessionState> {
    use_context::<RwSignal<SessionState>>().expect("SessionProvider not found in component tree")
}

/// Sign in and persist the session.
pub fn sign_in(session: RwSignal<SessionState>, user: SessionUser) {
    storage::save_session(&user);
    log::info!("Signed in as {} ({})", user.email, user.role.as_str());
    session.set(SessionState { user: Some(user) });
}

/// Sign out and clear the saved session.
pub fn sign_out(session: RwSignal<SessionState>) {
    storage::clear_session();
    log::info!("Signed out");
    session.set(SessionState::default());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse_round_trip() {
        assert_eq!(UserRole::parse("Inventory.Admin"), UserRole::Admin);
        assert_eq!(UserRole::parse("Inventory.User"), UserRole::User);
        assert_eq!(UserRole::parse("Inventory.ReadOnly"), UserRole::ReadOnly);
        assert_eq!(UserRole::parse("garbage"), UserRole::ReadOnly);
        assert_eq!(UserRole::parse(UserRole::Admin.as_str()), UserRole::Admin);
    }

    #[test]
    fn test_role_hierarchy() {
        assert!(UserRole::Admin.allows(UserRole::ReadOnly));
        assert!(UserRole::Admin.allows(UserRole::User));
        assert!(UserRole::Admin.allows(UserRole::Admin));
        assert!(UserRole::User.allows(UserRole::User));
        assert!(!UserRole::User.allows(UserRole::Admin));
        assert!(UserRole::ReadOnly.allows(UserRole::ReadOnly));
        assert!(!UserRole::ReadOnly.allows(UserRole::User));
    }

    #[test]
    fn test_session_state_helpers() {
        let empty = SessionState::default();
        assert_eq!(empty.email(), None);
        assert!(!empty.can_edit());

        let signed_in = SessionState {
            user: Some(SessionUser {
                email: "buyer@example.com".to_string(),
                display_name: "Buyer".to_string(),
                role: UserRole::User,
            }),
        };
        assert_eq!(signed_in.email(), Some("buyer@example.com"));
        assert!(signed_in.can_edit());
    }
}
