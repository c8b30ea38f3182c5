/// Immutable view of the stored login and profile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub token: Option<String>,
    pub user_id: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub photo: Option<String>,
    pub location: Option<String>,
    pub logged_in: bool,
    pub onboarding_completed: bool,
}

impl Session {
    /// Bearer token, if the user is logged in with a non-empty token.
    pub fn token(&self) -> Option<&str> {
        if !self.logged_in {
            return None;
        }
        self.token.as_deref().filter(|t| !t.is_empty())
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// Display name, falling back to the email address.
    pub fn display_name(&self) -> Option<&str> {
        self.name
            .as_deref()
            .filter(|n| !n.is_empty())
            .or(self.email.as_deref())
    }
}
