//! Identity seam — who the program is running for.
//!
//! The engine only needs a stable user id (the persistence namespace) and,
//! optionally, an address to notify. The default is a single local user;
//! a multi-tenant deployment plugs in its own implementation.

/// A resolved user identity.
pub trait Identity: Send + Sync {
    /// Stable identifier, used as the persistence namespace.
    fn user_id(&self) -> &str;

    /// Email address for milestone notifications, when known.
    fn email(&self) -> Option<&str> {
        None
    }

    /// Name used when addressing the user.
    fn display_name(&self) -> &str;

    /// Whether the identity was verified by an auth backend. The local
    /// default is trusted implicitly.
    fn is_authenticated(&self) -> bool {
        true
    }
}

/// Single-tenant identity for local use. The id defaults to "local" and
/// can be overridden to keep several profiles side by side.
#[derive(Debug, Clone)]
pub struct LocalIdentity {
    user_id: String,
    display_name: String,
    email: Option<String>,
}

impl LocalIdentity {
    pub fn new(user_id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            display_name: display_name.into(),
            email: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

impl Default for LocalIdentity {
    fn default() -> Self {
        Self::new("local", "Operator")
    }
}

impl Identity for LocalIdentity {
    fn user_id(&self) -> &str {
        &self.user_id
    }

    fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    fn display_name(&self) -> &str {
        &self.display_name
    }
}
