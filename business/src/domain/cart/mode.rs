use crate::domain::shared::value_objects::UserId;

/// Which store is authoritative for the live cart.
///
/// Exactly one is: the browser-local slot while nobody is signed in, the
/// remote table rows of the signed-in shopper otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CartMode {
    #[default]
    Guest,
    Authenticated(UserId),
}

impl CartMode {
    pub fn from_identity(user_id: Option<UserId>) -> Self {
        match user_id {
            Some(user_id) => CartMode::Authenticated(user_id),
            None => CartMode::Guest,
        }
    }

    pub fn is_guest(&self) -> bool {
        matches!(self, CartMode::Guest)
    }
}

impl std::fmt::Display for CartMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CartMode::Guest => write!(f, "guest"),
            CartMode::Authenticated(user_id) => write!(f, "authenticated({})", user_id),
        }
    }
}
