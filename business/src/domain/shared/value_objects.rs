use serde::{Deserialize, Serialize};

/// Identifier of a signed-in shopper, as issued by the identity provider
/// (the `sub` claim of its access tokens). Remote cart rows are keyed by it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns `None` for blank identifiers, which the identity provider
    /// never issues.
    pub fn parse(id: &str) -> Option<Self> {
        let trimmed = id.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for UserId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_parse_and_trim_user_id() {
        let user_id = UserId::parse("  7c9e6679-7425-40de-944b-e07fc1f90ae7 ").unwrap();
        assert_eq!(user_id.as_str(), "7c9e6679-7425-40de-944b-e07fc1f90ae7");
    }

    #[test]
    fn should_reject_blank_user_id() {
        assert!(UserId::parse("").is_none());
        assert!(UserId::parse("   ").is_none());
    }

    #[test]
    fn should_display_user_id() {
        let user_id = UserId::new("shopper-1");
        assert_eq!(format!("{}", user_id), "shopper-1");
    }

    #[test]
    fn should_compare_user_ids_for_equality() {
        assert_eq!(UserId::new("same"), UserId::from("same"));
        assert_ne!(UserId::new("same"), UserId::from("other".to_string()));
    }
}
