/// Authenticated request context
///
/// The API layer validates the bearer token and inserts an [`AuthContext`]
/// into request extensions; handlers read it back with axum's `Extension`
/// extractor.

use uuid::Uuid;

/// Identity of the authenticated caller for the duration of one request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthContext {
    /// Authenticated user ID (JWT `sub` claim)
    pub user_id: Uuid,
}

impl AuthContext {
    /// Creates an auth context from validated JWT claims
    pub fn from_jwt(user_id: Uuid) -> Self {
        Self { user_id }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_jwt() {
        let id = Uuid::new_v4();
        let ctx = AuthContext::from_jwt(id);
        assert_eq!(ctx.user_id, id);
    }
}
