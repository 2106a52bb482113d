use crate::domain::UserId;

/// Resolves a bearer token issued by the external identity provider to the
/// user it was issued for.
pub trait AuthenticationPort {
    fn authenticate(&self, token: &str) -> Option<UserId>;
}
