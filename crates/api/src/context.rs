use stratboard_auth::Principal;

/// Authentication outcome attached to every request by the auth middleware.
///
/// `principal` is `None` when the request carried no valid bearer token; the
/// route guards decide what that means.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AuthContext {
    principal: Option<Principal>,
}

impl AuthContext {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(principal: Principal) -> Self {
        Self {
            principal: Some(principal),
        }
    }

    pub fn principal(&self) -> Option<&Principal> {
        self.principal.as_ref()
    }
}
