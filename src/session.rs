//! The authentication session as an explicit state machine.
//!
//! Every state transition goes through a named method, there is no ambient
//! "maybe signed in" state. Operations that need a signed-in user call
//! [`Session::require_active`] first and propagate its error instead of
//! guessing.

use crate::error::ContextError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Session {
    SignedOut,
    Active { user_id: String, email: String },
    /// The credentials stopped being valid mid-session. Distinct from
    /// `SignedOut` so the caller can tell "never signed in" from "kicked out".
    Expired,
}

impl Session {
    pub fn signed_out() -> Session {
        Session::SignedOut
    }

    pub fn sign_in(&mut self, user_id: &str, email: &str) {
        log::info!("Signing in the user {:?}", email);
        *self = Session::Active {
            user_id: user_id.to_string(),
            email: email.to_string(),
        };
    }

    pub fn sign_out(&mut self) {
        *self = Session::SignedOut;
    }

    pub fn expire(&mut self) {
        if let Session::Active { email, .. } = self {
            log::warn!("The session of the user {:?} expired", email);
        }
        *self = Session::Expired;
    }

    /// The identifier of the signed-in user, or an error naming the actual
    /// session state.
    pub fn require_active(&self) -> Result<&str, ContextError> {
        match self {
            Session::Active { user_id, .. } => Ok(user_id),
            Session::SignedOut => Err(ContextError::with_context(
                "Unable to proceed, no user is signed in".to_string(),
            )),
            Session::Expired => Err(ContextError::with_context(
                "Unable to proceed, the session has expired".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a_signed_out_session_rejects_operations() {
        let session = Session::signed_out();
        assert!(session.require_active().is_err());
    }

    #[test]
    fn signing_in_makes_the_user_available() {
        let mut session = Session::signed_out();
        session.sign_in("user-1", "jane@example.com");
        assert_eq!(session.require_active().unwrap(), "user-1");
    }

    #[test]
    fn an_expired_session_is_distinct_from_a_signed_out_one() {
        let mut session = Session::signed_out();
        session.sign_in("user-1", "jane@example.com");
        session.expire();
        assert_eq!(session, Session::Expired);
        assert!(session.require_active().is_err());
    }
}
