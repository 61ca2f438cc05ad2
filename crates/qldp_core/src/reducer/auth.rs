//! Reducer for the `user` slice.
//!
//! # Invariants
//! - Logout always restores the signed-out initial session.
//! - `sent` toggles never touch authentication fields.

use crate::action::{Action, AuthAction};
use crate::model::session::AuthSession;
use std::sync::Arc;

pub fn user(state: &Arc<AuthSession>, action: &Action) -> Arc<AuthSession> {
    match action {
        Action::Auth(AuthAction::LoginSuccess(login)) => Arc::new(AuthSession::signed_in(login)),
        Action::Auth(AuthAction::LogoutSuccess) => Arc::new(AuthSession::default()),
        Action::Auth(AuthAction::SendMailSuccess) => with_sent(state, true),
        Action::Auth(AuthAction::ClearSent) => with_sent(state, false),
        _ => Arc::clone(state),
    }
}

fn with_sent(state: &Arc<AuthSession>, sent: bool) -> Arc<AuthSession> {
    Arc::new(AuthSession {
        sent,
        ..AuthSession::clone(state)
    })
}
