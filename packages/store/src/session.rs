//! # Session controller
//!
//! [`Session`] owns the bearer [`Credential`], the signed-in [`User`] and the
//! active [`Screen`]. It is the only place either value is written.
//!
//! ## Lifecycle
//!
//! | Step | Effect |
//! |------|--------|
//! | [`begin_identity`](Session::begin_identity) | store the new credential, drop any old user, enter `loading` |
//! | [`finish_identity`](Session::finish_identity) with `Ok(user)` | store the user, select the dashboard |
//! | [`finish_identity`](Session::finish_identity) with `Err(_)` | clear credential and user, select sign-in (no retry) |
//! | [`sign_out`](Session::sign_out) / [`expire`](Session::expire) | clear credential and user, select sign-in |
//!
//! ## Generations
//!
//! Every credential change bumps [`generation`](Session::generation). Tickets
//! handed out by `begin_identity` carry the generation they were issued for,
//! and results arriving for an older generation are dropped. This keeps a slow
//! `/users/me/` reply from a superseded login from overwriting the current
//! session.

use api::{ApiError, Credential, User};

use crate::backend::Backend;

/// Which screen the app is showing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Screen {
    #[default]
    SignIn,
    SignUp,
    Dashboard,
}

/// What the renderer should draw for the current state.
#[derive(Debug, Clone, PartialEq)]
pub enum Frame {
    Loading,
    SignIn { notice: Option<String> },
    SignUp,
    Dashboard { user: User, credential: Credential },
    /// Dashboard selected without a user and credential pair. Render nothing
    /// and call [`Session::recover`].
    Invalid,
}

/// Proof that an identity fetch was started for a given credential.
#[derive(Debug, Clone, PartialEq)]
pub struct IdentityTicket {
    generation: u64,
    credential: Credential,
}

impl IdentityTicket {
    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    credential: Option<Credential>,
    user: Option<User>,
    screen: Screen,
    loading: bool,
    notice: Option<String>,
    generation: u64,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn credential(&self) -> Option<&Credential> {
        self.credential.as_ref()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Adopt a fresh credential and start resolving who it belongs to.
    pub fn begin_identity(&mut self, credential: Credential) -> IdentityTicket {
        self.generation += 1;
        self.credential = Some(credential.clone());
        self.user = None;
        self.notice = None;
        self.loading = true;
        IdentityTicket {
            generation: self.generation,
            credential,
        }
    }

    /// Apply the `/users/me/` result. Returns `false` if the ticket is stale.
    pub fn finish_identity(
        &mut self,
        ticket: IdentityTicket,
        result: Result<User, ApiError>,
    ) -> bool {
        if ticket.generation != self.generation {
            tracing::debug!(
                ticket = ticket.generation,
                current = self.generation,
                "dropping stale identity result"
            );
            return false;
        }

        self.loading = false;
        match result {
            Ok(user) => {
                tracing::info!(user_id = user.id, "signed in");
                self.user = Some(user);
                self.screen = Screen::Dashboard;
            }
            Err(e) => {
                if e.is_transport() {
                    tracing::warn!(error = %e, "identity fetch failed, signing out");
                } else {
                    tracing::info!(error = %e, "credential refused, signing out");
                }
                self.clear();
            }
        }
        true
    }

    /// Run the whole identity round trip for `credential`.
    pub async fn establish<B: Backend>(&mut self, backend: &B, credential: Credential) -> bool {
        let ticket = self.begin_identity(credential);
        let result = backend.current_user(ticket.credential()).await;
        self.finish_identity(ticket, result)
    }

    pub fn sign_out(&mut self) {
        tracing::info!("signed out");
        self.notice = None;
        self.clear();
    }

    /// Sign out because an authorized request was refused, unless the session
    /// has already moved past `generation`.
    pub fn expire(&mut self, generation: u64) -> bool {
        if generation != self.generation || self.credential.is_none() {
            return false;
        }
        tracing::info!("credential expired, signing out");
        self.clear();
        true
    }

    /// Switch between the sign-in and sign-up screens.
    ///
    /// Refused while an identity fetch is outstanding. The dashboard is only
    /// ever reached through [`finish_identity`](Self::finish_identity).
    pub fn show(&mut self, screen: Screen) -> bool {
        if self.loading || screen == Screen::Dashboard {
            return false;
        }
        self.notice = None;
        self.screen = screen;
        true
    }

    /// Send the user to sign-in with a one-off message for that screen.
    pub fn route_to_sign_in(&mut self, notice: impl Into<String>) {
        self.screen = Screen::SignIn;
        self.notice = Some(notice.into());
    }

    /// Drop the one-off sign-in message once the user acts on the form.
    pub fn clear_notice(&mut self) {
        self.notice = None;
    }

    pub fn frame(&self) -> Frame {
        if self.loading {
            return Frame::Loading;
        }
        match self.screen {
            Screen::SignIn => Frame::SignIn {
                notice: self.notice.clone(),
            },
            Screen::SignUp => Frame::SignUp,
            Screen::Dashboard => match (&self.user, &self.credential) {
                (Some(user), Some(credential)) => Frame::Dashboard {
                    user: user.clone(),
                    credential: credential.clone(),
                },
                _ => Frame::Invalid,
            },
        }
    }

    /// Reset a [`Frame::Invalid`] state back to sign-in.
    pub fn recover(&mut self) {
        if self.frame() == Frame::Invalid {
            tracing::warn!("dashboard selected without a session, returning to sign-in");
            self.clear();
        }
    }

    fn clear(&mut self) {
        if self.credential.is_some() {
            self.generation += 1;
        }
        self.credential = None;
        self.user = None;
        self.loading = false;
        self.screen = Screen::SignIn;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{Call, MemoryBackend};

    fn ana() -> User {
        serde_json::from_value(serde_json::json!({
            "id": 1, "email": "user@example.com", "name": "Ana"
        }))
        .unwrap()
    }

    fn cred(token: &str) -> Credential {
        Credential::new(token).unwrap()
    }

    #[test]
    fn test_starts_on_sign_in() {
        let session = Session::new();
        assert_eq!(session.frame(), Frame::SignIn { notice: None });
        assert!(session.credential().is_none());
    }

    #[tokio::test]
    async fn test_establish_reaches_dashboard() {
        let backend = MemoryBackend::new();
        backend.reply_user(Ok(ana()));

        let mut session = Session::new();
        assert!(session.establish(&backend, cred("abc")).await);

        match session.frame() {
            Frame::Dashboard { user, credential } => {
                assert_eq!(user.greeting(), "Olá, Ana!");
                assert_eq!(credential, cred("abc"));
            }
            other => panic!("expected dashboard, got {other:?}"),
        }
        assert_eq!(backend.calls(), vec![Call::CurrentUser]);
    }

    #[tokio::test]
    async fn test_identity_failure_clears_credential() {
        for reply in [
            Err(ApiError::Rejected {
                status: 401,
                detail: None,
            }),
            Err(ApiError::Rejected {
                status: 500,
                detail: Some("boom".into()),
            }),
            Err(ApiError::Transport("refused".into())),
            Err(ApiError::Decode("eof".into())),
        ] {
            let backend = MemoryBackend::new();
            backend.reply_user(reply);

            let mut session = Session::new();
            session.show(Screen::SignUp);
            session.establish(&backend, cred("abc")).await;

            assert!(session.credential().is_none());
            assert!(session.user().is_none());
            assert_eq!(session.screen(), Screen::SignIn);
            assert!(!session.is_loading());
            // One attempt only, never retried.
            assert_eq!(backend.count(&Call::CurrentUser), 1);
        }
    }

    #[test]
    fn test_loading_blocks_screen_switch() {
        let mut session = Session::new();
        let _ticket = session.begin_identity(cred("abc"));
        assert_eq!(session.frame(), Frame::Loading);
        assert!(!session.show(Screen::SignUp));
        assert_eq!(session.screen(), Screen::SignIn);
    }

    #[test]
    fn test_stale_identity_result_is_dropped() {
        let mut session = Session::new();
        let first = session.begin_identity(cred("old"));
        let second = session.begin_identity(cred("new"));

        assert!(!session.finish_identity(first, Err(ApiError::Transport("late".into()))));
        assert_eq!(session.credential(), Some(&cred("new")));
        assert!(session.is_loading());

        assert!(session.finish_identity(second, Ok(ana())));
        assert_eq!(session.screen(), Screen::Dashboard);
    }

    #[test]
    fn test_identity_after_sign_out_is_dropped() {
        let mut session = Session::new();
        let ticket = session.begin_identity(cred("abc"));
        session.sign_out();
        assert!(!session.finish_identity(ticket, Ok(ana())));
        assert!(session.user().is_none());
        assert_eq!(session.frame(), Frame::SignIn { notice: None });
    }

    #[tokio::test]
    async fn test_sign_out_clears_both() {
        let backend = MemoryBackend::new();
        backend.reply_user(Ok(ana()));
        let mut session = Session::new();
        session.establish(&backend, cred("abc")).await;

        session.sign_out();
        assert!(session.credential().is_none());
        assert!(session.user().is_none());
        assert_eq!(session.screen(), Screen::SignIn);
    }

    #[tokio::test]
    async fn test_expire_respects_generation() {
        let backend = MemoryBackend::new();
        backend.reply_user(Ok(ana()));
        let mut session = Session::new();
        session.establish(&backend, cred("abc")).await;
        let generation = session.generation();

        assert!(!session.expire(generation - 1));
        assert_eq!(session.screen(), Screen::Dashboard);

        assert!(session.expire(generation));
        assert!(session.credential().is_none());
        assert_eq!(session.screen(), Screen::SignIn);
    }

    #[test]
    fn test_dashboard_cannot_be_selected_by_hand() {
        let mut session = Session::new();
        assert!(!session.show(Screen::Dashboard));
        assert_eq!(session.screen(), Screen::SignIn);
    }

    #[test]
    fn test_invalid_dashboard_recovers_to_sign_in() {
        let mut session = Session {
            screen: Screen::Dashboard,
            credential: Some(cred("abc")),
            ..Session::default()
        };
        assert_eq!(session.frame(), Frame::Invalid);

        session.recover();
        assert_eq!(session.frame(), Frame::SignIn { notice: None });
        assert!(session.credential().is_none());
    }

    #[test]
    fn test_notice_shown_once() {
        let mut session = Session::new();
        session.show(Screen::SignUp);
        session.route_to_sign_in("registered");
        assert_eq!(
            session.frame(),
            Frame::SignIn {
                notice: Some("registered".into())
            }
        );

        session.show(Screen::SignUp);
        session.show(Screen::SignIn);
        assert_eq!(session.notice(), None);
    }

    #[test]
    fn test_notice_cleared_on_next_submit() {
        let mut session = Session::new();
        session.route_to_sign_in(crate::messages::AUTO_LOGIN_FAILED);

        session.clear_notice();
        assert_eq!(session.frame(), Frame::SignIn { notice: None });

        // Clearing again is harmless and does not touch the screen.
        session.clear_notice();
        assert_eq!(session.screen(), Screen::SignIn);
    }
}
