//! Session lifecycle for the bot account.
//!
//! Exactly one [`Session`] exists per process; it owns the authenticated/not
//! state and nothing else reads or writes it. The flag is a plain atomic:
//! its transitions are boolean flips tolerant of lost updates, so a
//! duplicate concurrent login costs one wasted round trip and nothing more.
//! The remote login is idempotent, so racing logins are tolerated rather
//! than serialized.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use tracing::info;

use crate::{client::RobloxClient, error::RobloxError};

/// The process-wide authentication state for the bot identity.
pub struct Session {
    client: Arc<RobloxClient>,
    authenticated: AtomicBool,
}

impl Session {
    pub fn new(client: Arc<RobloxClient>) -> Self {
        Self { client, authenticated: AtomicBool::new(false) }
    }

    /// Make sure the bot account is logged in.
    ///
    /// Fast path: already authenticated, no network. Otherwise make sure a
    /// request token is held and run the self-identity check; the session
    /// only counts as authenticated once the platform reports a valid
    /// identity.
    pub async fn ensure_authenticated(&self) -> Result<(), RobloxError> {
        if self.authenticated.load(Ordering::Acquire) {
            return Ok(());
        }

        self.client.ensure_csrf().await?;
        let user = self.client.authenticated_user().await?;
        self.authenticated.store(true, Ordering::Release);
        info!(user_id = user.id, name = %user.name, "authenticated as bot account");
        Ok(())
    }

    /// Mark the session unauthenticated. Idempotent.
    pub fn invalidate(&self) {
        self.authenticated.store(false, Ordering::Release);
    }

    /// Current view of the flag.
    pub fn is_authenticated(&self) -> bool {
        self.authenticated.load(Ordering::Acquire)
    }
}
