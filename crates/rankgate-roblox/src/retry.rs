//! Retry policy for platform operations.
//!
//! One failure class is retried: session invalidity, the dominant failure
//! mode when holding a long-lived session. A re-login resolves it
//! deterministically, so the backoff is a fixed delay rather than
//! exponential. Everything else (validation and not-found conditions,
//! unclassified platform errors) propagates on first occurrence.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::{error::RobloxError, session::Session};

/// Maximum attempts per operation, counting the first.
pub const MAX_ATTEMPTS: u32 = 3;

/// Fixed delay between attempts after a session-invalidity failure.
pub const RETRY_BACKOFF: Duration = Duration::from_millis(1500);

/// Run `operation` with the session guaranteed valid beforehand,
/// re-logging-in and retrying when the platform rejects the session token.
pub async fn with_retry<T, F, Fut>(session: &Session, operation: F) -> Result<T, RobloxError>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T, RobloxError>>,
{
    let mut attempt = 1;
    loop {
        session.ensure_authenticated().await?;

        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) if err.is_session_invalid() && attempt < MAX_ATTEMPTS => {
                warn!(attempt, "session rejected by platform, re-authenticating");
                session.invalidate();
                tokio::time::sleep(RETRY_BACKOFF).await;
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}
