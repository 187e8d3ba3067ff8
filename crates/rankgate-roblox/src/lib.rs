//! # rankgate-roblox
//!
//! Adapter for the Roblox group-management web API, plus the two pieces of
//! machinery every call site needs with it:
//!
//! - [`RobloxClient`] — typed operations against the group and user APIs,
//!   authenticating with the bot account's long-lived `.ROBLOSECURITY`
//!   cookie and the platform's rotating request token. Failures are
//!   classified here, at the adapter boundary: a token rejection becomes
//!   [`RobloxError::SessionInvalid`], everything else keeps its status and
//!   message.
//! - [`Session`] — the single process-wide authenticated/not state for the
//!   bot identity.
//! - [`with_retry`] — runs an operation with the session guaranteed valid,
//!   re-logging-in and retrying (bounded, fixed backoff) when the platform
//!   rejects the session token.

pub mod client;
pub mod error;
pub mod retry;
pub mod session;
pub mod types;

pub use client::{Endpoints, RobloxClient};
pub use error::RobloxError;
pub use retry::{MAX_ATTEMPTS, RETRY_BACKOFF, with_retry};
pub use session::Session;
pub use types::{AuthenticatedUser, Role};
