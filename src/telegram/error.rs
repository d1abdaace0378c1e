//! Error taxonomy for the session client.

use thiserror::Error;

use crate::telegram::structs::FailedDeletion;
use crate::telegram::transport::TransportError;

/// Typed failure of a public session operation.
///
/// Every remote-call failure is caught at the operation boundary and classified
/// into one of these variants; raw transport errors never escape. Nothing here
/// is fatal to the process: each variant is recoverable by retrying the
/// specific operation (with a password, in the case of
/// [`PasswordRequired`](Self::PasswordRequired)).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// Application credentials are missing or invalid. The operation never
    /// reached the network.
    #[error("invalid application credentials: {0}")]
    Configuration(String),

    /// The transport could not be created, connected, or used for a
    /// non-authentication call.
    #[error("connection failed: {0}")]
    Connection(TransportError),

    /// The remote side rejected an authentication step (bad code, expired
    /// challenge, bad password). The pending challenge stays valid from this
    /// crate's point of view, so the caller may retry.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// The account has a second-factor cloud password; the caller must invoke
    /// code verification again with the password supplied.
    #[error("two-factor cloud password required")]
    PasswordRequired,

    /// One or more individual deletions failed during a bulk purge. The batch
    /// still ran to completion for everything else.
    #[error("bulk deletion partially failed for {} message(s)", .0.len())]
    PartialFailure(Vec<FailedDeletion>),
}
