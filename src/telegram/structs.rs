//! Data structures shared across the session client and transport seams.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Opaque reference to a remote conversation.
///
/// Used to scope message enumeration and deletion; the value carries no meaning
/// for this crate beyond identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityId(pub i64);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Read-only projection of a remote conversation.
///
/// The list order of dialogs is whatever the remote API returned; the session
/// client never reorders or filters them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dialog {
    /// Human-readable conversation name
    pub display_name: String,
    /// Opaque reference used for follow-up operations on this conversation
    pub entity: EntityId,
}

/// Pending OTP challenge produced by a successful code request.
///
/// Held by the caller across UI turns until verification is attempted or
/// abandoned. Expiry is owned by the remote side; verifying with an expired
/// hash surfaces as an authentication error, not a local invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthChallenge {
    /// Phone number the code was sent to
    pub phone: String,
    /// Server-issued hash that must accompany the code during verification
    pub phone_code_hash: String,
}

/// Outcome of an OTP code request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeRequest {
    /// The stored session is already signed in; no code was sent.
    AlreadyAuthorized,
    /// A code was sent; verification needs the contained challenge.
    CodeSent(AuthChallenge),
}

/// One message that could not be deleted during a bulk purge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedDeletion {
    /// Conversation the message belongs to
    pub entity: EntityId,
    /// Failed message id; `None` when the messages of the entity could not be
    /// enumerated at all
    pub message_id: Option<i32>,
    /// Remote failure reason, for display purposes
    pub reason: String,
}

/// Cooperative cancellation flag for bulk operations.
///
/// Cloneable and cheap to share; the UI keeps one clone and the bulk delete
/// loop checks the other between deletions. Cancelling stops scheduling further
/// deletions but the connection bracket still closes normally.
///
/// # Examples
///
/// ```
/// use telesweep::telegram::CancelToken;
///
/// let token = CancelToken::new();
/// let ui_side = token.clone();
///
/// assert!(!token.is_cancelled());
/// ui_side.cancel();
/// assert!(token.is_cancelled());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    /// Create a fresh, non-cancelled token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Idempotent.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation has been requested on any clone of this token.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancel_token_shared_across_clones() {
        let token = CancelToken::new();
        let clone = token.clone();

        assert!(!token.is_cancelled());
        assert!(!clone.is_cancelled());

        clone.cancel();
        assert!(token.is_cancelled());
        assert!(clone.is_cancelled());
    }

    #[test]
    fn test_entity_id_display() {
        assert_eq!(EntityId(123).to_string(), "123");
        assert_eq!(EntityId(-42).to_string(), "-42");
    }
}
