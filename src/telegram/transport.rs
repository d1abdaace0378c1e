//! Transport seams for the wire-level messaging client.
//!
//! The wire protocol is not implemented here. Any client library exposing the
//! primitives below can sit behind [`Transport`]; the session client only relies
//! on the contracts documented on each method. [`Connector`] builds one fresh
//! handle per public operation, so handles are never shared between operations.
//!
//! Both traits carry [`mockall`] mocks ([`MockTransport`], [`MockConnector`])
//! used by the session client tests and available to embedding applications for
//! their own tests.

use mockall::automock;

use crate::telegram::Credentials;
use crate::telegram::structs::{Dialog, EntityId};

/// Failure reported by the underlying wire client.
///
/// The concrete client library has its own error hierarchy; at this seam it is
/// reduced to a displayable reason. Classification into the session error
/// taxonomy happens at the operation boundary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct TransportError(pub String);

/// Result of a code request that was actually sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentCode {
    /// Server-issued hash to pass back during sign-in
    pub phone_code_hash: String,
}

/// Result of a sign-in attempt, as data.
///
/// The second-factor branch is a variant rather than an error: the caller
/// decides whether to retry with a password, so the state machine transition is
/// a plain match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignInOutcome {
    /// The session is now authenticated.
    Success,
    /// The account has a cloud password; sign-in must be retried with it.
    PasswordRequired,
    /// The remote side rejected the attempt (bad code, expired hash, bad
    /// password) with the contained reason.
    Failed(String),
}

/// One handle to the remote messaging API.
///
/// A handle is either fully connected or fully disconnected from the point of
/// view of the session client; every method except [`connect`](Self::connect)
/// expects a connected handle. All methods are network round trips.
#[automock]
pub trait Transport {
    /// Open the underlying connection.
    async fn connect(&self) -> Result<(), TransportError>;

    /// Close the underlying connection.
    async fn disconnect(&self) -> Result<(), TransportError>;

    /// Whether the stored session is already signed in.
    async fn is_authorized(&self) -> Result<bool, TransportError>;

    /// Request an OTP code for `phone`, with SMS-forced delivery.
    async fn send_code_request(&self, phone: &str) -> Result<SentCode, TransportError>;

    /// Attempt sign-in with a received code and the hash from the code request.
    async fn sign_in(
        &self,
        phone: &str,
        code: &str,
        phone_code_hash: &str,
    ) -> Result<SignInOutcome, TransportError>;

    /// Retry sign-in with the cloud password after a
    /// [`SignInOutcome::PasswordRequired`].
    async fn sign_in_with_password(&self, password: &str)
    -> Result<SignInOutcome, TransportError>;

    /// Fetch the full dialog list in remote order.
    ///
    /// Pagination is the wire client's responsibility and is resolved by the
    /// time this returns.
    async fn get_dialogs(&self) -> Result<Vec<Dialog>, TransportError>;

    /// Enumerate the ids of messages the signed-in user sent in `entity`, in
    /// the order the remote side yields them.
    async fn messages_from_self(&self, entity: EntityId) -> Result<Vec<i32>, TransportError>;

    /// Delete a single message in `entity`.
    async fn delete_message(&self, entity: EntityId, message_id: i32)
    -> Result<(), TransportError>;
}

/// Factory for transport handles.
///
/// Each public operation of the session client constructs its own handle from
/// the validated credentials; construction is local and does not touch the
/// network.
#[automock(type Handle = MockTransport;)]
pub trait Connector {
    /// Concrete handle type produced by this connector.
    type Handle: Transport;

    /// Build a disconnected handle for one operation.
    fn create(&self, credentials: &Credentials) -> Result<Self::Handle, TransportError>;
}
