//! Session client: connection bracketing, auth flow and bulk operations.

use log::{debug, info, warn};

use crate::config::SettingsProvider;
use crate::telegram::Credentials;
use crate::telegram::error::SessionError;
use crate::telegram::structs::{
    AuthChallenge, CancelToken, CodeRequest, Dialog, EntityId, FailedDeletion,
};
use crate::telegram::transport::{Connector, SignInOutcome, Transport};

/// High-level client for one remote messaging account.
///
/// Coordinates the settings collaborator, the transport connector and the four
/// public operations. Every operation validates the credentials first, then
/// runs against a fresh transport handle that is connected before and
/// disconnected after it, on every exit path. Handles are never shared between
/// operations, so concurrent invocations each own their connection.
///
/// # Examples
///
/// ```no_run
/// use telesweep::config::Config;
/// use telesweep::telegram::{CancelToken, EntityId, SessionClient};
/// # use telesweep::telegram::MockConnector;
///
/// # async fn example(connector: MockConnector) -> Result<(), telesweep::telegram::SessionError> {
/// let config = Config::load("config.yaml").unwrap();
/// let client = SessionClient::new(config, connector);
///
/// let targets = [EntityId(123), EntityId(234)];
/// client.delete_messages_from(&targets, &CancelToken::new()).await?;
/// # Ok(())
/// # }
/// ```
pub struct SessionClient<S, C>
where
    S: SettingsProvider,
    C: Connector,
{
    /// Source of the application credentials
    settings: S,
    /// Factory for per-operation transport handles
    connector: C,
}

impl<S, C> SessionClient<S, C>
where
    S: SettingsProvider,
    C: Connector,
{
    /// Create a new [`SessionClient`].
    ///
    /// # Arguments
    ///
    /// * `settings` - Settings collaborator holding the application credentials.
    /// * `connector` - Factory building one transport handle per operation.
    pub fn new(settings: S, connector: C) -> Self {
        SessionClient {
            settings,
            connector,
        }
    }

    /// Request an OTP code for `phone`, with SMS-forced delivery.
    ///
    /// The already-authorized check runs first: re-requesting a code on a
    /// signed-in session is rejected by the remote side, so in that case no
    /// code is sent and [`CodeRequest::AlreadyAuthorized`] is returned. The
    /// returned [`AuthChallenge`] must be kept by the caller and passed to
    /// [`verify_code`](Self::verify_code).
    ///
    /// # Errors
    ///
    /// - [`SessionError::Configuration`] for missing/invalid app credentials
    /// - [`SessionError::Auth`] for a malformed phone or a remote rejection
    /// - [`SessionError::Connection`] when the transport cannot be opened
    pub async fn request_code(&self, phone: &str) -> Result<CodeRequest, SessionError> {
        debug!("request OTP code, begin");
        validate_phone(phone)?;
        let credentials = Credentials::from_settings(&self.settings)?;

        let outcome = self
            .with_connection(&credentials, async |client: &C::Handle| {
                if is_authorized(client).await? {
                    debug!("request OTP code, already authorized");
                    return Ok(CodeRequest::AlreadyAuthorized);
                }

                let sent = client
                    .send_code_request(phone)
                    .await
                    .map_err(|error| SessionError::Auth(error.to_string()))?;

                Ok(CodeRequest::CodeSent(AuthChallenge {
                    phone: phone.to_owned(),
                    phone_code_hash: sent.phone_code_hash,
                }))
            })
            .await?;

        debug!("request OTP code, end");
        Ok(outcome)
    }

    /// Verify a received OTP code, optionally falling back to the cloud
    /// password.
    ///
    /// The already-authorized check runs first, making the call idempotent on a
    /// signed-in session. Otherwise sign-in is attempted with the code and the
    /// challenge hash; when the account has a second factor the sign-in is
    /// retried with `password`, or fails with
    /// [`SessionError::PasswordRequired`] when none was supplied so the caller
    /// can ask for it and invoke this again.
    ///
    /// The phone is not checked locally against the one that produced the
    /// challenge; a mismatch surfaces as a remote rejection.
    ///
    /// On success the underlying session store is updated by the transport
    /// layer itself; this crate does not persist anything.
    ///
    /// # Errors
    ///
    /// - [`SessionError::Configuration`] for missing/invalid app credentials
    /// - [`SessionError::PasswordRequired`] when a second factor is needed and
    ///   no password was supplied
    /// - [`SessionError::Auth`] for bad code, expired challenge or bad password
    /// - [`SessionError::Connection`] when the transport cannot be opened
    pub async fn verify_code(
        &self,
        phone: &str,
        code: &str,
        challenge: &AuthChallenge,
        password: Option<&str>,
    ) -> Result<(), SessionError> {
        debug!("verify OTP code, begin");
        let credentials = Credentials::from_settings(&self.settings)?;

        self.with_connection(&credentials, async |client: &C::Handle| {
            if is_authorized(client).await? {
                debug!("verify OTP code, already authorized");
                return Ok(());
            }

            debug!("verify OTP code, sign in");
            let outcome = client
                .sign_in(phone, code, &challenge.phone_code_hash)
                .await
                .map_err(|error| SessionError::Auth(error.to_string()))?;

            match outcome {
                SignInOutcome::Success => Ok(()),
                SignInOutcome::Failed(reason) => Err(SessionError::Auth(reason)),
                SignInOutcome::PasswordRequired => {
                    let Some(password) = password else {
                        debug!("verify OTP code, second factor needed, no password supplied");
                        return Err(SessionError::PasswordRequired);
                    };

                    debug!("verify OTP code, sign in with cloud password");
                    match client
                        .sign_in_with_password(password)
                        .await
                        .map_err(|error| SessionError::Auth(error.to_string()))?
                    {
                        SignInOutcome::Success => Ok(()),
                        SignInOutcome::Failed(reason) => Err(SessionError::Auth(reason)),
                        SignInOutcome::PasswordRequired => Err(SessionError::Auth(
                            "password sign-in challenged for a password again".to_owned(),
                        )),
                    }
                }
            }
        })
        .await?;

        debug!("verify OTP code, end");
        Ok(())
    }

    /// Fetch all dialogs of the account.
    ///
    /// Returns the dialog list exactly as the remote side produced it: no
    /// filtering, no reordering. Idempotent while the remote state is
    /// unchanged.
    ///
    /// # Errors
    ///
    /// - [`SessionError::Configuration`] for missing/invalid app credentials
    /// - [`SessionError::Connection`] for any transport failure
    pub async fn fetch_all_dialogs(&self) -> Result<Vec<Dialog>, SessionError> {
        debug!("fetch all dialogs, begin");
        let credentials = Credentials::from_settings(&self.settings)?;

        let dialogs = self
            .with_connection(&credentials, async |client: &C::Handle| {
                client
                    .get_dialogs()
                    .await
                    .map_err(SessionError::Connection)
            })
            .await?;

        debug!("fetch all dialogs, end, {} dialog(s)", dialogs.len());
        Ok(dialogs)
    }

    /// Delete every message the signed-in user sent in the given conversations.
    ///
    /// One connection is opened for the whole batch. Entities are processed in
    /// the given order; within each entity the user's messages are enumerated
    /// and deleted one by one, sequentially. The batch is best-effort: a
    /// message that cannot be deleted (or an entity whose messages cannot be
    /// enumerated) is recorded and the batch continues, because losing progress
    /// on a large purge is worse than a partial result.
    ///
    /// Cancelling `cancel` stops scheduling further deletions; the connection
    /// bracket still closes normally and failures recorded so far are still
    /// reported.
    ///
    /// # Errors
    ///
    /// - [`SessionError::Configuration`] for missing/invalid app credentials
    /// - [`SessionError::Connection`] when the transport cannot be opened
    /// - [`SessionError::PartialFailure`] naming each `(entity, message)` pair
    ///   that could not be deleted; everything else was
    pub async fn delete_messages_from(
        &self,
        entity_ids: &[EntityId],
        cancel: &CancelToken,
    ) -> Result<(), SessionError> {
        debug!("delete messages, all, begin");
        let credentials = Credentials::from_settings(&self.settings)?;

        let result = self
            .with_connection(&credentials, async |client: &C::Handle| {
                let mut failed: Vec<FailedDeletion> = Vec::new();
                let mut deleted = 0usize;

                'entities: for &entity in entity_ids {
                    if cancel.is_cancelled() {
                        info!("delete messages, cancelled before entity {entity}");
                        break;
                    }

                    debug!("delete messages, {entity}, begin");
                    let message_ids = match client.messages_from_self(entity).await {
                        Ok(ids) => ids,
                        Err(error) => {
                            warn!("delete messages, {entity}, enumeration failed: {error}");
                            failed.push(FailedDeletion {
                                entity,
                                message_id: None,
                                reason: error.to_string(),
                            });
                            continue;
                        }
                    };

                    for message_id in message_ids {
                        if cancel.is_cancelled() {
                            info!("delete messages, cancelled at {entity}, {message_id}");
                            break 'entities;
                        }

                        debug!("delete message, {entity}, {message_id}");
                        match client.delete_message(entity, message_id).await {
                            Ok(()) => deleted += 1,
                            Err(error) => {
                                warn!("delete message, {entity}, {message_id}, failed: {error}");
                                failed.push(FailedDeletion {
                                    entity,
                                    message_id: Some(message_id),
                                    reason: error.to_string(),
                                });
                            }
                        }
                    }
                    debug!("delete messages, {entity}, end");
                }

                info!(
                    "delete messages, all, done: {deleted} deleted, {} failed",
                    failed.len()
                );
                if failed.is_empty() {
                    Ok(())
                } else {
                    Err(SessionError::PartialFailure(failed))
                }
            })
            .await;

        debug!("delete messages, all, end");
        result
    }

    /// Run `operation` inside a connect/disconnect bracket.
    ///
    /// Builds a fresh handle from the credentials, connects it, runs the
    /// operation and disconnects exactly once per successful open, whether the
    /// operation succeeded or not. A failing disconnect is logged and never
    /// masks the operation result.
    async fn with_connection<T>(
        &self,
        credentials: &Credentials,
        operation: impl AsyncFnOnce(&C::Handle) -> Result<T, SessionError>,
    ) -> Result<T, SessionError> {
        let client = self
            .connector
            .create(credentials)
            .map_err(SessionError::Connection)?;

        client.connect().await.map_err(SessionError::Connection)?;

        let result = operation(&client).await;

        if let Err(error) = client.disconnect().await {
            warn!("disconnect failed: {error}");
        }

        result
    }
}

/// Authorization check shared by both auth-flow entry points.
async fn is_authorized<T: Transport>(client: &T) -> Result<bool, SessionError> {
    client
        .is_authorized()
        .await
        .map_err(|error| SessionError::Auth(error.to_string()))
}

/// Reject phones that cannot possibly be dialable before touching the network.
///
/// Accepts digits plus the usual formatting characters (`+`, spaces, dashes,
/// parentheses); anything else, or a phone without a single digit, is refused.
fn validate_phone(phone: &str) -> Result<(), SessionError> {
    let trimmed = phone.trim();
    let has_digit = trimmed.chars().any(|c| c.is_ascii_digit());
    let only_allowed = trimmed
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | ' ' | '-' | '(' | ')'));

    if has_digit && only_allowed {
        Ok(())
    } else {
        Err(SessionError::Auth(format!(
            "malformed phone number: {phone:?}"
        )))
    }
}
