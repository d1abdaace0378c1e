//! Session authentication and bulk operations for a remote messaging account.
//!
//! This module is the core of the crate. It is structured around
//! [`SessionClient`], which coordinates:
//!
//! - **Connection management**: one transport handle per public operation,
//!   opened and closed around it on every exit path
//! - **Auth flow**: the two-step OTP sign-in (request code, verify code,
//!   optional cloud-password fallback) with already-authorized short-circuits
//! - **Bulk operations**: dialog listing and best-effort multi-conversation
//!   message deletion
//!
//! The wire client is abstracted behind the [`Transport`] and [`Connector`]
//! traits in the `transport` submodule, both mockable.
//!
//! # Examples
//!
//! ```no_run
//! use telesweep::config::Config;
//! use telesweep::telegram::SessionClient;
//! # use telesweep::telegram::MockConnector;
//!
//! # async fn example(connector: MockConnector) -> Result<(), telesweep::telegram::SessionError> {
//! let config = Config::load("config.yaml").unwrap();
//! let client = SessionClient::new(config, connector);
//!
//! let dialogs = client.fetch_all_dialogs().await?;
//! for dialog in dialogs {
//!     println!("{}: {}", dialog.entity, dialog.display_name);
//! }
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod structs;
pub mod transport;

pub use crate::telegram::client::SessionClient;
pub use crate::telegram::error::SessionError;
pub use crate::telegram::structs::{
    AuthChallenge, CancelToken, CodeRequest, Dialog, EntityId, FailedDeletion,
};
pub use crate::telegram::transport::{
    Connector, MockConnector, MockTransport, SentCode, SignInOutcome, Transport, TransportError,
};

use log::debug;

use crate::config::SettingsProvider;

/// Validated application credentials.
///
/// Built from a [`SettingsProvider`] at the start of every public operation,
/// before any transport handle exists; invalid or missing values fail fast with
/// [`SessionError::Configuration`]. Immutable for the duration of an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Numeric application identifier
    pub app_id: i32,
    /// Application secret
    pub app_secret: String,
}

impl Credentials {
    /// Read and validate the credentials from the settings collaborator.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Configuration`] when the app id is missing,
    /// empty or not a decimal integer, or when the secret is missing or empty.
    pub fn from_settings<S: SettingsProvider>(settings: &S) -> Result<Credentials, SessionError> {
        debug!("read credentials from settings");

        let raw_id = settings
            .app_id()
            .ok_or_else(|| SessionError::Configuration("app id is not set".to_owned()))?;
        let app_id = raw_id.trim().parse::<i32>().map_err(|_| {
            SessionError::Configuration(format!("app id is not numeric: {raw_id:?}"))
        })?;

        let app_secret = settings
            .app_secret()
            .ok_or_else(|| SessionError::Configuration("app secret is not set".to_owned()))?;
        if app_secret.trim().is_empty() {
            return Err(SessionError::Configuration("app secret is empty".to_owned()));
        }

        Ok(Credentials { app_id, app_secret })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MockSettingsProvider;

    fn provider(id: Option<&str>, secret: Option<&str>) -> MockSettingsProvider {
        let mut settings = MockSettingsProvider::new();
        let id = id.map(str::to_owned);
        let secret = secret.map(str::to_owned);
        settings.expect_app_id().return_const(id);
        settings.expect_app_secret().return_const(secret);
        settings
    }

    #[test]
    fn test_valid_credentials() {
        let credentials = Credentials::from_settings(&provider(Some("111999"), Some("456999")));
        assert_eq!(
            credentials,
            Ok(Credentials {
                app_id: 111999,
                app_secret: "456999".to_owned(),
            })
        );
    }

    #[test]
    fn test_app_id_surrounding_whitespace_is_accepted() {
        let credentials = Credentials::from_settings(&provider(Some(" 111999 "), Some("456999")));
        assert_eq!(credentials.unwrap().app_id, 111999);
    }

    #[test]
    fn test_missing_app_id() {
        let result = Credentials::from_settings(&provider(None, Some("456999")));
        assert!(matches!(result, Err(SessionError::Configuration(_))));
    }

    #[test]
    fn test_non_numeric_app_id() {
        let result = Credentials::from_settings(&provider(Some("abc"), Some("456999")));
        assert!(matches!(result, Err(SessionError::Configuration(_))));
    }

    #[test]
    fn test_empty_app_id() {
        let result = Credentials::from_settings(&provider(Some(""), Some("456999")));
        assert!(matches!(result, Err(SessionError::Configuration(_))));
    }

    #[test]
    fn test_missing_app_secret() {
        let result = Credentials::from_settings(&provider(Some("111999"), None));
        assert!(matches!(result, Err(SessionError::Configuration(_))));
    }

    #[test]
    fn test_empty_app_secret() {
        let result = Credentials::from_settings(&provider(Some("111999"), Some("  ")));
        assert!(matches!(result, Err(SessionError::Configuration(_))));
    }
}
