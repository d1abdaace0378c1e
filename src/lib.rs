//! Telesweep - session authentication and bulk message cleanup for Telegram-style accounts.
//!
//! This crate owns the lifecycle of a single authenticated connection to a remote
//! messaging API: it drives the two-step OTP sign-in protocol (code request, code
//! verification, optional cloud-password fallback) and runs bulk operations
//! (listing dialogs, deleting every message the signed-in user sent across a set
//! of conversations) with a strict connect/disconnect bracket around each call.
//!
//! # Overview
//!
//! The crate is a library. The embedding application (a GUI, a CLI, a bot) is
//! expected to:
//!
//! 1. Supply application credentials through a [`config::SettingsProvider`]
//!    (typically a [`config::Config`] loaded from YAML)
//! 2. Supply the wire-level client through the [`telegram::Connector`] and
//!    [`telegram::Transport`] traits
//! 3. Invoke the four public operations on [`telegram::SessionClient`] and
//!    render their results and errors
//!
//! The wire protocol itself is out of scope: any client exposing connect,
//! disconnect, authorization check, code request, sign-in, dialog listing and
//! message enumeration/deletion primitives can sit behind the transport traits.
//!
//! # Configuration
//!
//! Create a `config.yaml` file with the application credentials:
//!
//! ```yaml
//! telegram:
//!   api_id: "111999"
//!   api_hash: "456999aabbcc"
//! ```
//!
//! Both values are kept as strings and validated when an operation starts, so a
//! missing or non-numeric `api_id` fails fast before any network call.
//!
//! # Environment Variable Overrides
//!
//! Override any configuration value using environment variables with the
//! `TELESWEEP_` prefix:
//!
//! ```bash
//! export TELESWEEP_TELEGRAM__API_ID="111999"
//! export TELESWEEP_TELEGRAM__API_HASH="456999aabbcc"
//! ```
//!
//! # Architecture
//!
//! - [`config`] - YAML configuration loading and the settings capability trait
//! - [`telegram`] - session client, transport seams, auth flow and bulk operations
//!
//! # Logging
//!
//! The crate logs through the [`log`] facade and leaves logger initialization to
//! the embedding application (e.g. `env_logger`). Network brackets and per-message
//! deletions are traced at `debug` level; failures that the crate recovers from
//! (a message that could not be deleted, a disconnect that failed after a
//! successful operation) are logged at `warn`.

pub mod config;
pub mod telegram;
