//! Google Sign-In for engine plugins, backed by the platform credential broker.
//!
//! The host (for example a Godot Android plugin) implements [`CredentialHost`],
//! [`CredentialBroker`] and [`SignInListener`]; a [`SignInBridge`] drives the
//! sign-in flows against them and reports every outcome as a [`SignInEvent`].
#![deny(clippy::all, clippy::pedantic, clippy::nursery)]

mod bridge;
pub use bridge::*;

mod broker;
pub use broker::*;

mod config;
pub use config::*;

mod credential;
pub use credential::*;

mod error;
pub use error::*;

mod event;
pub use event::*;

mod nonce;
pub use nonce::*;

mod request;
pub use request::*;

/// Forwarding of `log` records to a host-provided logger.
pub mod logger;

uniffi::setup_scaffolding!("signinkit_core");
