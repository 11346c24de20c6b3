//! # KYC Holder
//!
//! A client library for applications that let a holder sign in with a DID
//! wallet and then link, track and collect identity-verification (KYC)
//! credentials from a backend service. It is designed to be used by a user
//! interface shell (web, desktop or mobile) that supplies platform
//! capabilities such as persistent storage and a wallet connection.
//!
//! The crate does not provide a user interface - that is the job of an
//! application implementer.
//!
//! # Design
//!
//! ** Session **
//!
//! The [`session::Session`] is constructed once at startup and passed by
//! reference to whatever needs it. It owns the identity decoded from the
//! stored bearer token and the one-shot post-authentication redirect, and is
//! only ever mutated through its own methods.
//!
//! Credential and verification calls to the backend are made through a
//! [`gateway::Gateway`] borrowed from the session. Every call is a single
//! attempt and degrades to a safe default (`None`, an empty list or
//! [`credential::VerificationStatus::Unknown`]) on failure.
//!
//! ** Routes **
//!
//! The [`route`] module declares the application's views and which of them
//! require a signed-in user. The [`guard`] module decides, from local state
//! only, whether a route may be entered.
//!
//! ** Provider **
//!
//! In a similar style to other holder SDKs, implementors make use of
//! 'Provider' traits that are responsible for handling token storage, the
//! wallet connection, navigation between views and user notifications. See
//! the [`provider`] module.

pub mod config;
pub mod credential;
pub mod did;
pub mod error;
pub mod gateway;
pub mod guard;
pub mod presentation;
pub mod provider;
pub mod route;
pub mod session;
pub mod store;
pub mod token;

pub use config::Config;
pub use error::{Error, Result};
pub use session::Session;
