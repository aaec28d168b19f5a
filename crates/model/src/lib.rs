//! A provider-neutral protocol for chat-completion models.
//!
//! The interview core never talks to an HTTP API directly. It builds a
//! [`ModelRequest`] and hands it to whatever [`ModelProvider`] the host
//! application configured, so the hosted service can be swapped (or faked
//! in tests) without touching the state machine.
//!
//! Types in this crate don't define any behavior, instead they are the
//! constraints that the implementors should adhere to.

#![deny(missing_docs)]

mod error;
mod provider;
mod request;
mod response;

pub use error::*;
pub use provider::*;
pub use request::*;
pub use response::*;
