//! A terminal interview assistant that screens job candidates.
//!
//! The crate wires the interview core to a hosted model and keeps one
//! [`Session`] per candidate. It ships a CLI for running interviews in the
//! terminal, and can also be used as a library to host sessions in your
//! own front end.

#![deny(missing_docs)]

#[allow(unused_imports)]
#[macro_use]
extern crate tracing;

mod config;
mod record;
mod session;

pub use config::{Config, ConfigError};
pub use record::{ExportError, InterviewRecord};
pub use session::{Session, SessionBuilder, SessionId, SessionRegistry};

/// Re-exports of [`talentscout_core`] crate.
pub mod core {
    pub use talentscout_core::*;
}
