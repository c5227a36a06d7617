//! API bindings and CLI support for the Ghost Inspector testing platform
//!
//! The [`client`] module is the embeddable API surface: one async method
//! per remote operation, returning opaque JSON payloads. The remaining
//! modules back the `ghostop` binary.

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod output;

pub use client::{GhostInspectorClient, ParamValue, Params};
pub use error::{Error, Result};
