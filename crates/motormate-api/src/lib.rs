//! motormate-api: Wire types and HTTP client for the MotorMate chat endpoint
//!
//! The client side treats conversation history as opaque JSON. It is sent with
//! every request and replaced by whatever the server returns.

pub mod client;
pub mod error;
pub mod types;

pub use client::{ChatClient, DEFAULT_ENDPOINT};
pub use error::{Error, Result};
pub use types::*;
