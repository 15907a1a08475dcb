//! Backend API abstractions and HTTP implementation
//!
//! This module provides a unified interface for talking to the guide
//! backend: authentication endpoints, the question-answering endpoint,
//! and the conversation save endpoint.

pub mod client;
pub mod errors;
pub mod types;

pub use client::*;
pub use errors::*;
pub use types::*;
