//! # ec2-core
//!
//! Signing and dispatch core for the EC2 query API.
//!
//! This crate turns a set of request parameters into a signed GET, sends it
//! and decodes the XML that comes back, either into the caller's result type
//! or into a structured provider error.
//!
//! ## Modules
//!
//! - [`error`] - Error types and provider error decoding
//! - [`config`] - Regions and endpoints
//! - [`credentials`] - Access keys and session tokens
//! - [`query`] - Request parameter map and indexed key encoding
//! - [`filter`] - Named server-side filters
//! - [`signer`] - AWS Signature Version 2
//! - [`transport`] - HTTP transport abstraction
//! - [`client`] - The query dispatcher
//! - [`token`] - Idempotency tokens

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod credentials;
pub mod error;
pub mod filter;
pub mod query;
pub mod signer;
pub mod token;
pub mod transport;

// Re-export commonly used types
pub use client::{ClientConfig, QueryClient, QueryClientBuilder};
pub use config::Region;
pub use credentials::Credentials;
pub use error::{ApiError, Error, Result};
pub use filter::Filter;
pub use query::{EncodeParams, ParamScope, Params};
