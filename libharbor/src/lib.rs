//! libharbor - Harbor Registry Client Library
//!
//! libharbor is an async client for the Harbor v2.0 REST API and for the
//! OCI Distribution endpoints Harbor serves next to it.
//!
//! # Quick Start
//!
//! ```no_run
//! use libharbor::ClientBuilder;
//! use libharbor::api::project::ListProjectsOptions;
//!
//! # async fn example() -> libharbor::Result<()> {
//! let client = ClientBuilder::new()
//!     .endpoint("harbor.example.com")
//!     .basic_auth("admin", "Harbor12345")
//!     .build()?;
//!
//! let page = client.list_projects(&ListProjectsOptions::default()).await?;
//! for project in page.items {
//!     println!("{}", project.name);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Main Types
//!
//! - [`Client`] - Control-plane API client; resource methods live in [`api`]
//! - [`DistributionClient`] - OCI Distribution client for `/v2/`
//! - [`ClientBuilder`] - Builds either client from code or from [`Settings`]
//! - [`Credentials`] - Anonymous, Basic or Bearer authentication
//! - [`ImageReference`] - Image reference parsing
//! - [`HarborError`] - Error type shared by every operation
//!
//! Mutating calls on [`Client`] carry Harbor's CSRF token. The token is
//! fetched from `/systeminfo` on first use and refreshed from every GET.

#![warn(clippy::all)]

/// Returns the libharbor crate version.
///
/// # Examples
///
/// ```
/// let version = libharbor::version();
/// assert!(!version.is_empty());
/// ```
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

pub mod api;
pub mod auth;
pub mod body;
pub mod builder;
pub mod client;
pub mod config;
pub mod digest;
pub mod distribution;
pub mod error;
pub mod oci;
pub mod pagination;
pub mod reference;

pub use auth::Credentials;
pub use builder::ClientBuilder;
pub use client::{Client, ClientConfig};
pub use config::Settings;
pub use digest::Digest;
pub use distribution::DistributionClient;
pub use error::{HarborError, Result};
pub use pagination::{ListOptions, Page};
pub use reference::ImageReference;
