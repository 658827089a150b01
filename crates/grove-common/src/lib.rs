//! Grove Common - Shared types for the Grove multi-tenant content core
//!
//! This crate provides the primitives shared by the tenant and extension
//! layers:
//! - Error types
//! - Tenant identifier value object
//! - Completeness-tracked entity cache
//! - The `Platform` host boundary (anti-corruption layer over the
//!   deployment's provisioning and configuration primitives)
//! - URL and email validation helpers
//! - An in-memory `Platform` for tests and demos

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cache;
pub mod error;
pub mod host;
pub mod id;
pub mod memory;
pub mod url;

pub use cache::EntityCache;
pub use error::{GroveError, GroveResult};
pub use host::Platform;
pub use id::TenantId;
pub use memory::MemoryPlatform;
pub use url::SiteUrl;
