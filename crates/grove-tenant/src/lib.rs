//! Grove Tenant - Tenant management for the Grove multi-tenant core
//!
//! A tenant is an isolated logical site within a shared deployment. This
//! crate owns:
//! - Tenant selectors and pseudo-identifier resolution (`ALL`, `CURRENT`,
//!   `INVALID`)
//! - The scoped tenant-context switcher
//! - The lazily populated, completeness-tracked [`TenantRegistry`]
//! - The [`Tenant`] model and its typed configuration accessors
//! - The tenant time-zone value type

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod context;
pub mod model;
pub mod registry;
pub mod selector;
pub mod settings;
pub mod timezone;

pub use context::{ContextSwitcher, TenantContext};
pub use grove_common::TenantId;
pub use model::Tenant;
pub use registry::TenantRegistry;
pub use selector::TenantSel;
pub use timezone::TenantTimeZone;
