//! Grove Extension - Extension catalog and activation for the Grove core
//!
//! An extension is an installable module identified by a stable ID
//! derived from its storage path. This crate owns:
//! - The [`Extension`] model and the deterministic ID extraction rule
//! - The lazily populated [`ExtensionRegistry`] catalog
//! - [`Activations`], the platform-wide / per-tenant activation state
//!   machine

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod activation;
pub mod model;
pub mod registry;

pub use activation::{Activations, Scope};
pub use model::{Extension, ExtensionId, ExtensionMeta};
pub use registry::ExtensionRegistry;
