//! The `Platform` host boundary
//!
//! Everything the core does not own (tenant provisioning, the
//! per-tenant configuration store, the ambient context stack, extension
//! discovery and toggling) is reached through this one trait.
//! [`crate::memory::MemoryPlatform`] is the in-process reference
//! implementation.

use crate::error::GroveResult;
use crate::id::TenantId;
use serde_json::Value;
use std::collections::BTreeMap;

/// Raw property map returned by extension discovery, keyed by header
/// name (`name`, `version`, `author`, ...). The extension layer parses
/// this into typed metadata.
pub type RawProps = BTreeMap<String, String>;

/// External collaborator interface for one deployment.
///
/// Configuration reads and writes are scoped to whatever tenant context
/// is currently entered; callers pair [`Platform::enter_tenant`] and
/// [`Platform::exit_tenant`] strictly LIFO. The host owns the context
/// stack itself; the core only guarantees disciplined pairing.
pub trait Platform: Send + Sync {
    /// Whether this deployment hosts more than one tenant.
    fn is_multi_tenant(&self) -> bool;

    /// ID of the tenant currently in context.
    fn current_tenant_id(&self) -> TenantId;

    /// Enumerate every tenant ID known to the deployment.
    fn list_tenants(&self) -> GroveResult<Vec<TenantId>>;

    /// Provision a new tenant. Returns the assigned ID.
    fn create_tenant(
        &self,
        domain: &str,
        path: &str,
        title: &str,
        admin_id: i64,
    ) -> GroveResult<TenantId>;

    /// Remove a tenant. `permanent` skips any recycle step the host has.
    fn delete_tenant(&self, id: TenantId, permanent: bool) -> GroveResult<()>;

    /// Push a tenant onto the ambient context stack.
    fn enter_tenant(&self, id: TenantId);

    /// Pop the most recently entered tenant context.
    fn exit_tenant(&self);

    /// Read a configuration value from the entered tenant's namespace.
    fn get_config(&self, key: &str) -> Option<Value>;

    /// Write a configuration value into the entered tenant's namespace.
    /// Returns whether the store accepted the write.
    fn set_config(&self, key: &str, value: Value) -> bool;

    /// Discover installed extensions: storage path to raw property map.
    fn list_extensions(&self) -> GroveResult<BTreeMap<String, RawProps>>;

    /// Add an extension path to the platform-wide activation list.
    /// May silently no-op; callers re-check the resulting state.
    fn activate_platform_wide(&self, path: &str) -> GroveResult<()>;

    /// Add an extension path to the entered tenant's activation list.
    fn activate_for_current_tenant(&self, path: &str) -> GroveResult<()>;

    /// Remove an extension path from the platform-wide activation list.
    fn deactivate_platform_wide(&self, path: &str) -> GroveResult<()>;

    /// Remove an extension path from the entered tenant's activation list.
    fn deactivate_for_current_tenant(&self, path: &str) -> GroveResult<()>;

    /// The platform-wide activation list, as raw extension paths.
    fn platform_active_list(&self) -> GroveResult<Vec<String>>;

    /// The entered tenant's activation list, as raw extension paths.
    fn tenant_active_list(&self) -> GroveResult<Vec<String>>;
}
