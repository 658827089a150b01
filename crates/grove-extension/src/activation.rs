//! Activation state machine
//!
//! Per (extension, scope) the state is one boolean, with no
//! intermediate states. The platform-wide and per-tenant lists are
//! independent: a tenant-scope check never consults the platform list.
//! Activation is idempotent; re-requesting an active extension is not
//! an error and issues no host call.

use crate::model::Extension;
use crate::registry::ExtensionRegistry;
use grove_common::{GroveError, GroveResult, Platform, TenantId};
use grove_tenant::{TenantRegistry, TenantSel};
use std::sync::Arc;
use tracing::info;

/// An activation scope: the whole platform, or one tenant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Applies to every tenant.
    Platform,
    /// Applies to one specific tenant.
    Tenant(TenantId),
}

/// Activation and deactivation across platform-wide and tenant scope.
///
/// Owns no cache of its own: tenant resolution and context switching
/// come from the tenant registry, catalog state from the extension
/// registry, list mutation from the host.
pub struct Activations {
    host: Arc<dyn Platform>,
    tenants: Arc<TenantRegistry>,
    extensions: Arc<ExtensionRegistry>,
}

impl Activations {
    /// Create the state machine over the shared registries.
    pub fn new(tenants: Arc<TenantRegistry>, extensions: Arc<ExtensionRegistry>) -> Self {
        Self {
            host: tenants.host().clone(),
            tenants,
            extensions,
        }
    }

    /// Map a tenant selector to an activation scope, when it resolves.
    /// `All` is the platform-wide scope; `Invalid` is `None`.
    pub fn resolve_scope(&self, sel: impl Into<TenantSel>) -> GroveResult<Option<Scope>> {
        Ok(match self.tenants.resolve(sel)? {
            TenantSel::All => Some(Scope::Platform),
            TenantSel::Id(id) => Some(Scope::Tenant(id)),
            _ => None,
        })
    }

    /// Whether the extension is active in exactly this scope.
    pub fn is_active(&self, extension: &Extension, scope: Scope) -> GroveResult<bool> {
        let ids = match scope {
            Scope::Platform => {
                let paths = self.host.platform_active_list()?;
                return Ok(paths
                    .iter()
                    .any(|path| crate::ExtensionId::extract(path) == *extension.id()));
            }
            Scope::Tenant(id) => self.extensions.active_ids(TenantSel::Id(id))?,
        };
        Ok(ids.contains(extension.id()))
    }

    /// Whether activation in this scope is permitted right now.
    ///
    /// True iff the scope resolves validly, the extension is not
    /// already active in that exact scope, and (on a multi-tenant
    /// deployment) a global-only extension is aimed at the
    /// platform-wide scope.
    pub fn can_activate(&self, extension: &Extension, scope: Scope) -> GroveResult<bool> {
        if let Scope::Tenant(id) = scope {
            if !self.tenants.is_valid(TenantSel::Id(id))? {
                return Ok(false);
            }
        }
        if self.is_active(extension, scope)? {
            return Ok(false);
        }
        Ok(!self.host.is_multi_tenant()
            || !extension.requires_global()
            || scope == Scope::Platform)
    }

    /// Activate the extension in the given scope.
    ///
    /// When [`Activations::can_activate`] is false no state changes and
    /// the current `is_active` value is reported. Otherwise the host is
    /// asked to activate (inside the tenant's context guard for tenant
    /// scope, exited on every path) and the post-condition `is_active`
    /// is returned, since the host may silently no-op.
    pub fn activate(&self, extension: &Extension, scope: Scope) -> GroveResult<bool> {
        if !self.can_activate(extension, scope)? {
            return self.is_active(extension, scope);
        }
        match scope {
            Scope::Platform => {
                self.host.activate_platform_wide(extension.path())?;
                info!(extension = %extension.id(), "activated platform-wide");
            }
            Scope::Tenant(id) => {
                let _ctx = self.tenants.switch_to(TenantSel::Id(id))?;
                self.host.activate_for_current_tenant(extension.path())?;
                info!(extension = %extension.id(), tenant = id.raw(), "activated for tenant");
            }
        }
        self.is_active(extension, scope)
    }

    /// Deactivate the extension in the given scope.
    ///
    /// No activation-state precondition: the host call is issued even
    /// when the extension is already inactive. An unresolvable tenant
    /// scope is `NotFound` before any host call; a no-op guard must
    /// never let the mutation land on the ambient tenant. Returns the
    /// negated post-condition `is_active`, true meaning the extension
    /// is no longer active in that scope.
    pub fn deactivate(&self, extension: &Extension, scope: Scope) -> GroveResult<bool> {
        match scope {
            Scope::Platform => {
                self.host.deactivate_platform_wide(extension.path())?;
                info!(extension = %extension.id(), "deactivated platform-wide");
            }
            Scope::Tenant(id) => {
                if !self.tenants.is_valid(TenantSel::Id(id))? {
                    return Err(GroveError::NotFound(format!("no tenant {id}")));
                }
                let _ctx = self.tenants.switch_to(TenantSel::Id(id))?;
                self.host.deactivate_for_current_tenant(extension.path())?;
                info!(extension = %extension.id(), tenant = id.raw(), "deactivated for tenant");
            }
        }
        Ok(!self.is_active(extension, scope)?)
    }
}
