//! Extension catalog registry
//!
//! Same enumerate-once-then-cache discipline as the tenant registry,
//! sourced from the host's extension discovery. Also answers which
//! extensions are active in a given scope, mapping the raw stored paths
//! through the deterministic ID extraction rule.

use crate::model::{Extension, ExtensionId};
use grove_common::{EntityCache, GroveError, GroveResult, Platform};
use grove_tenant::{TenantRegistry, TenantSel};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use tracing::debug;

/// Lookup and activation-list queries over the installed extensions.
pub struct ExtensionRegistry {
    host: Arc<dyn Platform>,
    tenants: Arc<TenantRegistry>,
    cache: EntityCache<ExtensionId, Extension>,
}

impl ExtensionRegistry {
    /// Create a registry sharing the tenant registry's host.
    pub fn new(tenants: Arc<TenantRegistry>) -> Self {
        Self {
            host: tenants.host().clone(),
            tenants,
            cache: EntityCache::new(),
        }
    }

    /// Every installed extension, keyed by ID.
    ///
    /// The first call enumerates discovery and marks the cache
    /// complete; later calls return the snapshot without touching the
    /// host.
    pub fn all(&self) -> GroveResult<BTreeMap<ExtensionId, Extension>> {
        self.cache.ensure_complete(|fill| {
            debug!("enumerating extensions");
            for (path, props) in self.host.list_extensions()? {
                let extension = Extension::from_discovery(&path, props);
                if !fill.contains(extension.id()) {
                    fill.insert(extension.id().clone(), extension);
                }
            }
            Ok(())
        })
    }

    /// Drop completeness so the next lookup rescans discovery.
    pub fn invalidate(&self) {
        self.cache.mark_incomplete();
    }

    /// Look up one extension. Missing IDs are `NotFound`; single-entity
    /// lookups are assertive where bulk lookups are best-effort.
    pub fn get(&self, id: &ExtensionId) -> GroveResult<Extension> {
        self.all()?
            .get(id)
            .cloned()
            .ok_or_else(|| GroveError::NotFound(format!("no extension {id}")))
    }

    /// The intersection of the requested IDs with the installed set.
    /// IDs with no installed extension are silently omitted.
    pub fn get_multiple<'a>(
        &self,
        ids: impl IntoIterator<Item = &'a ExtensionId>,
    ) -> GroveResult<BTreeMap<ExtensionId, Extension>> {
        let all = self.all()?;
        Ok(ids
            .into_iter()
            .filter_map(|id| all.get(id).map(|ext| (id.clone(), ext.clone())))
            .collect())
    }

    /// IDs of the extensions active in the given scope.
    ///
    /// A selector resolving to `All` reads the platform-wide activation
    /// list; a specific tenant reads that tenant's list from inside its
    /// context. The stored paths map through [`ExtensionId::extract`].
    pub fn active_ids(&self, sel: impl Into<TenantSel>) -> GroveResult<BTreeSet<ExtensionId>> {
        let paths = match self.tenants.resolve(sel)? {
            TenantSel::All => self.host.platform_active_list()?,
            TenantSel::Id(id) => {
                let _ctx = self.tenants.switch_to(TenantSel::Id(id))?;
                self.host.tenant_active_list()?
            }
            _ => {
                return Err(GroveError::NotFound(
                    "cannot read activations for an unresolvable tenant".into(),
                ))
            }
        };
        Ok(paths.iter().map(|path| ExtensionId::extract(path)).collect())
    }

    /// The extensions active in the given scope, keyed by ID.
    pub fn active(&self, sel: impl Into<TenantSel>) -> GroveResult<BTreeMap<ExtensionId, Extension>> {
        let ids = self.active_ids(sel)?;
        self.get_multiple(ids.iter())
    }
}
