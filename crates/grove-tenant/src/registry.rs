//! Tenant registry
//!
//! Owns the completeness-tracked tenant cache and the resolution of
//! pseudo-identifiers. Explicitly constructed and injected: the host
//! handle comes in at build time and the cache lifecycle follows the
//! registry instance, not any process-global state.

use crate::context::{ContextSwitcher, TenantContext};
use crate::model::Tenant;
use crate::selector::TenantSel;
use grove_common::{EntityCache, GroveError, GroveResult, Platform, SiteUrl, TenantId};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Lookup, creation, deletion, and context switching for tenants.
pub struct TenantRegistry {
    host: Arc<dyn Platform>,
    cache: EntityCache<TenantId, Tenant>,
    switcher: ContextSwitcher,
}

impl TenantRegistry {
    /// Create a registry over the given host with a cold cache.
    pub fn new(host: Arc<dyn Platform>) -> Self {
        Self {
            switcher: ContextSwitcher::new(host.clone()),
            cache: EntityCache::new(),
            host,
        }
    }

    /// The host this registry orchestrates.
    pub fn host(&self) -> &Arc<dyn Platform> {
        &self.host
    }

    /// Every tenant, keyed by ID.
    ///
    /// The first call enumerates the host and marks the cache complete;
    /// later calls return the snapshot without touching the host. A
    /// single-tenant deployment always yields exactly the root tenant.
    pub fn all(&self) -> GroveResult<BTreeMap<TenantId, Tenant>> {
        self.cache.ensure_complete(|fill| {
            if self.host.is_multi_tenant() {
                debug!("enumerating tenants");
                for id in self.host.list_tenants()? {
                    if !fill.contains(&id) {
                        fill.insert(id, Tenant::new(id, self.host.clone()));
                    }
                }
            } else if !fill.contains(&TenantId::ROOT) {
                fill.insert(TenantId::ROOT, Tenant::new(TenantId::ROOT, self.host.clone()));
            }
            Ok(())
        })
    }

    /// Resolve a selector to `All`, `Id`, or `Invalid`.
    ///
    /// `Current` resolves through the host's ambient context and then,
    /// like any plain ID, passes a membership check against the full
    /// tenant set (which populates the cache when cold). `All` stands on
    /// a single-tenant deployment for the one tenant there is.
    /// Resolution is idempotent.
    pub fn resolve(&self, sel: impl Into<TenantSel>) -> GroveResult<TenantSel> {
        match sel.into() {
            TenantSel::All => Ok(if self.host.is_multi_tenant() {
                TenantSel::All
            } else {
                TenantSel::Id(TenantId::ROOT)
            }),
            TenantSel::Current => self.check_membership(self.host.current_tenant_id()),
            TenantSel::Id(id) => self.check_membership(id),
            TenantSel::Invalid => Ok(TenantSel::Invalid),
        }
    }

    fn check_membership(&self, id: TenantId) -> GroveResult<TenantSel> {
        Ok(if self.all()?.contains_key(&id) {
            TenantSel::Id(id)
        } else {
            TenantSel::Invalid
        })
    }

    /// Whether a selector resolves to something addressable.
    pub fn is_valid(&self, sel: impl Into<TenantSel>) -> GroveResult<bool> {
        Ok(!self.resolve(sel)?.is_invalid())
    }

    /// Look up one tenant.
    ///
    /// Single-entity lookups are assertive: an unresolvable selector is
    /// `NotFound`. `All` is a bulk selector and belongs to
    /// [`TenantRegistry::all`]; passing it here is `InvalidArgument`.
    pub fn get(&self, sel: impl Into<TenantSel>) -> GroveResult<Tenant> {
        let sel = sel.into();
        match self.resolve(sel)? {
            TenantSel::Invalid => Err(GroveError::NotFound(format!("no tenant for {sel}"))),
            TenantSel::All => Err(GroveError::InvalidArgument(
                "selector ALL addresses every tenant; use all()".into(),
            )),
            TenantSel::Id(id) => self
                .all()?
                .get(&id)
                .cloned()
                .ok_or_else(|| GroveError::NotFound(format!("no tenant {id}"))),
            TenantSel::Current => unreachable!("resolve never returns Current"),
        }
    }

    /// ID of the tenant currently in context.
    pub fn current_id(&self) -> TenantId {
        self.host.current_tenant_id()
    }

    /// The tenant currently in context.
    pub fn current(&self) -> GroveResult<Tenant> {
        self.get(TenantSel::Id(self.current_id()))
    }

    /// Provision a new tenant from a full URL, a title, and the user ID
    /// of its administrator.
    ///
    /// Only multi-tenant deployments can add tenants. On success the
    /// cache is marked incomplete so the next enumeration picks up the
    /// host's view of the new tenant, and the freshly resolved tenant is
    /// returned. Host provisioning failures surface as `CreationFailed`
    /// with the host's message intact.
    pub fn add(&self, url: &str, title: &str, admin_id: i64) -> GroveResult<Tenant> {
        if !self.host.is_multi_tenant() {
            return Err(GroveError::Unsupported(
                "tenant creation requires a multi-tenant deployment".into(),
            ));
        }
        let title = title.trim();
        if title.is_empty() {
            return Err(GroveError::InvalidArgument(
                "tenant title must not be empty".into(),
            ));
        }
        let url = SiteUrl::parse(url)?;

        let id = self
            .host
            .create_tenant(url.host(), url.path(), title, admin_id)
            .map_err(|e| GroveError::CreationFailed(e.into_message()))?;

        self.cache.mark_incomplete();
        info!(tenant = id.raw(), %url, "tenant created");
        self.get(TenantSel::Id(id))
    }

    /// Permanently delete a tenant. Returns whether a deletion happened.
    ///
    /// No-ops (returning `false`, with no host call) on single-tenant
    /// deployments, for selectors resolving to `All` or `Invalid`, and
    /// for the protected root tenant. A successful deletion evicts the
    /// single cache entry; completeness is preserved.
    pub fn delete(&self, sel: impl Into<TenantSel>) -> GroveResult<bool> {
        let id = match self.resolve(sel)? {
            TenantSel::Id(id) if self.host.is_multi_tenant() && !id.is_root() => id,
            _ => return Ok(false),
        };
        self.host.delete_tenant(id, true)?;
        self.cache.remove(&id);
        info!(tenant = id.raw(), "tenant deleted");
        Ok(true)
    }

    /// Enter a tenant's context, under the same resolution rules as
    /// [`TenantRegistry::delete`]. The returned guard exits the context
    /// when dropped.
    pub fn switch_to(&self, sel: impl Into<TenantSel>) -> GroveResult<TenantContext> {
        let resolved = self.resolve(sel)?;
        Ok(self.switcher.enter(resolved))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grove_common::MemoryPlatform;
    use proptest::prelude::*;
    use std::sync::atomic::Ordering;

    fn registry(host: MemoryPlatform) -> (Arc<MemoryPlatform>, TenantRegistry) {
        let host = Arc::new(host);
        (host.clone(), TenantRegistry::new(host))
    }

    #[test]
    fn test_all_enumerates_once() {
        let (host, registry) = registry(MemoryPlatform::multi_tenant([2, 3]));

        let first = registry.all().unwrap();
        assert_eq!(first.len(), 3);

        let second = registry.all().unwrap();
        assert_eq!(second.len(), 3);
        assert_eq!(host.counters.list_tenants.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_single_tenant_all_is_root_only() {
        let (host, registry) = registry(MemoryPlatform::single_tenant());
        let all = registry.all().unwrap();
        assert_eq!(all.len(), 1);
        assert!(all.contains_key(&TenantId::ROOT));
        // single-tenant enumeration never asks the host for a tenant list
        assert_eq!(host.counters.list_tenants.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn test_resolution() {
        let (_, registry) = registry(MemoryPlatform::multi_tenant([2, 3]));

        assert_eq!(registry.resolve(TenantSel::All).unwrap(), TenantSel::All);
        assert_eq!(
            registry.resolve(TenantSel::Current).unwrap(),
            TenantSel::Id(TenantId::ROOT)
        );
        assert_eq!(registry.resolve(2).unwrap(), TenantSel::Id(TenantId::new(2)));
        assert_eq!(registry.resolve(99).unwrap(), TenantSel::Invalid);
        assert_eq!(registry.resolve(-2).unwrap(), TenantSel::Invalid);
        assert_eq!(registry.resolve(-44).unwrap(), TenantSel::Invalid);
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let (_, registry) = registry(MemoryPlatform::multi_tenant([2, 3]));
        for raw in [-44, -2, -1, 0, 1, 2, 3, 99] {
            let once = registry.resolve(raw).unwrap();
            assert_eq!(registry.resolve(once).unwrap(), once, "selector {raw}");
        }
    }

    proptest! {
        #[test]
        fn prop_resolution_is_idempotent(raw in -100i64..100) {
            let host = Arc::new(MemoryPlatform::multi_tenant([2, 3]));
            let registry = TenantRegistry::new(host);
            let once = registry.resolve(raw).unwrap();
            prop_assert_eq!(registry.resolve(once).unwrap(), once);
        }
    }

    #[test]
    fn test_single_tenant_all_equals_current() {
        let (_, registry) = registry(MemoryPlatform::single_tenant());
        assert_eq!(
            registry.resolve(TenantSel::All).unwrap(),
            registry.resolve(TenantSel::Current).unwrap()
        );
    }

    #[test]
    fn test_get_single() {
        let (_, registry) = registry(MemoryPlatform::multi_tenant([2, 3]));

        assert_eq!(registry.get(2).unwrap().id(), TenantId::new(2));
        assert!(matches!(registry.get(99), Err(GroveError::NotFound(_))));
        assert!(matches!(
            registry.get(TenantSel::All),
            Err(GroveError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_current_tracks_context() {
        let (_, registry) = registry(MemoryPlatform::multi_tenant([2]));

        assert_eq!(registry.current().unwrap().id(), TenantId::ROOT);
        let _ctx = registry.switch_to(2).unwrap();
        assert_eq!(registry.current().unwrap().id(), TenantId::new(2));
    }

    #[test]
    fn test_add_requires_multi_tenant() {
        let (_, registry) = registry(MemoryPlatform::single_tenant());
        assert!(matches!(
            registry.add("https://two.example.com", "Two", 1),
            Err(GroveError::Unsupported(_))
        ));
    }

    #[test]
    fn test_add_validates_input() {
        let (_, registry) = registry(MemoryPlatform::multi_tenant([]));
        assert!(matches!(
            registry.add("not a url", "Two", 1),
            Err(GroveError::InvalidArgument(_))
        ));
        assert!(matches!(
            registry.add("https://two.example.com", "   ", 1),
            Err(GroveError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_add_passes_host_message_through() {
        let (host, registry) = registry(MemoryPlatform::multi_tenant([]));
        host.fail_creation("quota exceeded");
        match registry.add("https://two.example.com", "Two", 1) {
            Err(GroveError::CreationFailed(msg)) => assert_eq!(msg, "quota exceeded"),
            other => panic!("expected CreationFailed, got {other:?}"),
        }
    }

    #[test]
    fn test_add_invalidates_cache() {
        let (host, registry) = registry(MemoryPlatform::multi_tenant([2, 3]));

        registry.all().unwrap();
        let added = registry.add("https://four.example.com/", "Four", 1).unwrap();

        let all = registry.all().unwrap();
        assert!(all.contains_key(&added.id()));
        assert_eq!(all.len(), 4);
        // one enumeration before the add, one after invalidation
        assert_eq!(host.counters.list_tenants.load(Ordering::Relaxed), 2);
    }

    #[test]
    fn test_delete_guards() {
        let (host, registry) = registry(MemoryPlatform::multi_tenant([2, 3]));

        assert!(!registry.delete(1).unwrap());
        assert!(!registry.delete(TenantSel::All).unwrap());
        assert!(!registry.delete(99).unwrap());
        assert_eq!(host.counters.deletes.load(Ordering::Relaxed), 0);

        assert!(registry.delete(3).unwrap());
        assert_eq!(host.counters.deletes.load(Ordering::Relaxed), 1);
        assert!(!registry.all().unwrap().contains_key(&TenantId::new(3)));
    }

    #[test]
    fn test_delete_root_never_calls_host() {
        for host in [MemoryPlatform::single_tenant(), MemoryPlatform::multi_tenant([2])] {
            let (host, registry) = registry(host);
            assert!(!registry.delete(1).unwrap());
            assert_eq!(host.counters.deletes.load(Ordering::Relaxed), 0);
        }
    }

    #[test]
    fn test_switch_to_guards() {
        let (host, registry) = registry(MemoryPlatform::multi_tenant([2]));

        assert!(!registry.switch_to(99).unwrap().entered());
        assert!(!registry.switch_to(TenantSel::All).unwrap().entered());

        let ctx = registry.switch_to(2).unwrap();
        assert!(ctx.entered());
        drop(ctx);
        assert_eq!(host.context_depth(), 0);
    }

    #[test]
    fn test_lifecycle_end_to_end() {
        let (_, registry) = registry(MemoryPlatform::multi_tenant([2, 3]));

        assert_eq!(registry.all().unwrap().len(), 3);
        assert_eq!(registry.get(2).unwrap().id(), TenantId::new(2));

        let added = registry.add("https://new.example.com", "New", 1).unwrap();
        assert!(registry.all().unwrap().contains_key(&added.id()));

        assert!(registry.delete(3).unwrap());
        let all = registry.all().unwrap();
        assert!(!all.contains_key(&TenantId::new(3)));
        assert_eq!(all.len(), 3);
    }
}
