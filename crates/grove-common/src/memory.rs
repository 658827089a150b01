//! In-memory reference `Platform`
//!
//! A complete in-process host: a tenant table, per-tenant configuration
//! namespaces, a real LIFO context stack, an extension catalog, and
//! platform-wide plus per-tenant activation lists. Test suites across
//! the workspace drive the registries against it, and its call counters
//! let them assert the enumerate-once and idempotence properties.

use crate::error::{GroveError, GroveResult};
use crate::host::{Platform, RawProps};
use crate::id::TenantId;
use dashmap::DashMap;
use parking_lot::{Mutex, RwLock};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Lock-free call counters for asserting collaborator traffic.
#[derive(Debug, Default)]
pub struct HostCounters {
    /// Calls to `list_tenants`
    pub list_tenants: AtomicUsize,
    /// Calls to `list_extensions`
    pub list_extensions: AtomicUsize,
    /// Calls to `create_tenant`
    pub creates: AtomicUsize,
    /// Calls to `delete_tenant`
    pub deletes: AtomicUsize,
    /// Calls to either activation method
    pub activations: AtomicUsize,
    /// Calls to either deactivation method
    pub deactivations: AtomicUsize,
}

impl HostCounters {
    fn bump(counter: &AtomicUsize) {
        counter.fetch_add(1, Ordering::Relaxed);
    }
}

/// In-memory [`Platform`] implementation.
pub struct MemoryPlatform {
    multi_tenant: bool,
    base_tenant: TenantId,
    tenants: RwLock<BTreeSet<TenantId>>,
    configs: DashMap<TenantId, BTreeMap<String, Value>>,
    context: Mutex<Vec<TenantId>>,
    extensions: RwLock<BTreeMap<String, RawProps>>,
    platform_active: RwLock<Vec<String>>,
    tenant_active: DashMap<TenantId, Vec<String>>,
    creation_error: RwLock<Option<String>>,
    tenant_activation_error: RwLock<Option<String>>,
    /// Collaborator call counters.
    pub counters: HostCounters,
}

impl MemoryPlatform {
    /// A single-tenant deployment holding only the root tenant.
    pub fn single_tenant() -> Self {
        Self::build(false, [TenantId::ROOT])
    }

    /// A multi-tenant deployment seeded with the given tenant IDs.
    /// The root tenant is always present.
    pub fn multi_tenant(ids: impl IntoIterator<Item = i64>) -> Self {
        let mut tenants: BTreeSet<TenantId> = ids.into_iter().map(TenantId::new).collect();
        tenants.insert(TenantId::ROOT);
        Self::build(true, tenants)
    }

    fn build(multi_tenant: bool, tenants: impl IntoIterator<Item = TenantId>) -> Self {
        Self {
            multi_tenant,
            base_tenant: TenantId::ROOT,
            tenants: RwLock::new(tenants.into_iter().collect()),
            configs: DashMap::new(),
            context: Mutex::new(Vec::new()),
            extensions: RwLock::new(BTreeMap::new()),
            platform_active: RwLock::new(Vec::new()),
            tenant_active: DashMap::new(),
            creation_error: RwLock::new(None),
            tenant_activation_error: RwLock::new(None),
            counters: HostCounters::default(),
        }
    }

    /// Seed an extension into the discovery catalog.
    pub fn with_extension(self, path: &str, props: RawProps) -> Self {
        self.extensions.write().insert(path.to_string(), props);
        self
    }

    /// Seed the platform-wide activation list.
    pub fn with_platform_active(self, paths: impl IntoIterator<Item = String>) -> Self {
        *self.platform_active.write() = paths.into_iter().collect();
        self
    }

    /// Seed one tenant's activation list.
    pub fn with_tenant_active(self, id: i64, paths: impl IntoIterator<Item = String>) -> Self {
        self.tenant_active
            .insert(TenantId::new(id), paths.into_iter().collect());
        self
    }

    /// Seed one tenant's configuration namespace.
    pub fn with_config(self, id: i64, key: &str, value: Value) -> Self {
        self.configs
            .entry(TenantId::new(id))
            .or_default()
            .insert(key.to_string(), value);
        self
    }

    /// Make the next `create_tenant` fail with this message.
    pub fn fail_creation(&self, message: &str) {
        *self.creation_error.write() = Some(message.to_string());
    }

    /// Make tenant-scoped activation calls fail with this message.
    pub fn fail_tenant_activation(&self, message: &str) {
        *self.tenant_activation_error.write() = Some(message.to_string());
    }

    /// Depth of the ambient context stack. Zero when fully unwound.
    pub fn context_depth(&self) -> usize {
        self.context.lock().len()
    }

    /// The tenant whose namespace reads and writes currently target.
    fn effective_tenant(&self) -> TenantId {
        self.context
            .lock()
            .last()
            .copied()
            .unwrap_or(self.base_tenant)
    }

    fn next_tenant_id(&self) -> TenantId {
        let tenants = self.tenants.read();
        let max = tenants.iter().next_back().map_or(1, |id| id.raw());
        TenantId::new(max + 1)
    }
}

impl Platform for MemoryPlatform {
    fn is_multi_tenant(&self) -> bool {
        self.multi_tenant
    }

    fn current_tenant_id(&self) -> TenantId {
        self.effective_tenant()
    }

    fn list_tenants(&self) -> GroveResult<Vec<TenantId>> {
        HostCounters::bump(&self.counters.list_tenants);
        Ok(self.tenants.read().iter().copied().collect())
    }

    fn create_tenant(
        &self,
        _domain: &str,
        _path: &str,
        _title: &str,
        _admin_id: i64,
    ) -> GroveResult<TenantId> {
        HostCounters::bump(&self.counters.creates);
        if let Some(message) = self.creation_error.write().take() {
            return Err(GroveError::Host(message));
        }
        let id = self.next_tenant_id();
        self.tenants.write().insert(id);
        Ok(id)
    }

    fn delete_tenant(&self, id: TenantId, _permanent: bool) -> GroveResult<()> {
        HostCounters::bump(&self.counters.deletes);
        self.tenants.write().remove(&id);
        self.configs.remove(&id);
        self.tenant_active.remove(&id);
        Ok(())
    }

    fn enter_tenant(&self, id: TenantId) {
        self.context.lock().push(id);
    }

    fn exit_tenant(&self) {
        self.context.lock().pop();
    }

    fn get_config(&self, key: &str) -> Option<Value> {
        self.configs
            .get(&self.effective_tenant())
            .and_then(|ns| ns.get(key).cloned())
    }

    fn set_config(&self, key: &str, value: Value) -> bool {
        self.configs
            .entry(self.effective_tenant())
            .or_default()
            .insert(key.to_string(), value);
        true
    }

    fn list_extensions(&self) -> GroveResult<BTreeMap<String, RawProps>> {
        HostCounters::bump(&self.counters.list_extensions);
        Ok(self.extensions.read().clone())
    }

    fn activate_platform_wide(&self, path: &str) -> GroveResult<()> {
        HostCounters::bump(&self.counters.activations);
        let mut list = self.platform_active.write();
        if !list.iter().any(|p| p == path) {
            list.push(path.to_string());
        }
        Ok(())
    }

    fn activate_for_current_tenant(&self, path: &str) -> GroveResult<()> {
        HostCounters::bump(&self.counters.activations);
        if let Some(message) = self.tenant_activation_error.write().take() {
            return Err(GroveError::Host(message));
        }
        let mut list = self
            .tenant_active
            .entry(self.effective_tenant())
            .or_default();
        if !list.iter().any(|p| p == path) {
            list.push(path.to_string());
        }
        Ok(())
    }

    fn deactivate_platform_wide(&self, path: &str) -> GroveResult<()> {
        HostCounters::bump(&self.counters.deactivations);
        self.platform_active.write().retain(|p| p != path);
        Ok(())
    }

    fn deactivate_for_current_tenant(&self, path: &str) -> GroveResult<()> {
        HostCounters::bump(&self.counters.deactivations);
        if let Some(mut list) = self.tenant_active.get_mut(&self.effective_tenant()) {
            list.retain(|p| p != path);
        }
        Ok(())
    }

    fn platform_active_list(&self) -> GroveResult<Vec<String>> {
        Ok(self.platform_active.read().clone())
    }

    fn tenant_active_list(&self) -> GroveResult<Vec<String>> {
        Ok(self
            .tenant_active
            .get(&self.effective_tenant())
            .map(|list| list.clone())
            .unwrap_or_default())
    }
}
