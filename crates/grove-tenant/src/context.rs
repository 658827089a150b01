//! Scoped tenant-context switching
//!
//! Configuration reads and writes observe whatever tenant context is
//! entered on the host's ambient stack. The switcher wraps the host's
//! push/pop pair in an RAII guard so every enter is matched by exactly
//! one exit on every path out of the scope, including error returns and
//! unwinds. Nested guards release in strict LIFO order through drop
//! order, so no stale context leaks into unrelated code.

use crate::selector::TenantSel;
use grove_common::Platform;
use std::sync::Arc;
use tracing::trace;

/// Acquires and releases tenant context around store access.
pub struct ContextSwitcher {
    host: Arc<dyn Platform>,
}

impl ContextSwitcher {
    /// Create a switcher over the given host.
    pub fn new(host: Arc<dyn Platform>) -> Self {
        Self { host }
    }

    /// Enter a tenant's context, returning the guard that exits it.
    ///
    /// A no-op guard is returned on single-tenant deployments (there is
    /// only one context to be in) and for selectors that resolved to
    /// `All` or `Invalid`. Callers pass an already-resolved selector;
    /// `Current` is treated as unresolved and therefore also no-ops.
    pub fn enter(&self, resolved: TenantSel) -> TenantContext {
        match resolved {
            TenantSel::Id(id) if self.host.is_multi_tenant() => {
                trace!(tenant = id.raw(), "entering tenant context");
                self.host.enter_tenant(id);
                TenantContext {
                    host: Some(self.host.clone()),
                }
            }
            _ => TenantContext { host: None },
        }
    }
}

/// RAII guard over an entered tenant context.
///
/// Dropping the guard pops the context. Guards must not outlive the
/// call scope that acquired them; the compiler's drop order keeps
/// nested guards LIFO.
#[must_use = "dropping the guard exits the tenant context"]
pub struct TenantContext {
    host: Option<Arc<dyn Platform>>,
}

impl TenantContext {
    /// Whether this guard actually switched context.
    pub fn entered(&self) -> bool {
        self.host.is_some()
    }
}

impl Drop for TenantContext {
    fn drop(&mut self) {
        if let Some(host) = self.host.take() {
            trace!("exiting tenant context");
            host.exit_tenant();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grove_common::{MemoryPlatform, TenantId};

    #[test]
    fn test_enter_exits_on_drop() {
        let host = Arc::new(MemoryPlatform::multi_tenant([2]));
        let switcher = ContextSwitcher::new(host.clone());

        {
            let ctx = switcher.enter(TenantSel::Id(TenantId::new(2)));
            assert!(ctx.entered());
            assert_eq!(host.context_depth(), 1);
            assert_eq!(host.current_tenant_id(), TenantId::new(2));
        }
        assert_eq!(host.context_depth(), 0);
    }

    #[test]
    fn test_nested_guards_unwind_lifo() {
        let host = Arc::new(MemoryPlatform::multi_tenant([2, 3]));
        let switcher = ContextSwitcher::new(host.clone());

        let outer = switcher.enter(TenantSel::Id(TenantId::new(2)));
        {
            let _inner = switcher.enter(TenantSel::Id(TenantId::new(3)));
            assert_eq!(host.current_tenant_id(), TenantId::new(3));
        }
        assert_eq!(host.current_tenant_id(), TenantId::new(2));
        drop(outer);
        assert_eq!(host.context_depth(), 0);
    }

    #[test]
    fn test_single_tenant_is_noop() {
        let host = Arc::new(MemoryPlatform::single_tenant());
        let switcher = ContextSwitcher::new(host.clone());

        let ctx = switcher.enter(TenantSel::Id(TenantId::ROOT));
        assert!(!ctx.entered());
        assert_eq!(host.context_depth(), 0);
    }

    #[test]
    fn test_pseudo_selectors_are_noop() {
        let host = Arc::new(MemoryPlatform::multi_tenant([2]));
        let switcher = ContextSwitcher::new(host.clone());

        assert!(!switcher.enter(TenantSel::All).entered());
        assert!(!switcher.enter(TenantSel::Invalid).entered());
        assert!(!switcher.enter(TenantSel::Current).entered());
        assert_eq!(host.context_depth(), 0);
    }
}
