//! Tenant identifier value object
//!
//! Real tenant IDs are positive integers assigned by the host at
//! provisioning time. ID `1` is the root tenant: the install every
//! deployment starts with, which can never be deleted.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Uniquely identifies a tenant within one deployment.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct TenantId(i64);

impl TenantId {
    /// The root tenant every deployment starts with.
    pub const ROOT: TenantId = TenantId(1);

    /// Wrap a raw host-assigned ID. Callers must pass a positive value;
    /// reserved and negative integers are selector territory, not IDs.
    pub fn new(raw: i64) -> Self {
        debug_assert!(raw > 0, "tenant IDs are positive integers");
        Self(raw)
    }

    /// The raw integer value.
    pub fn raw(self) -> i64 {
        self.0
    }

    /// Whether this is the protected root tenant.
    pub fn is_root(self) -> bool {
        self == Self::ROOT
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
