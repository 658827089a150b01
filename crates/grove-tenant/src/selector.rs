//! Tenant selectors and pseudo-identifiers
//!
//! Callers address tenants either by a real positive ID or by one of the
//! reserved pseudo-identifiers: `ALL` (every tenant), `CURRENT` (the
//! tenant presently in context), and `INVALID` (the resolution sink for
//! anything unresolvable). The raw integer encoding is part of the
//! public surface so integer-keyed callers can round-trip selectors.

use grove_common::TenantId;
use std::fmt;

/// Raw integer for [`TenantSel::All`].
pub const ALL: i64 = -1;
/// Raw integer for [`TenantSel::Current`].
pub const CURRENT: i64 = 0;
/// Raw integer for [`TenantSel::Invalid`].
pub const INVALID: i64 = -2;

/// A tenant ID or pseudo-identifier, prior to resolution.
///
/// [`crate::TenantRegistry::resolve`] maps any selector to one of
/// `All`, `Id`, or `Invalid`; `Current` never survives resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TenantSel {
    /// Every tenant (platform-wide scope).
    All,
    /// The tenant presently in context.
    Current,
    /// The resolution sink: nothing addressable.
    Invalid,
    /// One specific tenant.
    Id(TenantId),
}

impl TenantSel {
    /// The raw integer encoding of this selector.
    pub fn as_raw(self) -> i64 {
        match self {
            Self::All => ALL,
            Self::Current => CURRENT,
            Self::Invalid => INVALID,
            Self::Id(id) => id.raw(),
        }
    }

    /// Whether this selector is the resolution sink.
    pub fn is_invalid(self) -> bool {
        self == Self::Invalid
    }
}

impl From<i64> for TenantSel {
    fn from(raw: i64) -> Self {
        match raw {
            ALL => Self::All,
            CURRENT => Self::Current,
            n if n > 0 => Self::Id(TenantId::new(n)),
            // INVALID and every other negative integer
            _ => Self::Invalid,
        }
    }
}

impl From<TenantId> for TenantSel {
    fn from(id: TenantId) -> Self {
        Self::Id(id)
    }
}

impl fmt::Display for TenantSel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "ALL"),
            Self::Current => write!(f, "CURRENT"),
            Self::Invalid => write!(f, "INVALID"),
            Self::Id(id) => write!(f, "{id}"),
        }
    }
}
