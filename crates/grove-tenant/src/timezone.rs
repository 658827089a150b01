//! Tenant time-zone value type
//!
//! The store keeps either a named zone identifier or a plain GMT offset
//! in hours, never both. Reading prefers the named form.

use chrono::FixedOffset;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A tenant's time zone: a named identifier or a fixed GMT offset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TenantTimeZone {
    /// Named zone identifier, e.g. `America/Los_Angeles`.
    Named(String),
    /// GMT offset in hours, e.g. `-8.0` or `5.5`.
    Offset(f64),
}

impl TenantTimeZone {
    /// The named identifier, if this is the named form.
    pub fn identifier(&self) -> Option<&str> {
        match self {
            Self::Named(name) => Some(name),
            Self::Offset(_) => None,
        }
    }

    /// The offset in hours, if this is the offset form.
    pub fn offset_hours(&self) -> Option<f64> {
        match self {
            Self::Named(_) => None,
            Self::Offset(hours) => Some(*hours),
        }
    }

    /// The offset form as a `chrono` fixed offset.
    ///
    /// Named zones have no resolvable offset here (that would need a
    /// zoneinfo database); they return `None`.
    pub fn fixed_offset(&self) -> Option<FixedOffset> {
        match self {
            Self::Named(_) => None,
            Self::Offset(hours) => FixedOffset::east_opt((hours * 3600.0) as i32),
        }
    }
}

impl fmt::Display for TenantTimeZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => write!(f, "{name}"),
            Self::Offset(hours) => {
                let total_minutes = (hours * 60.0).round() as i64;
                let sign = if total_minutes < 0 { '-' } else { '+' };
                let abs = total_minutes.abs();
                write!(f, "{sign}{:02}:{:02}", abs / 60, abs % 60)
            }
        }
    }
}
