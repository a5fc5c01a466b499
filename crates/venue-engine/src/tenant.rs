//! Demo and real tenants.
//!
//! Demo identities are sandboxed: they are never persisted and must never
//! read or write real venue data. The class travels with the identity as a
//! field instead of being re-derived from id prefixes at every call site.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, VenueError};

/// Prefix carried by legacy demo user ids. Demo venue ids (`demo-venue-`) share it.
pub const LEGACY_DEMO_PREFIX: &str = "demo-";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TenantClass {
    Demo,
    Real,
}

impl TenantClass {
    /// Demo data lives only for the session.
    pub fn persists(self) -> bool {
        matches!(self, TenantClass::Real)
    }
}

impl fmt::Display for TenantClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TenantClass::Demo => f.write_str("demo"),
            TenantClass::Real => f.write_str("real"),
        }
    }
}

/// A user or venue identity tagged with its tenant class.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TenantId {
    pub class: TenantClass,
    pub id: String,
}

impl TenantId {
    pub fn demo(id: impl Into<String>) -> Self {
        Self {
            class: TenantClass::Demo,
            id: id.into(),
        }
    }

    pub fn real(id: impl Into<String>) -> Self {
        Self {
            class: TenantClass::Real,
            id: id.into(),
        }
    }

    /// Classify an id minted under the old prefix convention.
    pub fn from_legacy(raw: &str) -> Self {
        if raw.starts_with(LEGACY_DEMO_PREFIX) {
            TenantId::demo(raw)
        } else {
            TenantId::real(raw)
        }
    }

    pub fn is_demo(&self) -> bool {
        self.class == TenantClass::Demo
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.class, self.id)
    }
}

/// Reject access that crosses the demo/real boundary.
pub fn ensure_same_class(actor: &TenantId, resource: &TenantId) -> Result<()> {
    if actor.class != resource.class {
        tracing::warn!(%actor, %resource, "cross-tenant access rejected");
        return Err(VenueError::TenantMismatch {
            actor: actor.class,
            resource: resource.class,
        });
    }
    Ok(())
}
