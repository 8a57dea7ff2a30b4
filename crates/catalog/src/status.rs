//! Closed status enums for master-data entities.
//!
//! The backend stores these as free-form strings. Rather than passing
//! arbitrary strings through the core, each enum carries an explicit
//! `Unrecognized` variant that round-trips the original wire value.

use serde::{Deserialize, Serialize};

/// Activation status shared by products, locations, suppliers, categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EntityStatus {
    Active,
    Inactive,
    /// Any status string the console does not know. Rendered verbatim;
    /// treated as not-active everywhere a decision is needed.
    Unrecognized(String),
}

impl EntityStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, EntityStatus::Active)
    }

    pub fn as_str(&self) -> &str {
        match self {
            EntityStatus::Active => "ACTIVE",
            EntityStatus::Inactive => "INACTIVE",
            EntityStatus::Unrecognized(raw) => raw,
        }
    }
}

impl From<String> for EntityStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "ACTIVE" => EntityStatus::Active,
            "INACTIVE" => EntityStatus::Inactive,
            _ => {
                tracing::warn!(status = %raw, "unrecognized entity status");
                EntityStatus::Unrecognized(raw)
            }
        }
    }
}

impl From<EntityStatus> for String {
    fn from(status: EntityStatus) -> Self {
        status.as_str().to_owned()
    }
}

/// Location kind: warehouse or storefront.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LocationKind {
    Warehouse,
    Store,
    Unrecognized(String),
}

impl LocationKind {
    pub fn as_str(&self) -> &str {
        match self {
            LocationKind::Warehouse => "WAREHOUSE",
            LocationKind::Store => "STORE",
            LocationKind::Unrecognized(raw) => raw,
        }
    }
}

impl From<String> for LocationKind {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "WAREHOUSE" => LocationKind::Warehouse,
            "STORE" => LocationKind::Store,
            _ => {
                tracing::warn!(kind = %raw, "unrecognized location kind");
                LocationKind::Unrecognized(raw)
            }
        }
    }
}

impl From<LocationKind> for String {
    fn from(kind: LocationKind) -> Self {
        kind.as_str().to_owned()
    }
}
