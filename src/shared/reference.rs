use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Anything stored under its own UUID
pub trait Identified {
    fn id(&self) -> Uuid;
}

/// A reference to an independently owned entity.
///
/// On the wire this is either a bare id (`"0190..."`) or the resolved entity
/// (`{ "id": "0190...", ... }`). Read paths may return either shape, so callers
/// match on it instead of assuming one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Reference<T> {
    Id(Uuid),
    Resolved(T),
}

impl<T: Identified> Reference<T> {
    /// Identifier of the referenced entity, whichever shape this is in
    pub fn id(&self) -> Uuid {
        match self {
            Reference::Id(id) => *id,
            Reference::Resolved(entity) => entity.id(),
        }
    }

    pub fn resolved(&self) -> Option<&T> {
        match self {
            Reference::Id(_) => None,
            Reference::Resolved(entity) => Some(entity),
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Reference::Resolved(_))
    }

    /// Resolve with `lookup`, falling back to the bare id when the entity is gone
    pub fn resolve_with<F>(id: Uuid, lookup: F) -> Self
    where
        F: FnOnce(Uuid) -> Option<T>,
    {
        match lookup(id) {
            Some(entity) => Reference::Resolved(entity),
            None => Reference::Id(id),
        }
    }
}
