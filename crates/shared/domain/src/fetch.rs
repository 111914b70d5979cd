//! Association fetch strategies.
//!
//! Associations are explicit values instead of proxies: a to-one association
//! is a [`Reference`], a to-many association is a [`Collection`]. Reads take a
//! [`FetchMode`] deciding whether they arrive loaded or as bare identifiers.

use serde::{Deserialize, Serialize};

/// A persisted record with a store-assigned identifier.
pub trait Entity {
    /// Identifier assigned on first save (`None` while transient).
    fn id(&self) -> Option<i32>;

    /// Check if the record has never been saved
    fn is_transient(&self) -> bool {
        self.id().is_none()
    }
}

/// How a read materializes associations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchMode {
    /// Load associations in the same read
    Eager,
    /// Leave associations as identifiers until resolved
    #[default]
    Lazy,
}

impl FetchMode {
    pub fn is_eager(&self) -> bool {
        matches!(self, FetchMode::Eager)
    }
}

/// To-one association.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Reference<T> {
    /// Only the target identifier is known
    Unloaded { id: i32 },
    /// Target record is in memory
    Loaded(Box<T>),
}

impl<T> Reference<T> {
    /// Reference a record by identifier only
    pub fn unloaded(id: i32) -> Self {
        Reference::Unloaded { id }
    }

    /// Reference an in-memory record
    pub fn loaded(entity: T) -> Self {
        Reference::Loaded(Box::new(entity))
    }

    /// Get the target if it is loaded
    pub fn get(&self) -> Option<&T> {
        match self {
            Reference::Loaded(entity) => Some(entity),
            Reference::Unloaded { .. } => None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, Reference::Loaded(_))
    }
}

impl<T: Entity> Reference<T> {
    /// Identifier of the target (`None` for a loaded transient record)
    pub fn id(&self) -> Option<i32> {
        match self {
            Reference::Unloaded { id } => Some(*id),
            Reference::Loaded(entity) => entity.id(),
        }
    }
}

/// To-many association.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection<T> {
    /// Elements were not read
    Unloaded,
    /// Elements are in memory
    Loaded(Vec<T>),
}

impl<T> Collection<T> {
    /// Get the elements if they are loaded
    pub fn get(&self) -> Option<&[T]> {
        match self {
            Collection::Loaded(items) => Some(items),
            Collection::Unloaded => None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, Collection::Loaded(_))
    }

    /// Append an element, starting a loaded collection if none was read
    pub fn push(&mut self, item: T) {
        match self {
            Collection::Loaded(items) => items.push(item),
            Collection::Unloaded => *self = Collection::Loaded(vec![item]),
        }
    }

    /// Take the loaded elements, leaving an empty loaded collection
    pub fn take(&mut self) -> Option<Vec<T>> {
        match self {
            Collection::Loaded(items) => Some(std::mem::take(items)),
            Collection::Unloaded => None,
        }
    }
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Collection::Loaded(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Named {
        id: Option<i32>,
    }

    impl Entity for Named {
        fn id(&self) -> Option<i32> {
            self.id
        }
    }

    #[test]
    fn reference_id_comes_from_target_when_loaded() {
        assert_eq!(Reference::<Named>::unloaded(7).id(), Some(7));
        assert_eq!(Reference::loaded(Named { id: Some(3) }).id(), Some(3));
        assert_eq!(Reference::loaded(Named { id: None }).id(), None);
    }

    #[test]
    fn unloaded_reference_has_no_target() {
        let reference = Reference::<Named>::unloaded(1);
        assert!(!reference.is_loaded());
        assert!(reference.get().is_none());
    }

    #[test]
    fn push_on_unloaded_collection_starts_loaded() {
        let mut members: Collection<i32> = Collection::Unloaded;
        members.push(1);
        members.push(2);
        assert_eq!(members.get(), Some(&[1, 2][..]));
    }

    #[test]
    fn take_empties_loaded_collection() {
        let mut members = Collection::Loaded(vec![1, 2, 3]);
        assert_eq!(members.take(), Some(vec![1, 2, 3]));
        assert_eq!(members.get(), Some(&[][..]));
        assert_eq!(Collection::<i32>::Unloaded.take(), None);
    }

    #[test]
    fn fetch_mode_defaults_to_lazy() {
        assert_eq!(FetchMode::default(), FetchMode::Lazy);
        assert!(FetchMode::Eager.is_eager());
    }
}
