use std::{fmt, hash, marker::PhantomData, ops::Deref};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(debug_assertions)]
static ID_TO_NAME: std::sync::OnceLock<
    parking_lot::RwLock<std::collections::HashMap<Uuid, String>>,
> = std::sync::OnceLock::new();

/// A typed identifier. Ids built from the same name are always equal, which
/// lets config files and code refer to the same action by name.
pub struct Id<T> {
    id: Uuid,
    _marker: PhantomData<T>,
}

impl<T> Deref for Id<T> {
    type Target = Uuid;

    fn deref(&self) -> &Self::Target {
        &self.id
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{} ({})", name, self.id),
            None => fmt::Debug::fmt(&self.id, f),
        }
    }
}

impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T> Eq for Id<T> {}

impl<T> hash::Hash for Id<T> {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<T> Id<T> {
    pub const fn from_uuid(id: Uuid) -> Self {
        Self {
            id,
            _marker: PhantomData,
        }
    }

    pub fn from_str(s: &str) -> Self {
        let id = Uuid::from_u128(xxhash_rust::xxh3::xxh3_128(s.as_bytes()));
        #[cfg(debug_assertions)]
        {
            ID_TO_NAME
                .get_or_init(Default::default)
                .write()
                .insert(id, s.to_string());
        }
        Self::from_uuid(id)
    }

    /// The name this id was built from, if it is known. Only tracked in debug
    /// builds.
    pub fn name(&self) -> Option<String> {
        #[cfg(debug_assertions)]
        let name = ID_TO_NAME
            .get()
            .and_then(|m| m.read().get(&self.id).cloned());
        #[cfg(not(debug_assertions))]
        let name = None;
        name
    }
}

impl<T> Serialize for Id<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.id.serialize(serializer)
    }
}

impl<'de, T> Deserialize<'de> for Id<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        Uuid::deserialize(deserializer).map(Self::from_uuid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Marker;

    #[test]
    fn same_name_same_id() {
        let a = Id::<Marker>::from_str("undo_action");
        let b = Id::<Marker>::from_str("undo_action");
        let c = Id::<Marker>::from_str("redo_action");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[cfg(debug_assertions)]
    #[test]
    fn debug_output_contains_name() {
        let id = Id::<Marker>::from_str("copy_css_action");
        assert!(format!("{:?}", id).starts_with("copy_css_action ("));
        assert_eq!(id.name().as_deref(), Some("copy_css_action"));
    }
}
