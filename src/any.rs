use std::{
    any::{type_name, Any, TypeId},
    cmp::Ordering,
    collections::BTreeMap,
    fmt::{self, Display, Formatter},
    hash::{Hash, Hasher},
    sync::Arc,
};

/// Runtime identity of a logical type: the key every registry lookup is made with.
///
/// Equality, ordering and hashing use only the [`TypeId`]; the name is carried
/// for diagnostics.
#[derive(Debug, Clone, Copy)]
pub struct TypeKey {
    pub name: &'static str,
    pub id: TypeId,
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl PartialOrd for TypeKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TypeKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl TypeKey {
    #[inline]
    #[must_use]
    pub fn of<T>() -> Self
    where
        T: ?Sized + 'static,
    {
        Self {
            name: type_name::<T>(),
            id: TypeId::of::<T>(),
        }
    }

    #[inline]
    #[must_use]
    pub(crate) fn short_name(&self) -> &'static str {
        self.name.rsplit_once("::").map_or(self.name, |(_, name)| name)
    }
}

impl Display for TypeKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

pub(crate) type AnyValue = Arc<dyn Any + Send + Sync>;

pub(crate) type Map = BTreeMap<TypeKey, AnyValue>;

#[cfg(test)]
mod tests {
    use super::TypeKey;

    mod nested {
        pub(super) struct Marker;
    }

    #[test]
    fn test_identity_by_type() {
        assert_eq!(TypeKey::of::<u32>(), TypeKey::of::<u32>());
        assert_ne!(TypeKey::of::<u32>(), TypeKey::of::<i32>());
    }

    #[test]
    fn test_short_name() {
        let key = TypeKey::of::<nested::Marker>();
        assert_eq!(key.short_name(), "Marker");
        assert_eq!(format!("{key}"), "Marker");
    }
}
