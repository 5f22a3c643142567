use std::{
    fmt::{self, Debug, Formatter},
    sync::Arc,
};

use crate::{
    any::{AnyValue, TypeKey},
    dependency_resolver::DependencyList,
    errors::RegistryErrorKind,
    instantiator::{boxed_constructor, BoxCloneConstructor, Instantiator},
    session::Session,
};

/// A single registration: how to obtain one value of the entry's output type.
#[derive(Clone)]
pub struct Entry {
    pub(crate) kind: EntryKind,
}

#[derive(Clone)]
pub(crate) enum EntryKind {
    Value(ValueEntry),
    Constructor(ConstructorEntry),
    Memoized(MemoizedEntry),
}

#[derive(Clone)]
pub(crate) struct ValueEntry {
    pub(crate) output: TypeKey,
    pub(crate) payload: AnyValue,
    pub(crate) repr: Option<Arc<str>>,
}

#[derive(Clone)]
pub(crate) struct ConstructorEntry {
    pub(crate) output: TypeKey,
    pub(crate) inputs: Vec<TypeKey>,
    pub(crate) implementation: BoxCloneConstructor,
}

#[derive(Clone)]
pub(crate) struct MemoizedEntry {
    pub(crate) session: Session,
    pub(crate) inner: Box<Entry>,
}

impl Entry {
    /// An already-built value.
    #[must_use]
    pub fn value<T: Send + Sync + 'static>(value: T) -> Self {
        Self {
            kind: EntryKind::Value(ValueEntry {
                output: TypeKey::of::<T>(),
                payload: Arc::new(value),
                repr: None,
            }),
        }
    }

    /// An already-built value with a human-readable representation carried for
    /// diagnostics.
    #[must_use]
    pub fn value_with_repr<T: Send + Sync + 'static>(value: T, repr: impl Into<Arc<str>>) -> Self {
        Self {
            kind: EntryKind::Value(ValueEntry {
                output: TypeKey::of::<T>(),
                payload: Arc::new(value),
                repr: Some(repr.into()),
            }),
        }
    }

    /// A constructor over other registered types.
    ///
    /// # Errors
    /// Returns [`RegistryErrorKind::SelfCycle`] if the constructor lists its
    /// own output type as an input. Longer cycles are only detected during
    /// [`make`](crate::Registry::make).
    pub fn constructor<Inst, Deps>(instantiator: Inst) -> Result<Self, RegistryErrorKind>
    where
        Inst: Instantiator<Deps> + Send + Sync,
        Deps: DependencyList,
    {
        let output = TypeKey::of::<Inst::Provides>();
        let inputs = Deps::type_keys();
        if inputs.contains(&output) {
            return Err(RegistryErrorKind::SelfCycle { output });
        }

        Ok(Self {
            kind: EntryKind::Constructor(ConstructorEntry {
                output,
                inputs,
                implementation: boxed_constructor(instantiator),
            }),
        })
    }

    #[must_use]
    pub(crate) fn memoized(session: &Session, inner: Entry) -> Self {
        Self {
            kind: EntryKind::Memoized(MemoizedEntry {
                session: session.clone(),
                inner: Box::new(inner),
            }),
        }
    }

    /// The type this entry produces.
    #[must_use]
    pub fn output(&self) -> TypeKey {
        match &self.kind {
            EntryKind::Value(value) => value.output,
            EntryKind::Constructor(constructor) => constructor.output,
            EntryKind::Memoized(memoized) => memoized.inner.output(),
        }
    }

    #[must_use]
    pub(crate) fn is_plain_constructor(&self) -> bool {
        matches!(self.kind, EntryKind::Constructor(_))
    }
}

impl Debug for Entry {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.kind {
            EntryKind::Value(ValueEntry { output, repr, .. }) => match repr {
                Some(repr) => write!(f, "Value(`{output}` = {repr})"),
                None => write!(f, "Value(`{output}`)"),
            },
            EntryKind::Constructor(ConstructorEntry { output, inputs, .. }) => {
                write!(f, "Constructor(`{output}`")?;
                let mut inputs = inputs.iter();
                if let Some(first) = inputs.next() {
                    write!(f, " <- `{first}`")?;
                    for input in inputs {
                        write!(f, ", `{input}`")?;
                    }
                }
                write!(f, ")")
            }
            EntryKind::Memoized(MemoizedEntry { inner, .. }) => write!(f, "Memoized({inner:?})"),
        }
    }
}

/// Redirects `overridden` to `replacement`, but only while the resolution
/// context's top-level target is `scope`.
#[derive(Clone)]
pub(crate) struct SpecializationRule {
    pub(crate) scope: TypeKey,
    pub(crate) overridden: TypeKey,
    pub(crate) replacement: Entry,
}

impl Debug for SpecializationRule {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "`{}` under `{}` -> {:?}", self.overridden, self.scope, self.replacement)
    }
}

#[cfg(test)]
mod tests {
    use super::Entry;
    use crate::{
        any::TypeKey,
        dependency_resolver::Inject,
        errors::{InstantiateErrorKind, RegistryErrorKind},
    };

    struct Port(u16);
    struct Connection;

    #[test]
    fn test_outputs() {
        let value = Entry::value(Port(5432));
        assert_eq!(value.output(), TypeKey::of::<Port>());

        let constructor = Entry::constructor(|Inject(_): Inject<Port>| Ok::<_, InstantiateErrorKind>(Connection)).unwrap();
        assert_eq!(constructor.output(), TypeKey::of::<Connection>());
    }

    #[test]
    fn test_immediate_self_cycle_rejected() {
        let err = Entry::constructor(|Inject(_): Inject<Connection>| Ok::<_, InstantiateErrorKind>(Connection)).unwrap_err();

        assert!(matches!(
            err,
            RegistryErrorKind::SelfCycle { output } if output == TypeKey::of::<Connection>()
        ));
    }

    #[test]
    fn test_debug_repr() {
        let entry = Entry::value_with_repr(Port(5432), "Port(5432)");
        assert_eq!(format!("{entry:?}"), "Value(`Port` = Port(5432))");

        let entry = Entry::constructor(|Inject(_): Inject<Port>| Ok::<_, InstantiateErrorKind>(Connection)).unwrap();
        assert_eq!(format!("{entry:?}"), "Constructor(`Connection` <- `Port`)");
    }
}
