use std::fmt::{self, Debug, Formatter};

use crate::{
    any::TypeKey,
    dependency_resolver::DependencyList,
    entry::{Entry, SpecializationRule},
    errors::RegistryErrorKind,
    instantiator::Instantiator,
    session::Session,
};

/// The ordered dependency catalogue: an append-only sequence of entries plus
/// the specialization rules attached to it.
///
/// Order matters only for overrides: when several entries share an output
/// type, the one appended last is authoritative. Nothing is ever removed, so
/// registering a test double over an existing entry is the supported way to
/// substitute it.
#[derive(Default, Clone)]
pub struct Registry {
    pub(crate) entries: Vec<Entry>,
    pub(crate) rules: Vec<SpecializationRule>,
}

impl Registry {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an already-built value.
    #[inline]
    #[must_use]
    pub fn add_value<T: Send + Sync + 'static>(self, value: T) -> Self {
        self.add_entry(Entry::value(value))
    }

    /// Appends an already-built value with a human-readable representation
    /// carried for diagnostics.
    #[inline]
    #[must_use]
    pub fn add_value_with_repr<T: Send + Sync + 'static>(self, value: T, repr: impl Into<std::sync::Arc<str>>) -> Self {
        self.add_entry(Entry::value_with_repr(value, repr))
    }

    /// Appends a constructor entry.
    ///
    /// # Errors
    /// Returns [`RegistryErrorKind::SelfCycle`] if the constructor lists its
    /// own output type as an input.
    pub fn add_constructor<Inst, Deps>(self, instantiator: Inst) -> Result<Self, RegistryErrorKind>
    where
        Inst: Instantiator<Deps> + Send + Sync,
        Deps: DependencyList,
    {
        Ok(self.add_entry(Entry::constructor(instantiator)?))
    }

    #[inline]
    #[must_use]
    pub fn add_entry(mut self, entry: Entry) -> Self {
        self.entries.push(entry);
        self
    }

    /// Concatenates two registries; `other`'s entries and rules take priority
    /// on shared output types.
    #[must_use]
    pub fn combine(mut self, other: Registry) -> Self {
        self.entries.extend(other.entries);
        self.rules.extend(other.rules);
        self
    }

    /// The most recently appended entry producing `key`, if any.
    #[must_use]
    pub fn latest(&self, key: TypeKey) -> Option<&Entry> {
        self.entries.iter().rev().find(|entry| entry.output() == key)
    }

    /// Redirects the replacement's output type to `replacement`, but only
    /// while resolving `Scope` as the top-level target. Rules for different
    /// scopes never interfere; for the same scope and output type the rule
    /// added last wins.
    #[must_use]
    pub fn specialize<Scope: ?Sized + 'static>(mut self, replacement: Entry) -> Self {
        self.rules.push(SpecializationRule {
            scope: TypeKey::of::<Scope>(),
            overridden: replacement.output(),
            replacement,
        });
        self
    }

    /// Binds the construction of `T` to `session`: the current latest entry
    /// for `T` is wrapped so the underlying construction runs at most once
    /// per session, every dependent receiving the same instance.
    ///
    /// # Errors
    /// Returns [`RegistryErrorKind::NoEntry`] if nothing is registered for `T`.
    pub fn memoize<T: 'static>(mut self, session: &Session) -> Result<Self, RegistryErrorKind> {
        let key = TypeKey::of::<T>();
        let Some(entry) = self.latest(key) else {
            return Err(RegistryErrorKind::NoEntry { target: key });
        };

        let wrapped = Entry::memoized(session, entry.clone());
        self.entries.push(wrapped);
        Ok(self)
    }

    /// Applies [`memoize`](Self::memoize) to every output type whose latest
    /// entry is a plain constructor, so effectful constructors do not have to
    /// be enumerated by hand.
    #[must_use]
    pub fn memoize_all(mut self, session: &Session) -> Self {
        let mut seen = Vec::new();
        let mut wrapped = Vec::new();
        for entry in self.entries.iter().rev() {
            let output = entry.output();
            if seen.contains(&output) {
                continue;
            }
            seen.push(output);
            if entry.is_plain_constructor() {
                wrapped.push(Entry::memoized(session, entry.clone()));
            }
        }
        // Registration order of the wrapped outputs, for deterministic lookups.
        wrapped.reverse();
        self.entries.extend(wrapped);
        self
    }

    /// The entry the resolver must use for `key` under top-level target
    /// `root`: the latest applicable specialization rule, or the latest
    /// registered entry.
    pub(crate) fn entry_for(&self, key: TypeKey, root: TypeKey) -> Option<&Entry> {
        if let Some(rule) = self.rules.iter().rev().find(|rule| rule.scope == root && rule.overridden == key) {
            return Some(&rule.replacement);
        }
        self.latest(key)
    }
}

impl Debug for Registry {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("entries", &self.entries)
            .field("rules", &self.rules)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use tracing_test::traced_test;

    use super::Registry;
    use crate::{
        any::TypeKey,
        dependency_resolver::Inject,
        entry::Entry,
        errors::{InstantiateErrorKind, RegistryErrorKind},
        session::Session,
    };

    struct Port(u16);
    struct Connection {
        port: u16,
    }

    #[test]
    #[traced_test]
    fn test_latest_wins() {
        let registry = Registry::new().add_value(Port(1)).add_value(Port(2));

        let port = registry.make::<Port>().unwrap();
        assert_eq!(port.0, 2);
    }

    #[test]
    #[traced_test]
    fn test_combine_second_overrides_first() {
        let defaults = Registry::new().add_value(Port(5432));
        let overrides = Registry::new().add_value(Port(9999));

        let port = defaults.clone().combine(overrides).make::<Port>().unwrap();
        assert_eq!(port.0, 9999);

        let port = defaults.make::<Port>().unwrap();
        assert_eq!(port.0, 5432);
    }

    #[test]
    fn test_latest_lookup() {
        let registry = Registry::new().add_value(Port(5432));

        assert!(registry.latest(TypeKey::of::<Port>()).is_some());
        assert!(registry.latest(TypeKey::of::<Connection>()).is_none());
    }

    #[test]
    fn test_self_cycle_rejected_at_registration() {
        let err = Registry::new()
            .add_constructor(|Inject(port): Inject<Port>| Ok::<_, InstantiateErrorKind>(Port(port.0)))
            .unwrap_err();

        assert!(matches!(err, RegistryErrorKind::SelfCycle { .. }));
    }

    #[test]
    fn test_memoize_unregistered_type() {
        let session = Session::new();
        let err = Registry::new().memoize::<Connection>(&session).unwrap_err();

        assert!(matches!(
            err,
            RegistryErrorKind::NoEntry { target } if target == TypeKey::of::<Connection>()
        ));
    }

    #[test]
    #[traced_test]
    fn test_override_after_memoize_wins() {
        let session = Session::new();
        let registry = Registry::new()
            .add_constructor(|| Ok::<_, InstantiateErrorKind>(Connection { port: 1 }))
            .unwrap()
            .memoize::<Connection>(&session)
            .unwrap()
            .add_value(Connection { port: 2 });

        let connection = registry.make::<Connection>().unwrap();
        assert_eq!(connection.port, 2);
    }

    #[test]
    #[traced_test]
    fn test_specialize_same_pair_latest_wins() {
        struct App {
            port: u16,
        }

        let registry = Registry::new()
            .add_value(Port(1))
            .add_constructor(|Inject(port): Inject<Port>| Ok::<_, InstantiateErrorKind>(App { port: port.0 }))
            .unwrap()
            .specialize::<App>(Entry::value(Port(2)))
            .specialize::<App>(Entry::value(Port(3)));

        let app = registry.make::<App>().unwrap();
        assert_eq!(app.port, 3);
    }

    #[test]
    fn test_debug_lists_entries() {
        let registry = Registry::new().add_value_with_repr(Port(5432), "Port(5432)");
        let rendered = format!("{registry:?}");

        assert!(rendered.contains("Value(`Port` = Port(5432))"));
    }
}
