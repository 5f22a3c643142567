use std::sync::Arc;

use tracing::{debug, debug_span, error, info_span};

use crate::{
    any::{AnyValue, Map, TypeKey},
    entry::{Entry, EntryKind},
    errors::{DependencyChain, InstantiatorErrorKind, MakeErrorKind},
    registry::Registry,
    service::Service as _,
};

/// Ephemeral state of one `make` call: the per-call memo table, the original
/// top-level target (the scope specialization rules are matched against), and
/// the in-progress path used for cycle detection and failure chains.
pub(crate) struct ResolutionContext {
    root: TypeKey,
    memo: Map,
    path: Vec<TypeKey>,
}

impl ResolutionContext {
    #[must_use]
    fn new(root: TypeKey) -> Self {
        Self {
            root,
            memo: Map::new(),
            path: Vec::new(),
        }
    }
}

impl Registry {
    /// Builds a fully wired value of `T`, resolving its transitive
    /// dependencies depth-first.
    ///
    /// Within one call every dependency type is built at most once and shared
    /// by all dependents. The call is all-or-nothing: any failure anywhere in
    /// the dependency tree aborts it.
    ///
    /// # Errors
    /// - [`MakeErrorKind::MissingDependency`] if a required type has no entry
    ///   and no applicable specialization.
    /// - [`MakeErrorKind::CyclicDependency`] if a type is required while
    ///   already being resolved.
    /// - [`MakeErrorKind::ConstructorFailure`] if a constructor
    ///   implementation fails; the engine never retries it.
    pub fn make<T: Send + Sync + 'static>(&self) -> Result<Arc<T>, MakeErrorKind> {
        let target = TypeKey::of::<T>();
        let span = info_span!("make", target = %target);
        let _guard = span.enter();

        let mut context = ResolutionContext::new(target);
        let value = self.resolve_key(target, &mut context)?;

        match value.downcast::<T>() {
            Ok(value) => Ok(value),
            Err(incorrect_type) => {
                let err = MakeErrorKind::IncorrectType {
                    expected: target,
                    actual: (*incorrect_type).type_id(),
                };
                error!("{}", err);
                Err(err)
            }
        }
    }

    fn resolve_key(&self, key: TypeKey, context: &mut ResolutionContext) -> Result<AnyValue, MakeErrorKind> {
        let span = debug_span!("resolve", dependency = %key);
        let _guard = span.enter();

        if let Some(value) = context.memo.get(&key) {
            debug!("Found in memo table");
            return Ok(value.clone());
        }

        if context.path.contains(&key) {
            let err = MakeErrorKind::CyclicDependency {
                cycle: DependencyChain::extended(&context.path, key),
            };
            error!("{}", err);
            return Err(err);
        }

        let Some(entry) = self.entry_for(key, context.root) else {
            let err = MakeErrorKind::MissingDependency {
                missing: key,
                chain: DependencyChain::new(&context.path),
            };
            error!("{}", err);
            return Err(err);
        };

        let value = self.construct(entry, key, context)?;
        context.memo.insert(key, value.clone());
        Ok(value)
    }

    fn construct(&self, entry: &Entry, key: TypeKey, context: &mut ResolutionContext) -> Result<AnyValue, MakeErrorKind> {
        match &entry.kind {
            EntryKind::Value(value) => Ok(value.payload.clone()),
            EntryKind::Constructor(constructor) => {
                context.path.push(key);
                let mut arguments = Vec::with_capacity(constructor.inputs.len());
                for input in &constructor.inputs {
                    match self.resolve_key(*input, context) {
                        Ok(value) => arguments.push(value),
                        Err(err) => {
                            context.path.pop();
                            return Err(err);
                        }
                    }
                }
                context.path.pop();

                match constructor.implementation.clone().call(arguments) {
                    Ok(value) => Ok(value),
                    Err(InstantiatorErrorKind::Deps(err)) => {
                        let err = MakeErrorKind::MismatchedArgument { output: key, source: err };
                        error!("{}", err);
                        Err(err)
                    }
                    Err(InstantiatorErrorKind::Factory(err)) => {
                        let err = MakeErrorKind::ConstructorFailure { output: key, source: err };
                        error!("{}", err);
                        Err(err)
                    }
                }
            }
            EntryKind::Memoized(memoized) => {
                let slot = memoized.session.slot(key);
                if let Some(value) = slot.get() {
                    debug!("Found in session");
                    return Ok(value.clone());
                }

                // Concurrent first requesters block here until the winner
                // finishes; a failed construction leaves the slot empty.
                slot.get_or_try_init(|| self.construct(&memoized.inner, key, context))
                    .map(Clone::clone)
            }
        }
    }
}
