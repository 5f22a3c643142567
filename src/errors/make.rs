use std::{
    any::TypeId,
    fmt::{self, Display, Formatter},
};

use super::{instantiate::InstantiateErrorKind, instantiator::ArgumentErrorKind};
use crate::any::TypeKey;

/// The ordered path of types the resolver was working through when a failure
/// occurred, outermost target first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyChain(Vec<TypeKey>);

impl DependencyChain {
    #[inline]
    #[must_use]
    pub(crate) fn new(path: &[TypeKey]) -> Self {
        Self(path.to_vec())
    }

    #[inline]
    #[must_use]
    pub(crate) fn extended(path: &[TypeKey], last: TypeKey) -> Self {
        let mut types = path.to_vec();
        types.push(last);
        Self(types)
    }

    #[must_use]
    pub fn types(&self) -> &[TypeKey] {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn contains(&self, key: TypeKey) -> bool {
        self.0.contains(&key)
    }
}

impl Display for DependencyChain {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut types = self.0.iter();
        if let Some(first) = types.next() {
            write!(f, "{first}")?;
            for key in types {
                write!(f, " -> {key}")?;
            }
        }
        Ok(())
    }
}

#[derive(thiserror::Error, Debug)]
pub enum MakeErrorKind {
    MissingDependency {
        missing: TypeKey,
        chain: DependencyChain,
    },
    CyclicDependency {
        cycle: DependencyChain,
    },
    ConstructorFailure {
        output: TypeKey,
        #[source]
        source: InstantiateErrorKind,
    },
    MismatchedArgument {
        output: TypeKey,
        #[source]
        source: ArgumentErrorKind,
    },
    IncorrectType {
        expected: TypeKey,
        actual: TypeId,
    },
}

impl Display for MakeErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            MakeErrorKind::MissingDependency { missing, chain } => {
                write!(f, "no entry registered for `{missing}`")?;
                if !chain.is_empty() {
                    write!(f, " (required via {chain})")?;
                }
                Ok(())
            }
            MakeErrorKind::CyclicDependency { cycle } => {
                write!(f, "cyclic dependency detected: {cycle}")
            }
            MakeErrorKind::ConstructorFailure { output, source } => {
                write!(f, "constructor for `{output}` failed: {source}")
            }
            MakeErrorKind::MismatchedArgument { output, source } => {
                write!(f, "constructor for `{output}`: {source}")
            }
            MakeErrorKind::IncorrectType { expected, actual } => {
                write!(f, "entry for `{expected}` produced a value of a different runtime type ({actual:?})")
            }
        }
    }
}
