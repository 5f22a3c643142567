use crate::any::TypeKey;

#[derive(thiserror::Error, Debug)]
pub(crate) enum InstantiatorErrorKind<DepsErr, FactoryErr> {
    #[error(transparent)]
    Deps(DepsErr),
    #[error(transparent)]
    Factory(FactoryErr),
}

/// A resolved argument did not downcast to the type the constructor declared.
/// The resolver supplies arguments in declared input order, so hitting this
/// means an entry produced a value of the wrong runtime type.
#[derive(thiserror::Error, Debug)]
#[error("argument {position} has a wrong runtime type, expected `{expected}`")]
pub struct ArgumentErrorKind {
    pub position: usize,
    pub expected: TypeKey,
}
