mod instantiate;
mod instantiator;
mod make;
mod registry;

pub use instantiate::InstantiateErrorKind;
pub use instantiator::ArgumentErrorKind;
pub(crate) use instantiator::InstantiatorErrorKind;
pub use make::{DependencyChain, MakeErrorKind};
pub use registry::RegistryErrorKind;
