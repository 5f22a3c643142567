use std::sync::Arc;
use tracing::debug;

use crate::{
    any::AnyValue,
    dependency_resolver::{DependencyList, DependencyResolver},
    errors::{ArgumentErrorKind, InstantiateErrorKind, InstantiatorErrorKind},
    service::{service_fn, BoxCloneService},
};

/// A constructor: produces one value of `Provides` from the resolved `Deps`.
///
/// Implemented for closures taking [`Inject`](crate::Inject) arguments and
/// returning a `Result`, so registering `|Inject(port): Inject<Port>| Ok(...)`
/// is enough. Infallible constructors are adapted with [`lift`](crate::lift).
pub trait Instantiator<Deps>: Clone + 'static
where
    Deps: DependencyList,
{
    type Provides: Send + Sync + 'static;
    type Error: Into<InstantiateErrorKind>;

    fn instantiate(&mut self, dependencies: Deps) -> Result<Self::Provides, Self::Error>;
}

pub(crate) type Arguments = Vec<AnyValue>;

pub(crate) type BoxCloneConstructor = BoxCloneService<Arguments, AnyValue, InstantiatorErrorKind<ArgumentErrorKind, InstantiateErrorKind>>;

#[must_use]
pub(crate) fn boxed_constructor<Inst, Deps>(instantiator: Inst) -> BoxCloneConstructor
where
    Inst: Instantiator<Deps> + Send + Sync,
    Deps: DependencyList,
{
    BoxCloneService(Box::new(service_fn({
        move |arguments: Arguments| {
            let dependencies = match Deps::from_resolved(&arguments) {
                Ok(dependencies) => dependencies,
                Err(err) => return Err(InstantiatorErrorKind::Deps(err)),
            };
            let dependency = match instantiator.clone().instantiate(dependencies) {
                Ok(dependency) => dependency,
                Err(err) => return Err(InstantiatorErrorKind::Factory(err.into())),
            };

            debug!("Constructed");

            Ok(Arc::new(dependency) as AnyValue)
        }
    })))
}

macro_rules! impl_instantiator {
    (
        [$($ty:ident),*]
    ) => {
        #[allow(non_snake_case)]
        impl<F, Response, Err, $($ty,)*> Instantiator<($($ty,)*)> for F
        where
            F: FnMut($($ty,)*) -> Result<Response, Err> + Clone + 'static,
            Response: Send + Sync + 'static,
            Err: Into<InstantiateErrorKind>,
            $( $ty: DependencyResolver, )*
        {
            type Provides = Response;
            type Error = Err;

            fn instantiate(&mut self, ($($ty,)*): ($($ty,)*)) -> Result<Self::Provides, Self::Error> {
                self($($ty,)*)
            }
        }
    };
}

all_the_tuples!(impl_instantiator);
