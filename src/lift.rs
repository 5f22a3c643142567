//! Adapters bringing pure values and pure constructor functions into the
//! uniform fallible construction interface, so they can be registered next to
//! constructors that allocate resources and may fail.

use crate::{
    dependency_resolver::{DependencyList, DependencyResolver},
    errors::InstantiateErrorKind,
    instantiator::Instantiator,
};

/// Wrapper to create a constructor that just returns the passed value.
/// It can be used when the value was created outside the registry.
#[inline]
#[must_use]
pub const fn instance<T: Clone + Send + Sync + 'static>(
    val: T,
) -> impl Instantiator<(), Provides = T, Error = InstantiateErrorKind> {
    move || Ok(val.clone())
}

/// A constructor that cannot fail: a plain function from resolved inputs to
/// the output value.
pub trait PureInstantiator<Deps>: Clone + 'static
where
    Deps: DependencyList,
{
    type Provides: Send + Sync + 'static;

    fn construct(&mut self, dependencies: Deps) -> Self::Provides;
}

macro_rules! impl_pure_instantiator {
    (
        [$($ty:ident),*]
    ) => {
        #[allow(non_snake_case)]
        impl<F, Response, $($ty,)*> PureInstantiator<($($ty,)*)> for F
        where
            F: FnMut($($ty,)*) -> Response + Clone + 'static,
            Response: Send + Sync + 'static,
            $( $ty: DependencyResolver, )*
        {
            type Provides = Response;

            fn construct(&mut self, ($($ty,)*): ($($ty,)*)) -> Self::Provides {
                self($($ty,)*)
            }
        }
    };
}

all_the_tuples!(impl_pure_instantiator);

/// Lifts a pure constructor into the fallible [`Instantiator`] interface.
#[inline]
#[must_use]
pub fn lift<F>(constructor: F) -> Lifted<F> {
    Lifted { inner: constructor }
}

#[derive(Clone)]
pub struct Lifted<F> {
    inner: F,
}

impl<F, Deps> Instantiator<Deps> for Lifted<F>
where
    F: PureInstantiator<Deps>,
    Deps: DependencyList,
{
    type Provides = F::Provides;
    type Error = InstantiateErrorKind;

    fn instantiate(&mut self, dependencies: Deps) -> Result<Self::Provides, Self::Error> {
        Ok(self.inner.construct(dependencies))
    }
}
