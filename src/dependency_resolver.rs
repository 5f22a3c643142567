use std::sync::Arc;

use crate::{
    any::{AnyValue, TypeKey},
    errors::ArgumentErrorKind,
};

/// Extractor for one constructor argument: the resolved, shared instance of `Dep`.
///
/// Two constructors requiring the same dependency type within one `make` call
/// receive clones of the same [`Arc`].
#[derive(Debug)]
pub struct Inject<Dep>(pub Arc<Dep>);

pub trait DependencyResolver: Sized {
    #[must_use]
    fn type_key() -> TypeKey;

    #[must_use]
    fn from_resolved(value: AnyValue) -> Option<Self>;
}

impl<Dep: Send + Sync + 'static> DependencyResolver for Inject<Dep> {
    fn type_key() -> TypeKey {
        TypeKey::of::<Dep>()
    }

    fn from_resolved(value: AnyValue) -> Option<Self> {
        value.downcast().ok().map(Self)
    }
}

/// An ordered sequence of constructor inputs. Implemented for tuples of
/// [`DependencyResolver`]s, so a constructor's declared input types and its
/// arity always agree.
pub trait DependencyList: Sized {
    #[must_use]
    fn type_keys() -> Vec<TypeKey>;

    fn from_resolved(values: &[AnyValue]) -> Result<Self, ArgumentErrorKind>;
}

macro_rules! impl_dependency_list {
    (
        [$($ty:ident),*]
    ) => {
        #[allow(non_snake_case, unused_variables, unused_mut, unused_assignments)]
        impl<$($ty,)*> DependencyList for ($($ty,)*)
        where
            $( $ty: DependencyResolver, )*
        {
            fn type_keys() -> Vec<TypeKey> {
                vec![$($ty::type_key(),)*]
            }

            fn from_resolved(values: &[AnyValue]) -> Result<Self, ArgumentErrorKind> {
                let mut values = values.iter();
                let mut position = 0usize;
                $(
                    let $ty = match values.next().and_then(|value| $ty::from_resolved(value.clone())) {
                        Some(dependency) => dependency,
                        None => return Err(ArgumentErrorKind { position, expected: $ty::type_key() }),
                    };
                    position += 1;
                )*
                Ok(($($ty,)*))
            }
        }
    };
}

all_the_tuples!(impl_dependency_list);
