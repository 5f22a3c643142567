//! A type-directed dependency resolution engine.
//!
//! A [`Registry`] is an ordered catalogue of entries: already-built values and
//! constructors over other registered types. [`Registry::make`] assembles a
//! fully wired value of the requested type, resolving the transitive
//! dependency graph depth-first, sharing each dependency within one call and
//! reporting missing or cyclic dependencies with the full chain of types that
//! led there. Later entries override earlier ones with the same output type,
//! which is also how test doubles are substituted.
//!
//! ```
//! use std::sync::Arc;
//!
//! use rigging::{Inject, InstantiateErrorKind, Registry};
//!
//! struct Port(u16);
//! struct Connection {
//!     port: u16,
//! }
//! struct Service {
//!     connection: Arc<Connection>,
//! }
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = Registry::new()
//!     .add_value(Port(5432))
//!     .add_constructor(|Inject(port): Inject<Port>| {
//!         Ok::<_, InstantiateErrorKind>(Connection { port: port.0 })
//!     })?
//!     .add_constructor(|Inject(connection): Inject<Connection>| {
//!         Ok::<_, InstantiateErrorKind>(Service { connection })
//!     })?;
//!
//! let service = registry.make::<Service>()?;
//! assert_eq!(service.connection.port, 5432);
//! # Ok(())
//! # }
//! ```
//!
//! Constructors that allocate resources can be bound to a [`Session`] with
//! [`Registry::memoize`], so the underlying construction runs at most once
//! per session no matter how many dependents request it. [`Registry::specialize`]
//! substitutes an entry for one specific top-level target only, and [`Warmup`]
//! runs post-construction checks over the resolved root.

#[macro_use]
mod macros;

mod any;
mod dependency_resolver;
mod entry;
mod errors;
mod instantiator;
mod lift;
mod registry;
mod resolver;
mod service;
mod session;
mod warmup;

pub use any::TypeKey;
pub use dependency_resolver::{DependencyList, DependencyResolver, Inject};
pub use entry::Entry;
pub use errors::{ArgumentErrorKind, DependencyChain, InstantiateErrorKind, MakeErrorKind, RegistryErrorKind};
pub use instantiator::Instantiator;
pub use lift::{instance, lift, Lifted, PureInstantiator};
pub use registry::Registry;
pub use session::Session;
pub use warmup::{Warmup, WarmupOutcome, WarmupReport};
