//! Runtime dependency injection container.
//!
//! `grout` wires an application's object graph at startup: types register
//! themselves with their declared constructor dependencies, and the container
//! resolves a requested type by recursively satisfying those dependencies.
//! Interface aliasing, pinned singleton instances, factory functions, pinned
//! named arguments and call-site overrides are all supported; the name comes
//! from what holds tiles together.
//!
//! ## Quick Start
//!
//! ```rust
//! use grout::{Args, Container, Dependency, Injectable, ResolutionError};
//!
//! struct Greeter {
//!     greeting: String,
//! }
//!
//! impl Injectable for Greeter {
//!     fn dependencies() -> Vec<Dependency> {
//!         vec![Dependency::with_default::<String, _>("greeting", || {
//!             "hello".to_string()
//!         })]
//!     }
//!
//!     fn construct(args: &mut Args) -> Result<Self, ResolutionError> {
//!         Ok(Self {
//!             greeting: args.get("greeting")?,
//!         })
//!     }
//! }
//!
//! let container = Container::new();
//! container.register::<Greeter>().unwrap();
//!
//! let greeter = container.resolve::<Greeter>().unwrap();
//! assert_eq!(greeter.greeting, "hello");
//!
//! let loud = container
//!     .resolve_with::<Greeter>(Args::new().with("greeting", "HELLO".to_string()))
//!     .unwrap();
//! assert_eq!(loud.greeting, "HELLO");
//! ```
//!
//! See the [`usage`] module for the full walkthrough: aliasing, factories,
//! transients, and provider-based wiring.

mod args;
mod errors;
mod registration;
mod types;

pub mod provider;
pub mod usage;

use std::any::TypeId;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};

use tracing::{debug, info};

pub use args::Args;
pub use errors::{DiError, DiResult, RegistrationError, RemovalError, ResolutionError};
pub use provider::{Provider, ProviderSet};
pub use registration::{ProvisionMode, Registration, RegistrationSnapshot};
pub use types::{
    CapabilityDecl, CastFn, Dependency, ErasedArg, ErasedInstance, Injectable, TypeInfo,
};

use registration::RegistrationEntry;

/// One alias binding: the concrete target plus the upcast producing the
/// aliased view of its instances.
#[derive(Clone, Copy)]
struct AliasBinding {
    target: TypeInfo,
    cast: CastFn,
}

#[derive(Default)]
struct RegistryState {
    registrations: HashMap<TypeId, RegistrationEntry>,
    aliases: HashMap<TypeId, AliasBinding>,
}

impl RegistryState {
    /// Follow alias indirection from `requested` to a concrete entry,
    /// returning the concrete identity, the view cast for the requested type,
    /// and a copy of the entry.
    fn locate(
        &self,
        requested: TypeInfo,
    ) -> Result<(TypeInfo, CastFn, RegistrationEntry), ResolutionError> {
        if let Some(entry) = self.registrations.get(&requested.id()) {
            return Ok((requested, entry.self_cast, entry.clone()));
        }

        if let Some(binding) = self.aliases.get(&requested.id()) {
            let mut target = binding.target;
            loop {
                if let Some(entry) = self.registrations.get(&target.id()) {
                    return Ok((target, binding.cast, entry.clone()));
                }
                match self.aliases.get(&target.id()) {
                    Some(next) => target = next.target,
                    None => {
                        return Err(ResolutionError::AliasTargetMissing {
                            alias: requested.name(),
                            target: target.name(),
                        })
                    }
                }
            }
        }

        Err(ResolutionError::NotRegistered {
            type_name: requested.name(),
        })
    }

    fn remove_registration(&mut self, target: TypeInfo) {
        debug!("Removing registration for {}", target.name());
        if let Some(entry) = self.registrations.remove(&target.id()) {
            for alias in &entry.aliases {
                debug!("Removing alias {}", alias.name());
                self.aliases.remove(&alias.id());
            }
        }
    }
}

/// The dependency injection container.
///
/// Holds one registration per concrete type plus an alias index. Mutation
/// (register, configure, remove) happens during startup wiring; resolution
/// only reads, copying the entry out of the lock before recursing, so
/// concurrent resolves and factories that re-enter the container are safe.
pub struct Container {
    state: RwLock<RegistryState>,
}

impl Container {
    /// Create a new empty container.
    pub fn new() -> Self {
        Self {
            state: RwLock::new(RegistryState::default()),
        }
    }

    /// Register `T` and return its configuration handle.
    ///
    /// Fails if `T` is already registered, as either a type or an alias.
    pub fn register<T: Injectable>(&self) -> Result<Registration<'_, T>, RegistrationError> {
        let ty = TypeInfo::of::<T>();
        let mut state = self.state.write().unwrap();

        if state.registrations.contains_key(&ty.id()) {
            return Err(RegistrationError::Duplicate {
                type_name: ty.name(),
            });
        }
        if state.aliases.contains_key(&ty.id()) {
            return Err(RegistrationError::DuplicateAlias {
                type_name: ty.name(),
            });
        }

        state.registrations.insert(ty.id(), RegistrationEntry::new::<T>());
        debug!("Registered type: {}", ty.name());
        Ok(Registration::new(self))
    }

    /// Resolve an instance of `T`, which may be a registered concrete type or
    /// a registered alias (trait object).
    pub fn resolve<T>(&self) -> Result<Arc<T>, ResolutionError>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.resolve_with(Args::new())
    }

    /// Resolve an instance of `T` with call-site overrides.
    ///
    /// Overrides take precedence over pinned kwargs and declared defaults;
    /// they do not travel down to recursively resolved dependencies.
    pub fn resolve_with<T>(&self, overrides: Args) -> Result<Arc<T>, ResolutionError>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        let ty = TypeInfo::of::<T>();
        let mut stack = Vec::new();
        let view = self.resolve_view(ty, &overrides, &mut stack)?;
        view.downcast_ref::<Arc<T>>()
            .cloned()
            .ok_or(ResolutionError::ViewMismatch {
                type_name: ty.name(),
            })
    }

    /// Remove a concrete type and all of its aliases; given an alias, remove
    /// the concrete type it points to and all sibling aliases. Removal is
    /// total, never partial.
    pub fn remove<T: ?Sized + 'static>(&self) -> Result<(), RemovalError> {
        let ty = TypeInfo::of::<T>();
        let mut state = self.state.write().unwrap();

        let target = if state.registrations.contains_key(&ty.id()) {
            ty
        } else if let Some(binding) = state.aliases.get(&ty.id()) {
            binding.target
        } else {
            return Err(RemovalError::NotRegistered {
                type_name: ty.name(),
            });
        };

        state.remove_registration(target);
        Ok(())
    }

    /// True if `T` is a registered concrete type or a known alias.
    pub fn contains<T: ?Sized + 'static>(&self) -> bool {
        let id = TypeId::of::<T>();
        let state = self.state.read().unwrap();
        state.registrations.contains_key(&id) || state.aliases.contains_key(&id)
    }

    /// Number of concrete registrations (aliases not counted).
    pub fn registration_count(&self) -> usize {
        self.state.read().unwrap().registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registration_count() == 0
    }

    /// Drop every registration and alias.
    pub fn clear(&self) {
        let mut state = self.state.write().unwrap();
        state.registrations.clear();
        state.aliases.clear();
        info!("Cleared all registrations from container");
    }

    /// Serializable inventory of the container's contents, sorted by type
    /// name. A diagnostics surface: handy in logs and test assertions.
    pub fn snapshot(&self) -> Vec<RegistrationSnapshot> {
        let state = self.state.read().unwrap();
        let mut entries: Vec<_> = state
            .registrations
            .values()
            .map(RegistrationEntry::snapshot)
            .collect();
        entries.sort_by_key(|snapshot| snapshot.type_name);
        entries
    }

    /// Resolve `requested` (following alias indirection) to an erased view.
    ///
    /// `stack` is the in-progress resolution chain; re-entering a type that
    /// is already on it is a dependency cycle and fails fast instead of
    /// recursing without bound.
    pub(crate) fn resolve_view(
        &self,
        requested: TypeInfo,
        overrides: &Args,
        stack: &mut Vec<TypeInfo>,
    ) -> Result<ErasedArg, ResolutionError> {
        // Copy the entry out under the read lock; recursion below must not
        // hold it.
        let (target, cast, entry) = {
            let state = self.state.read().unwrap();
            state.locate(requested)?
        };

        if stack.iter().any(|seen| seen.id() == target.id()) {
            let mut chain: Vec<&str> = stack.iter().map(TypeInfo::name).collect();
            chain.push(target.name());
            return Err(ResolutionError::Cycle {
                chain: chain.join(" -> "),
            });
        }

        stack.push(target);
        let instance = entry.resolve(self, overrides, stack);
        stack.pop();

        cast(instance?)
    }

    /// Bind alias `A` to concrete `T`, validating against `T`'s declared
    /// capability set.
    pub(crate) fn bind_alias<T, A>(&self) -> Result<(), RegistrationError>
    where
        T: Injectable,
        A: ?Sized + Send + Sync + 'static,
    {
        let concrete = TypeInfo::of::<T>();
        let alias = TypeInfo::of::<A>();

        let declared = T::capabilities()
            .into_iter()
            .find(|capability| capability.ty.id() == alias.id())
            .ok_or(RegistrationError::UndeclaredCapability {
                type_name: concrete.name(),
                alias: alias.name(),
            })?;

        let mut state = self.state.write().unwrap();
        if state.registrations.contains_key(&alias.id()) || state.aliases.contains_key(&alias.id())
        {
            return Err(RegistrationError::AliasInUse {
                alias: alias.name(),
            });
        }

        let entry = state
            .registrations
            .get_mut(&concrete.id())
            .ok_or(RegistrationError::NoSuchRegistration {
                type_name: concrete.name(),
            })?;
        entry.aliases.push(alias);

        state.aliases.insert(
            alias.id(),
            AliasBinding {
                target: concrete,
                cast: declared.cast,
            },
        );
        debug!("Registered alias {} -> {}", alias.name(), concrete.name());
        Ok(())
    }

    /// Apply a configuration mutation to `T`'s stored entry.
    pub(crate) fn configure<T: Injectable>(
        &self,
        apply: impl FnOnce(&mut RegistrationEntry) -> Result<(), RegistrationError>,
    ) -> Result<(), RegistrationError> {
        let ty = TypeInfo::of::<T>();
        let mut state = self.state.write().unwrap();
        let entry = state
            .registrations
            .get_mut(&ty.id())
            .ok_or(RegistrationError::NoSuchRegistration {
                type_name: ty.name(),
            })?;
        apply(entry)
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.read().unwrap();
        let mut map = f.debug_struct("Container");
        for entry in state.registrations.values() {
            map.field(entry.ty.name(), &entry.aliases.len());
        }
        map.finish()
    }
}

/// Declares that a concrete type can be resolved as a trait object.
///
/// Expands to a [`CapabilityDecl`] pairing the interface's identity with the
/// `Arc<Concrete> -> Arc<dyn Interface>` upcast. The interface must be
/// `Send + Sync + 'static`.
///
/// ```rust,ignore
/// fn capabilities() -> Vec<CapabilityDecl> {
///     vec![capability!(Capsule => dyn Mesh)]
/// }
/// ```
#[macro_export]
macro_rules! capability {
    ($concrete:ty => $alias:ty) => {
        $crate::CapabilityDecl {
            ty: $crate::TypeInfo::of::<$alias>(),
            cast: |instance| match instance.downcast::<$concrete>() {
                Ok(concrete) => {
                    let view: ::std::sync::Arc<$alias> = concrete;
                    Ok(::std::sync::Arc::new(view) as $crate::ErasedArg)
                }
                Err(_) => Err($crate::ResolutionError::ViewMismatch {
                    type_name: ::std::any::type_name::<$concrete>(),
                }),
            },
        }
    };
}

/// Builds an [`Args`] set from `name => value` pairs.
///
/// ```rust
/// let args = grout::args! { "height" => 2u32, "width" => 2u32 };
/// assert_eq!(args.len(), 2);
/// ```
#[macro_export]
macro_rules! args {
    () => { $crate::Args::new() };
    ($($name:expr => $value:expr),+ $(,)?) => {{
        let mut args = $crate::Args::new();
        $(args.set($name, $value);)+
        args
    }};
}
