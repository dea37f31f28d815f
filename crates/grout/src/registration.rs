//! Stored registrations and the resolution algorithm.
//!
//! A [`RegistrationEntry`] is the recipe the container keeps per concrete
//! type: the declared dependency list, pinned kwargs, the provision mode, and
//! the factory or constructor that produces instances. The typed
//! [`Registration`] handle returned by [`Container::register`](crate::Container::register)
//! is the configuration surface over that entry.

use std::marker::PhantomData;
use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::args::Args;
use crate::errors::{RegistrationError, ResolutionError};
use crate::types::{CastFn, Dependency, ErasedArg, ErasedInstance, Injectable, TypeInfo};
use crate::Container;

pub(crate) type FactoryFn =
    Arc<dyn Fn(&mut Args) -> Result<ErasedInstance, ResolutionError> + Send + Sync>;
pub(crate) type ConstructFn = fn(&mut Args) -> Result<ErasedInstance, ResolutionError>;

/// How a registration supplies values.
///
/// `Default` builds per call, `Instance` is a pinned singleton, `Transient`
/// is the explicit never-cached mode that still honors pinned kwargs and
/// factories.
#[derive(Clone)]
pub(crate) enum Provided {
    Default,
    Instance(ErasedInstance),
    Transient,
}

impl Provided {
    fn mode(&self) -> ProvisionMode {
        match self {
            Provided::Default => ProvisionMode::Constructed,
            Provided::Instance(_) => ProvisionMode::Instance,
            Provided::Transient => ProvisionMode::Transient,
        }
    }
}

/// Provision mode as reported by [`Container::snapshot`](crate::Container::snapshot).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProvisionMode {
    Constructed,
    Instance,
    Transient,
}

/// One registration as reported by [`Container::snapshot`](crate::Container::snapshot).
#[derive(Debug, Clone, Serialize)]
pub struct RegistrationSnapshot {
    pub type_name: &'static str,
    pub mode: ProvisionMode,
    pub aliases: Vec<&'static str>,
    pub pinned_args: Vec<String>,
    pub dependencies: Vec<&'static str>,
}

#[derive(Clone)]
pub(crate) struct RegistrationEntry {
    pub(crate) ty: TypeInfo,
    pub(crate) dependencies: Vec<Dependency>,
    pub(crate) kwargs: Args,
    pub(crate) provided: Provided,
    pub(crate) factory: Option<FactoryFn>,
    construct: ConstructFn,
    pub(crate) self_cast: CastFn,
    pub(crate) aliases: Vec<TypeInfo>,
}

impl RegistrationEntry {
    pub(crate) fn new<T: Injectable>() -> Self {
        Self {
            ty: TypeInfo::of::<T>(),
            dependencies: T::dependencies(),
            kwargs: Args::new(),
            provided: Provided::Default,
            factory: None,
            construct: |args| T::construct(args).map(|value| Arc::new(value) as ErasedInstance),
            self_cast: |instance| match instance.downcast::<T>() {
                Ok(concrete) => Ok(Arc::new(concrete) as ErasedArg),
                Err(_) => Err(ResolutionError::ViewMismatch {
                    type_name: std::any::type_name::<T>(),
                }),
            },
            aliases: Vec::new(),
        }
    }

    /// The core resolution algorithm.
    ///
    /// A pinned instance short-circuits (and rejects overrides). Otherwise the
    /// declared dependency list is walked in order with strict precedence per
    /// parameter: call-site override, then pinned kwarg, then declared
    /// default, then recursive resolution of the parameter's type. The
    /// resolved set then feeds the factory if one is set, else the declared
    /// constructor. Nothing is cached: only `Provided::Instance` shares.
    pub(crate) fn resolve(
        &self,
        container: &Container,
        overrides: &Args,
        stack: &mut Vec<TypeInfo>,
    ) -> Result<ErasedInstance, ResolutionError> {
        if let Provided::Instance(instance) = &self.provided {
            if !overrides.is_empty() {
                return Err(ResolutionError::InstanceProvided {
                    type_name: self.ty.name(),
                });
            }
            return Ok(instance.clone());
        }

        let mut resolved = Args::new();
        for dependency in &self.dependencies {
            let value = if let Some(value) = overrides.get_erased(dependency.name()) {
                value.clone()
            } else if let Some(value) = self.kwargs.get_erased(dependency.name()) {
                value.clone()
            } else if let Some(value) = dependency.default_value() {
                value
            } else {
                // The dependency-injection step: no overrides travel down.
                container.resolve_view(dependency.ty(), &Args::new(), stack)?
            };
            resolved.insert_erased(dependency.name(), value);
        }

        match &self.factory {
            Some(factory) => factory(&mut resolved),
            None => (self.construct)(&mut resolved),
        }
    }

    pub(crate) fn snapshot(&self) -> RegistrationSnapshot {
        let mut aliases: Vec<&'static str> =
            self.aliases.iter().map(TypeInfo::name).collect();
        aliases.sort_unstable();

        let mut pinned_args: Vec<String> =
            self.kwargs.names().iter().map(|name| (*name).to_string()).collect();
        pinned_args.sort_unstable();

        RegistrationSnapshot {
            type_name: self.ty.name(),
            mode: self.provided.mode(),
            aliases,
            pinned_args,
            dependencies: self.dependencies.iter().map(Dependency::name).collect(),
        }
    }
}

/// Typed configuration handle returned by [`Container::register`](crate::Container::register).
///
/// Methods chain and mutate the stored entry; the registration is expected to
/// be fully configured before its first resolve.
pub struct Registration<'c, T: Injectable> {
    container: &'c Container,
    _marker: PhantomData<fn() -> T>,
}

impl<'c, T: Injectable> Registration<'c, T> {
    pub(crate) fn new(container: &'c Container) -> Self {
        Self {
            container,
            _marker: PhantomData,
        }
    }

    /// Register interface `A` as resolvable to this registration's type.
    ///
    /// `A` must appear in `T`'s declared capability set and must not already
    /// be registered, as either a type or an alias.
    pub fn with_alias<A: ?Sized + Send + Sync + 'static>(self) -> Result<Self, RegistrationError> {
        self.container.bind_alias::<T, A>()?;
        Ok(self)
    }

    /// Pin named constructor arguments, merging with any already pinned.
    pub fn with_kwargs(self, args: Args) -> Result<Self, RegistrationError> {
        self.container.configure::<T>(move |entry| {
            if matches!(entry.provided, Provided::Instance(_)) {
                return Err(RegistrationError::Conflict {
                    type_name: entry.ty.name(),
                    reason: "cannot pin kwargs when an instance is provided",
                });
            }
            entry.kwargs.merge(args);
            Ok(())
        })?;
        Ok(self)
    }

    /// Pin a fixed instance, returned on every resolution.
    pub fn with_instance(self, instance: T) -> Result<Self, RegistrationError> {
        self.container.configure::<T>(move |entry| {
            if !entry.kwargs.is_empty() {
                return Err(RegistrationError::Conflict {
                    type_name: entry.ty.name(),
                    reason: "cannot provide an instance when kwargs are pinned",
                });
            }
            if entry.factory.is_some() {
                return Err(RegistrationError::Conflict {
                    type_name: entry.ty.name(),
                    reason: "cannot provide an instance when a factory is set",
                });
            }
            if matches!(entry.provided, Provided::Transient) {
                return Err(RegistrationError::Conflict {
                    type_name: entry.ty.name(),
                    reason: "cannot provide an instance for a transient registration",
                });
            }
            debug!("Pinned instance for {}", entry.ty.name());
            entry.provided = Provided::Instance(Arc::new(instance));
            Ok(())
        })?;
        Ok(self)
    }

    /// Produce instances through `factory` instead of the declared
    /// constructor. The factory receives the same resolved argument set.
    pub fn with_factory<F>(self, factory: F) -> Result<Self, RegistrationError>
    where
        F: Fn(&mut Args) -> Result<T, ResolutionError> + Send + Sync + 'static,
    {
        self.container.configure::<T>(move |entry| {
            if matches!(entry.provided, Provided::Instance(_)) {
                return Err(RegistrationError::Conflict {
                    type_name: entry.ty.name(),
                    reason: "cannot set a factory when an instance is provided",
                });
            }
            entry.factory = Some(Arc::new(move |args| {
                factory(args).map(|value| Arc::new(value) as ErasedInstance)
            }));
            Ok(())
        })?;
        Ok(self)
    }

    /// Mark the registration as rebuild-on-every-resolve.
    ///
    /// Combines freely with pinned kwargs and factories; only a pinned
    /// instance conflicts with it.
    pub fn transient(self) -> Result<Self, RegistrationError> {
        self.container.configure::<T>(|entry| {
            if matches!(entry.provided, Provided::Instance(_)) {
                return Err(RegistrationError::Conflict {
                    type_name: entry.ty.name(),
                    reason: "cannot mark transient when an instance is provided",
                });
            }
            entry.provided = Provided::Transient;
            Ok(())
        })?;
        Ok(self)
    }
}
