//! Type identity and the declared metadata that drives resolution.
//!
//! The container never inspects types at runtime. Instead, every registrable
//! type implements [`Injectable`] and declares, once, the two pieces of
//! metadata the container needs: its ordered constructor parameter list
//! ([`Dependency`]) and the set of interfaces it may be resolved as
//! ([`CapabilityDecl`]). The container treats both as opaque.

use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

use crate::args::Args;
use crate::errors::ResolutionError;

/// A constructed instance with its concrete type erased.
///
/// Always holds the concrete `T` itself; `Arc::downcast` recovers it.
pub type ErasedInstance = Arc<dyn Any + Send + Sync>;

/// An erased argument or resolved view.
///
/// Always holds an `Arc<V>` (where `V` may be unsized), so trait-object views
/// and plain values share one representation.
pub type ErasedArg = Arc<dyn Any + Send + Sync>;

/// Upcast from a concrete instance to the view a requested type expects.
pub type CastFn = fn(ErasedInstance) -> Result<ErasedArg, ResolutionError>;

type DefaultFn = Arc<dyn Fn() -> ErasedArg + Send + Sync>;

/// Type identity as the container tracks it: the `TypeId` key plus the
/// human-readable name used in errors and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeInfo {
    id: TypeId,
    name: &'static str,
}

impl TypeInfo {
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl fmt::Display for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// One declared constructor parameter: a name, the type to resolve when
/// nothing else supplies a value, and optionally a default.
#[derive(Clone)]
pub struct Dependency {
    name: &'static str,
    ty: TypeInfo,
    default: Option<DefaultFn>,
}

impl Dependency {
    /// A parameter with no default: satisfied by an override, a pinned kwarg,
    /// or recursive resolution of `V`. `V` may be a trait object.
    pub fn required<V: ?Sized + Send + Sync + 'static>(name: &'static str) -> Self {
        Self {
            name,
            ty: TypeInfo::of::<V>(),
            default: None,
        }
    }

    /// A parameter with a declared default, used when neither an override nor
    /// a pinned kwarg names it.
    pub fn with_default<V, F>(name: &'static str, default: F) -> Self
    where
        V: Send + Sync + 'static,
        F: Fn() -> V + Send + Sync + 'static,
    {
        Self {
            name,
            ty: TypeInfo::of::<V>(),
            default: Some(Arc::new(move || Arc::new(Arc::new(default())) as ErasedArg)),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn ty(&self) -> TypeInfo {
        self.ty
    }

    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }

    pub(crate) fn default_value(&self) -> Option<ErasedArg> {
        self.default.as_ref().map(|default| default())
    }
}

impl fmt::Debug for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dependency")
            .field("name", &self.name)
            .field("ty", &self.ty.name())
            .field("has_default", &self.has_default())
            .finish()
    }
}

/// A declared ability of a concrete type to be resolved as an interface.
///
/// Built with the [`capability!`](crate::capability) macro, which generates
/// the `Arc<Concrete> -> Arc<dyn Interface>` upcast; alias registration
/// validates against the declared set instead of inspecting a type hierarchy.
#[derive(Debug, Clone, Copy)]
pub struct CapabilityDecl {
    pub ty: TypeInfo,
    pub cast: CastFn,
}

/// Implemented by every type the container can produce.
///
/// The three methods are the type's self-description: what its constructor
/// takes, which interfaces it satisfies, and how to build it from a resolved
/// argument set. Leaf types only implement `construct`.
pub trait Injectable: Send + Sync + 'static {
    /// Ordered constructor parameter list. Resolution walks it in declaration
    /// order.
    fn dependencies() -> Vec<Dependency> {
        Vec::new()
    }

    /// Interfaces this type declares itself resolvable as.
    fn capabilities() -> Vec<CapabilityDecl> {
        Vec::new()
    }

    /// Build an instance from a fully-resolved argument set.
    fn construct(args: &mut Args) -> Result<Self, ResolutionError>
    where
        Self: Sized;
}
