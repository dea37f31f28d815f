//! # Container Usage Guide
//!
//! The container wires an application's object graph during startup: register
//! every type once, configure each registration through its handle, then
//! resolve the root type and hand it to the host.
//!
//! ## Declaring a type
//!
//! A registrable type implements [`Injectable`](crate::Injectable): its
//! ordered constructor parameter list, the interfaces it may be resolved as,
//! and how to build it from a resolved argument set.
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use grout::{capability, Args, CapabilityDecl, Dependency, Injectable, ResolutionError};
//!
//! trait Mesh: Send + Sync {
//!     fn vertices(&self) -> &[Vertex];
//! }
//!
//! struct Capsule {
//!     vertices: Vec<Vertex>,
//! }
//!
//! impl Injectable for Capsule {
//!     fn dependencies() -> Vec<Dependency> {
//!         vec![
//!             Dependency::required::<u32>("height"),
//!             Dependency::required::<u32>("width"),
//!             Dependency::required::<u32>("depth"),
//!         ]
//!     }
//!
//!     fn capabilities() -> Vec<CapabilityDecl> {
//!         vec![capability!(Capsule => dyn Mesh)]
//!     }
//!
//!     fn construct(args: &mut Args) -> Result<Self, ResolutionError> {
//!         let height: u32 = args.get("height")?;
//!         let width: u32 = args.get("width")?;
//!         let depth: u32 = args.get("depth")?;
//!         Ok(Self::with_size(height, width, depth))
//!     }
//! }
//! ```
//!
//! ## Registering and resolving
//!
//! ```rust,ignore
//! let container = Container::new();
//! container
//!     .register::<Capsule>()?
//!     .with_kwargs(args! { "height" => 2u32, "width" => 2u32, "depth" => 2u32 })?
//!     .with_alias::<dyn Mesh>()?;
//!
//! // Both the concrete type and the alias resolve to the same recipe.
//! let capsule: Arc<Capsule> = container.resolve::<Capsule>()?;
//! let mesh: Arc<dyn Mesh> = container.resolve::<dyn Mesh>()?;
//! ```
//!
//! ## Override precedence
//!
//! Per parameter, the first of these four that applies wins:
//!
//! 1. a call-site override passed to `resolve_with`;
//! 2. a kwarg pinned at registration time with `with_kwargs`;
//! 3. the parameter's declared default;
//! 4. recursive resolution of the parameter's declared type.
//!
//! ```rust,ignore
//! container
//!     .register::<Herb>()?
//!     .with_kwargs(args! { "name" => "oregano".to_string() })?;
//!
//! let herb = container.resolve_with::<Herb>(args! { "name" => "parsley".to_string() })?;
//! assert_eq!(herb.name, "parsley");
//! ```
//!
//! Overrides never travel down to recursively resolved dependencies.
//!
//! ## Pinned instances
//!
//! `with_instance` pins a pre-built value that every resolution shares. A
//! pinned instance rejects call-site overrides and cannot be combined with
//! pinned kwargs or a factory.
//!
//! ```rust,ignore
//! let camera = Camera::default();
//! container.register::<Camera>()?.with_instance(camera)?;
//!
//! let first = container.resolve::<Camera>()?;
//! let second = container.resolve::<Camera>()?;
//! assert!(Arc::ptr_eq(&first, &second));
//! ```
//!
//! ## Factories and transients
//!
//! A factory replaces the declared constructor and receives the same resolved
//! argument set. `transient()` marks a registration as rebuild-on-every-
//! resolve; unlike a pinned instance it combines freely with kwargs and
//! factories.
//!
//! ```rust,ignore
//! container
//!     .register::<StatusLine>()?
//!     .transient()?
//!     .with_factory(|args| StatusLine::from_args(args))?;
//! ```
//!
//! ## Removal
//!
//! Removal is symmetric and total: removing a type drops all of its aliases,
//! and removing an alias drops the type it points to together with every
//! sibling alias. Useful for tests and hot-reload style re-registration.
//!
//! ```rust,ignore
//! container.remove::<Capsule>()?;
//! assert!(!container.contains::<Capsule>());
//! assert!(!container.contains::<dyn Mesh>());
//! ```
//!
//! ## Wiring with providers
//!
//! Subsystems contribute registrations through
//! [`Provider`](crate::Provider)s collected in a
//! [`ProviderSet`](crate::ProviderSet); see the [`provider`](crate::provider)
//! module.
