//! Error taxonomy for the container.
//!
//! Three kinds, matching the three phases a container call can be in:
//! [`RegistrationError`] for configuration-time violations, [`ResolutionError`]
//! for failures while producing an instance, and [`RemovalError`] for removal
//! of something that was never registered. All of them surface immediately at
//! the call that violated the contract; the container never retries and a
//! failed registration leaves it unchanged.

use thiserror::Error;

/// Registration-time failures.
///
/// Two invariants are compile-time guarantees and have no variants here: a
/// pinned instance always has the target type (`with_instance` takes `T` by
/// value), and a factory's return type always equals the target type
/// (`with_factory` is generic over `Fn(..) -> Result<T, _>`).
#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error("type {type_name} is already registered")]
    Duplicate { type_name: &'static str },

    #[error("type {type_name} is already registered as an alias")]
    DuplicateAlias { type_name: &'static str },

    #[error("alias {alias} is already registered")]
    AliasInUse { alias: &'static str },

    #[error("failed to register alias {alias}: {type_name} does not declare that capability")]
    UndeclaredCapability {
        type_name: &'static str,
        alias: &'static str,
    },

    /// Mutually exclusive configuration, e.g. pinning kwargs on a registration
    /// that already carries a fixed instance.
    #[error("invalid configuration for {type_name}: {reason}")]
    Conflict {
        type_name: &'static str,
        reason: &'static str,
    },

    /// A configuration handle outlived its registration (the type was removed
    /// between `register` and the chained call).
    #[error("no registration found for {type_name}")]
    NoSuchRegistration { type_name: &'static str },
}

/// Failures while producing an instance.
#[derive(Debug, Error)]
pub enum ResolutionError {
    #[error("type {type_name} is not registered")]
    NotRegistered { type_name: &'static str },

    #[error("{alias} resolved to {target}, which is not registered")]
    AliasTargetMissing {
        alias: &'static str,
        target: &'static str,
    },

    #[error("an instance of {type_name} is already provided, cannot override")]
    InstanceProvided { type_name: &'static str },

    #[error("missing argument '{name}' (expected {expected})")]
    MissingArgument { name: String, expected: &'static str },

    #[error("argument '{name}' is not a {expected}")]
    ArgumentType { name: String, expected: &'static str },

    #[error("dependency cycle: {chain}")]
    Cycle { chain: String },

    /// A resolved value failed to downcast to the requested view. Reachable
    /// only when a capability declaration names the wrong concrete type.
    #[error("resolved value for {type_name} has an unexpected concrete type")]
    ViewMismatch { type_name: &'static str },
}

/// Removal of a type or alias that is not currently registered.
#[derive(Debug, Error)]
pub enum RemovalError {
    #[error("type {type_name} is not registered")]
    NotRegistered { type_name: &'static str },
}

/// Umbrella error for code that mixes phases, such as providers and startup
/// wiring. Each phase-specific error converts into it with `?`.
#[derive(Debug, Error)]
pub enum DiError {
    #[error(transparent)]
    Registration(#[from] RegistrationError),

    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    #[error(transparent)]
    Removal(#[from] RemovalError),
}

pub type DiResult<T> = Result<T, DiError>;
