//! Property-based tests for registration and resolution behavior

use std::sync::Arc;

use grout::{Args, Container, Dependency, Injectable, ResolutionError};
use proptest::prelude::*;

/// Test service for property-based testing
#[derive(Debug, Clone, PartialEq)]
struct TestService {
    value: i32,
    data: Vec<u8>,
}

impl Injectable for TestService {
    fn dependencies() -> Vec<Dependency> {
        vec![
            Dependency::required::<i32>("value"),
            Dependency::required::<Vec<u8>>("data"),
        ]
    }

    fn construct(args: &mut Args) -> Result<Self, ResolutionError> {
        Ok(Self {
            value: args.get("value")?,
            data: args.get("data")?,
        })
    }
}

fn arb_test_service() -> impl Strategy<Value = TestService> {
    (any::<i32>(), prop::collection::vec(any::<u8>(), 0..100))
        .prop_map(|(value, data)| TestService { value, data })
}

fn pinned_args(service: &TestService) -> Args {
    Args::new()
        .with("value", service.value)
        .with("data", service.data.clone())
}

proptest! {
    /// A pinned instance always resolves to the same shared allocation.
    #[test]
    fn pinned_instance_resolution_is_consistent(service in arb_test_service()) {
        let container = Container::new();
        container
            .register::<TestService>()
            .unwrap()
            .with_instance(service.clone())
            .unwrap();

        let resolved1 = container.resolve::<TestService>().unwrap();
        let resolved2 = container.resolve::<TestService>().unwrap();
        let resolved3 = container.resolve::<TestService>().unwrap();

        prop_assert!(Arc::ptr_eq(&resolved1, &resolved2));
        prop_assert!(Arc::ptr_eq(&resolved2, &resolved3));

        prop_assert_eq!(resolved1.value, service.value);
        prop_assert_eq!(&resolved1.data, &service.data);
    }
}

proptest! {
    /// Constructed registrations never share instances across resolves.
    #[test]
    fn constructed_resolution_is_unique(service in arb_test_service()) {
        let container = Container::new();
        container
            .register::<TestService>()
            .unwrap()
            .with_kwargs(pinned_args(&service))
            .unwrap();

        let resolved1 = container.resolve::<TestService>().unwrap();
        let resolved2 = container.resolve::<TestService>().unwrap();

        prop_assert!(!Arc::ptr_eq(&resolved1, &resolved2));
        prop_assert_eq!(resolved1.as_ref(), resolved2.as_ref());
        prop_assert_eq!(resolved1.value, service.value);
    }
}

proptest! {
    /// A call-site override always beats the pinned kwarg.
    #[test]
    fn override_beats_pinned_kwarg(service in arb_test_service(), override_value in any::<i32>()) {
        let container = Container::new();
        container
            .register::<TestService>()
            .unwrap()
            .with_kwargs(pinned_args(&service))
            .unwrap();

        let resolved = container
            .resolve_with::<TestService>(Args::new().with("value", override_value))
            .unwrap();

        prop_assert_eq!(resolved.value, override_value);
        prop_assert_eq!(&resolved.data, &service.data);
    }
}

proptest! {
    /// Override names that match no declared parameter are ignored.
    #[test]
    fn unknown_override_names_are_ignored(service in arb_test_service(), noise in any::<u64>()) {
        let container = Container::new();
        container
            .register::<TestService>()
            .unwrap()
            .with_kwargs(pinned_args(&service))
            .unwrap();

        let resolved = container
            .resolve_with::<TestService>(Args::new().with("unrelated", noise))
            .unwrap();

        prop_assert_eq!(resolved.value, service.value);
    }
}

proptest! {
    /// Removal fully unregisters; re-registration afterwards succeeds.
    #[test]
    fn removal_then_reregistration_round_trips(service in arb_test_service()) {
        let container = Container::new();
        container
            .register::<TestService>()
            .unwrap()
            .with_instance(service.clone())
            .unwrap();
        prop_assert!(container.contains::<TestService>());

        container.remove::<TestService>().unwrap();
        prop_assert!(!container.contains::<TestService>());
        prop_assert!(container.is_empty());

        container
            .register::<TestService>()
            .unwrap()
            .with_kwargs(pinned_args(&service))
            .unwrap();
        let resolved = container.resolve::<TestService>().unwrap();
        prop_assert_eq!(resolved.value, service.value);
    }
}

proptest! {
    /// Resolution of a pinned instance is thread-safe and identity-preserving.
    #[test]
    fn thread_safe_resolution(service in arb_test_service()) {
        use std::sync::mpsc;
        use std::thread;

        let container = Arc::new(Container::new());
        container
            .register::<TestService>()
            .unwrap()
            .with_instance(service.clone())
            .unwrap();

        let (tx, rx) = mpsc::channel();
        let thread_count = 10;

        for _ in 0..thread_count {
            let container = Arc::clone(&container);
            let tx = tx.clone();

            thread::spawn(move || {
                let resolved = container.resolve::<TestService>().unwrap();
                tx.send(resolved).unwrap();
            });
        }

        let mut results = vec![];
        for _ in 0..thread_count {
            results.push(rx.recv().unwrap());
        }

        for result in &results[1..] {
            prop_assert!(Arc::ptr_eq(&results[0], result));
        }
        for result in &results {
            prop_assert_eq!(result.value, service.value);
        }
    }
}
