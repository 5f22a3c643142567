use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use rigging::{Entry, Inject, InstantiateErrorKind, Registry, Session, Warmup};

struct Port(u16);

struct Connection {
    port: u16,
}

struct Service {
    primary: Arc<Connection>,
    fallback: Arc<Connection>,
}

fn wiring(open_count: Arc<AtomicUsize>) -> Registry {
    Registry::new()
        .add_value_with_repr(Port(5432), "Port(5432)")
        .add_constructor(move |Inject(port): Inject<Port>| {
            open_count.fetch_add(1, Ordering::SeqCst);
            Ok::<_, InstantiateErrorKind>(Connection { port: port.0 })
        })
        .unwrap()
        // The service references the connection twice; it must still be
        // opened exactly once.
        .add_constructor(|Inject(primary): Inject<Connection>, Inject(fallback): Inject<Connection>| {
            Ok::<_, InstantiateErrorKind>(Service { primary, fallback })
        })
        .unwrap()
}

#[test]
fn service_is_wired_from_port_with_one_connection() {
    let open_count = Arc::new(AtomicUsize::new(0));

    let service = wiring(open_count.clone()).make::<Service>().unwrap();

    assert_eq!(service.primary.port, 5432);
    assert!(Arc::ptr_eq(&service.primary, &service.fallback));
    assert_eq!(open_count.load(Ordering::SeqCst), 1);
}

#[test]
fn memoized_connection_survives_multiple_makes() {
    let open_count = Arc::new(AtomicUsize::new(0));
    let session = Session::new();

    let registry = wiring(open_count.clone()).memoize_all(&session);

    let first = registry.make::<Service>().unwrap();
    let second = registry.make::<Service>().unwrap();

    assert!(Arc::ptr_eq(&first.primary, &second.primary));
    assert_eq!(open_count.load(Ordering::SeqCst), 1);
    assert_eq!(session.materialized(), 2);
}

#[test]
fn test_double_overrides_production_wiring() {
    let open_count = Arc::new(AtomicUsize::new(0));

    let overrides = Registry::new().add_value(Port(1));
    let registry = wiring(open_count).combine(overrides);

    let service = registry.make::<Service>().unwrap();
    assert_eq!(service.primary.port, 1);
}

#[test]
fn specialized_port_applies_only_under_its_target() {
    struct Healthcheck {
        connection: Arc<Connection>,
    }

    let open_count = Arc::new(AtomicUsize::new(0));

    let registry = wiring(open_count)
        .add_constructor(|Inject(connection): Inject<Connection>| Ok::<_, InstantiateErrorKind>(Healthcheck { connection }))
        .unwrap()
        .specialize::<Healthcheck>(Entry::value(Port(9)));

    let healthcheck = registry.make::<Healthcheck>().unwrap();
    let service = registry.make::<Service>().unwrap();

    assert_eq!(healthcheck.connection.port, 9);
    assert_eq!(service.primary.port, 5432);
}

#[test]
fn warmup_gates_a_resolved_service() {
    let open_count = Arc::new(AtomicUsize::new(0));

    let service = wiring(open_count).make::<Service>().unwrap();

    let report = Warmup::new()
        .check("connection port", |service: &Arc<Service>| {
            anyhow::ensure!(service.primary.port != 0, "connection has no port");
            Ok(())
        })
        .check("shared fallback", |service: &Arc<Service>| {
            anyhow::ensure!(
                Arc::ptr_eq(&service.primary, &service.fallback),
                "fallback is a separate connection"
            );
            Ok(())
        })
        .run(&service);

    assert!(report.is_ok(), "warmup failed: {report}");
}
