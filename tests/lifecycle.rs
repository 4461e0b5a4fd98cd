use nexus_di::{
    managed_type, Autowired, BeanMethod, Container, DiError, HookKind, Inject, Lifetime,
    LifecycleHook, ManagedType, TypeKey,
};
use once_cell::sync::Lazy;
use parking_lot::Mutex;

// One journal per test; tests run in parallel.

static ORDER_JOURNAL: Lazy<Mutex<Vec<String>>> = Lazy::new(|| Mutex::new(Vec::new()));
static TEARDOWN_JOURNAL: Lazy<Mutex<Vec<String>>> = Lazy::new(|| Mutex::new(Vec::new()));
static NESTED_JOURNAL: Lazy<Mutex<Vec<String>>> = Lazy::new(|| Mutex::new(Vec::new()));

fn record(journal: &Mutex<Vec<String>>, entry: &str) {
    journal.lock().push(entry.to_string());
}

#[derive(Default)]
struct Engine;

managed_type!(Engine => ManagedType::builder::<Engine>()
    .init_before("engine_pre", |_| {
        record(&ORDER_JOURNAL, "engine:pre");
        Ok(())
    })
    .init_after("engine_post", |_| {
        record(&ORDER_JOURNAL, "engine:post");
        Ok(())
    })
    .build());

#[derive(Default)]
struct Car {
    engine: Inject<Engine>,
}

managed_type!(Car => ManagedType::builder::<Car>()
    .autowired_field::<Engine, _>("engine", Autowired::new(), |c: &Car, e| {
        record(&ORDER_JOURNAL, "car:inject");
        c.engine.set(e)
    })
    .init_before("car_pre", |c: &Car| {
        assert!(!c.engine.is_set());
        record(&ORDER_JOURNAL, "car:pre");
        Ok(())
    })
    .init_after("car_post", |c: &Car| {
        assert!(c.engine.is_set());
        record(&ORDER_JOURNAL, "car:post");
        Ok(())
    })
    .build());

#[derive(Default)]
struct GarageConfig;

#[test]
fn hooks_run_around_injection() {
    let config = ManagedType::builder::<GarageConfig>()
        .constructor(GarageConfig::default)
        .bean(BeanMethod::static_fn("engine", Engine::default))
        .bean(BeanMethod::static_fn("car", Car::default))
        .build();
    let container = Container::new(vec![config]).unwrap();

    container.get("car").unwrap();
    assert_eq!(
        *ORDER_JOURNAL.lock(),
        vec!["car:pre", "engine:pre", "engine:post", "car:inject", "car:post"]
    );
    container.destroy().unwrap();
}

// Teardown order

macro_rules! teardown_bean {
    ($ty:ident, $label:literal) => {
        #[derive(Default)]
        struct $ty;

        managed_type!($ty => ManagedType::builder::<$ty>()
            .constructor($ty::default)
            .destroy_hook("close", |_| {
                record(&TEARDOWN_JOURNAL, $label);
                Ok(())
            })
            .build());
    };
}

teardown_bean!(First, "first");
teardown_bean!(Second, "second");
teardown_bean!(Third, "third");

#[derive(Default)]
struct TeardownConfig;

#[test]
fn teardown_runs_in_reverse_creation_order() {
    let config = ManagedType::builder::<TeardownConfig>()
        .constructor(TeardownConfig::default)
        .bean(BeanMethod::static_fn("first", First::default))
        .bean(BeanMethod::static_fn("second", Second::default))
        .bean(BeanMethod::static_fn("third", Third::default))
        .build();
    let container = Container::new(vec![config]).unwrap();

    container.get("second").unwrap();
    container.get("first").unwrap();
    container.get_with("third", Lifetime::Transient).unwrap();
    container.get_with("third", Lifetime::Transient).unwrap();
    assert_eq!(container.pending_destruction(), 4);

    container.destroy().unwrap();
    assert_eq!(*TEARDOWN_JOURNAL.lock(), vec!["third", "third", "first", "second"]);
    assert_eq!(container.pending_destruction(), 0);
    assert!(container.is_destroyed());
}

// Dependencies created during injection are torn down first

#[derive(Default)]
struct Gauge;

managed_type!(Gauge => ManagedType::builder::<Gauge>()
    .destroy_hook("close", |_| {
        record(&NESTED_JOURNAL, "gauge");
        Ok(())
    })
    .build());

#[derive(Default)]
struct Dashboard {
    gauge: Inject<Gauge>,
}

managed_type!(Dashboard => ManagedType::builder::<Dashboard>()
    .autowired_field::<Gauge, _>("gauge", Autowired::new(), |d: &Dashboard, g| d.gauge.set(g))
    .destroy_hook("close", |_| {
        record(&NESTED_JOURNAL, "dashboard");
        Ok(())
    })
    .build());

#[derive(Default)]
struct PanelConfig;

#[test]
fn injected_dependency_torn_down_before_dependent() {
    let config = ManagedType::builder::<PanelConfig>()
        .constructor(PanelConfig::default)
        .bean(BeanMethod::static_fn("dashboard", Dashboard::default))
        .bean(BeanMethod::static_fn("gauge", Gauge::default))
        .build();
    let container = Container::new(vec![config]).unwrap();

    let dashboard = container.get_as::<Dashboard>("dashboard").unwrap();
    assert!(dashboard.gauge.is_set());
    assert_eq!(container.pending_destruction(), 2);

    container.destroy().unwrap();
    assert_eq!(*NESTED_JOURNAL.lock(), vec!["gauge", "dashboard"]);
}

// Failures

#[derive(Default)]
struct Fragile;

managed_type!(Fragile => ManagedType::builder::<Fragile>()
    .constructor(Fragile::default)
    .init_after("connect", |_| Err("connection refused".into()))
    .build());

#[derive(Default)]
struct Stubborn;

managed_type!(Stubborn => ManagedType::builder::<Stubborn>()
    .constructor(Stubborn::default)
    .destroy_hook("close", |_| Err("still busy".into()))
    .build());

#[derive(Default)]
struct Misdeclared;

managed_type!(Misdeclared => ManagedType::builder::<Misdeclared>()
    .constructor(Misdeclared::default)
    .hook(
        LifecycleHook::new(HookKind::InitBefore, "prepare", |_: &Misdeclared| Ok(()))
            .with_params(vec![TypeKey::of::<String>()]),
    )
    .build());

#[derive(Default)]
struct FailureConfig;

fn failure_container() -> Container {
    let config = ManagedType::builder::<FailureConfig>()
        .constructor(FailureConfig::default)
        .bean(BeanMethod::static_fn("fragile", Fragile::default))
        .bean(BeanMethod::static_fn("stubborn", Stubborn::default))
        .bean(BeanMethod::static_fn("misdeclared", Misdeclared::default))
        .build();
    Container::new(vec![config]).unwrap()
}

#[test]
fn failing_post_hook_is_fatal() {
    let container = failure_container();
    match container.get("fragile") {
        Err(DiError::HookFailure { bean, hook, kind, source }) => {
            assert_eq!(bean, "fragile");
            assert_eq!(hook, "connect");
            assert_eq!(kind, HookKind::InitAfter);
            assert_eq!(source.to_string(), "connection refused");
        }
        other => panic!("expected HookFailure, got {:?}", other),
    }
    // recorded for teardown even though creation failed
    assert_eq!(container.pending_destruction(), 1);
    container.destroy().unwrap();
}

#[test]
fn hook_with_parameters_is_rejected() {
    let container = failure_container();
    match container.get("misdeclared") {
        Err(DiError::InvalidHookSignature { hook, kind, params, type_name }) => {
            assert_eq!(hook, "prepare");
            assert_eq!(kind, HookKind::InitBefore);
            assert_eq!(params, 1);
            assert!(type_name.ends_with("Misdeclared"));
        }
        other => panic!("expected InvalidHookSignature, got {:?}", other),
    }
    container.destroy().unwrap();
}

#[test]
fn failing_destroy_hook_stops_teardown() {
    let container = failure_container();
    container.get("misdeclared").unwrap_err();
    container.get("stubborn").unwrap();

    match container.destroy() {
        Err(DiError::HookFailure { bean, kind, .. }) => {
            assert_eq!(bean, "stubborn");
            assert_eq!(kind, HookKind::Destroy);
        }
        other => panic!("expected HookFailure, got {:?}", other),
    }
    assert_eq!(container.pending_destruction(), 1);

    // resuming drains the rest
    container.destroy().unwrap();
    assert_eq!(container.pending_destruction(), 0);
}

#[test]
fn destroyed_container_refuses_requests() {
    let container = failure_container();
    container.destroy().unwrap();
    assert!(matches!(container.get("stubborn"), Err(DiError::Destroyed)));
    assert!(matches!(
        container.get_with("stubborn", Lifetime::Transient),
        Err(DiError::Destroyed)
    ));
}

#[test]
fn clones_share_state() {
    let container = failure_container();
    let clone = container.clone();
    let a = container.get("stubborn").unwrap();
    let b = clone.get("stubborn").unwrap();
    assert!(a.ptr_eq(&b));
    drop(clone);
    assert_eq!(container.pending_destruction(), 1);

    assert!(matches!(container.destroy(), Err(DiError::HookFailure { .. })));
}
