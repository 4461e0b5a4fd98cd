use std::sync::Arc;

use nexus_di::{
    managed_type, Autowired, DiError, DiscoveryError, ExecutionContext, Inject, ManagedType,
    ObjectFactory, TypeCatalog,
};

#[derive(Default)]
struct Inventory;

managed_type!(Inventory => ManagedType::builder::<Inventory>()
    .component()
    .constructor(Inventory::default)
    .build());

#[derive(Default)]
struct SuiteConfig;

fn suite_config() -> Arc<ManagedType> {
    ManagedType::builder::<SuiteConfig>()
        .configuration()
        .component_scan(["shop"])
        .constructor(SuiteConfig::default)
        .build()
}

#[derive(Default)]
struct CheckoutTests {
    inventory: Inject<Inventory>,
}

fn checkout_tests(roots: Vec<Arc<ManagedType>>) -> Arc<ManagedType> {
    ManagedType::builder::<CheckoutTests>()
        .roots(roots)
        .constructor(CheckoutTests::default)
        .autowired_field::<Inventory, _>("inventory", Autowired::new(), |t: &CheckoutTests, i| {
            t.inventory.set(i)
        })
        .build()
}

fn context() -> ExecutionContext {
    let mut catalog = TypeCatalog::new();
    catalog.add::<Inventory>("shop");
    ExecutionContext::new("checkout-suite").with_scanner(Arc::new(catalog))
}

#[test]
fn root_marked_type_is_wired_by_the_container() {
    let context = context();
    let ty = checkout_tests(vec![suite_config()]);

    let bean = context.new_instance(&ty).unwrap();
    assert_eq!(bean.name(), "checkoutTests");
    let tests = bean.downcast::<CheckoutTests>().unwrap();

    let container = context.container().unwrap();
    let inventory = container.get_as::<Inventory>("inventory").unwrap();
    assert!(Arc::ptr_eq(&tests.inventory.get().unwrap(), &inventory));

    let again = context.new_instance(&ty).unwrap();
    assert!(bean.ptr_eq(&again));
    context.finish().unwrap();
}

#[test]
fn container_is_reused_across_root_sets() {
    let context = context();
    context
        .new_instance(&checkout_tests(vec![suite_config()]))
        .unwrap();

    // different roots, same context: the first container stays
    #[derive(Default)]
    struct OtherConfig;
    let other = ManagedType::builder::<OtherConfig>()
        .configuration()
        .constructor(OtherConfig::default)
        .build();
    #[derive(Default)]
    struct ReportTests;
    let reports = ManagedType::builder::<ReportTests>()
        .roots(vec![other])
        .constructor(ReportTests::default)
        .build();
    context.new_instance(&reports).unwrap();

    let container = context.container().unwrap();
    assert!(container.contains_bean("reportTests"));
    assert!(!container.contains_bean("otherConfig"));
    assert!(container.contains_bean("suiteConfig"));
    context.finish().unwrap();
}

#[derive(Default)]
struct PlainTests {
    inventory: Inject<Inventory>,
}

#[test]
fn unmarked_type_is_constructed_plainly() {
    let context = context();
    let ty = ManagedType::builder::<PlainTests>()
        .constructor(PlainTests::default)
        .autowired_field::<Inventory, _>("inventory", Autowired::new(), |t: &PlainTests, i| {
            t.inventory.set(i)
        })
        .build();

    let a = context.new_instance(&ty).unwrap();
    let b = context.new_instance(&ty).unwrap();
    assert!(!a.ptr_eq(&b));
    assert!(!a.downcast::<PlainTests>().unwrap().inventory.is_set());
    assert!(context.container().is_none());
    context.finish().unwrap();
}

struct Unconstructible;

#[test]
fn types_without_constructor_are_rejected() {
    let context = context();

    let plain = ManagedType::builder::<Unconstructible>().build();
    assert!(matches!(
        context.new_instance(&plain),
        Err(DiError::ConstructionFailure { .. })
    ));

    let marked = ManagedType::builder::<Unconstructible>()
        .roots(vec![suite_config()])
        .build();
    assert!(matches!(
        context.new_instance(&marked),
        Err(DiError::DiscoveryFailure(DiscoveryError::MissingConstructor { .. }))
    ));
    context.finish().unwrap();
}

#[test]
fn finish_tears_down_the_container() {
    let context = context();
    context
        .new_instance(&checkout_tests(vec![suite_config()]))
        .unwrap();
    assert!(context.container().unwrap().pending_destruction() > 0);

    context.finish().unwrap();
    let container = context.container().unwrap();
    assert!(container.is_destroyed());
    assert_eq!(container.pending_destruction(), 0);
}
