#![no_main]

use libfuzzer_sys::fuzz_target;
use nexus_di::{ManagedType, TypeCatalog, TypeScanner};

#[derive(Default)]
struct Unit;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };
    let (registered, requested) = input.split_once('|').unwrap_or((input, ""));

    let mut catalog = TypeCatalog::new();
    catalog.insert(
        registered,
        ManagedType::builder::<Unit>().constructor(Unit::default).build(),
    );

    let found = catalog.scan(requested).expect("catalog scans never fail");
    // Scanning the registration namespace always finds the unit
    if requested == registered {
        assert_eq!(found.len(), 1);
    }
    // The empty namespace covers everything
    if requested.is_empty() {
        assert_eq!(found.len(), 1);
    }
});
