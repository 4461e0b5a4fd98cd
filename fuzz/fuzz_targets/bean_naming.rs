#![no_main]

use libfuzzer_sys::fuzz_target;
use nexus_di::naming::{bean_name_for, decapitalize, simple_name};

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };

    // Type-name parsing never panics and always yields a substring
    let simple = simple_name(input);
    assert!(input.contains(simple));

    // Decapitalization only changes the first character
    let lowered = decapitalize(simple);
    let mut original = simple.chars();
    let mut derived = lowered.chars();
    if original.next().is_some() {
        derived.next();
        assert_eq!(original.as_str(), derived.as_str());
    } else {
        assert!(lowered.is_empty());
    }

    // Explicit names pass through untouched
    if !input.is_empty() {
        assert_eq!(bean_name_for(Some(input), "app::Widget"), input);
    }
    assert_eq!(bean_name_for(None, input), lowered);
});
