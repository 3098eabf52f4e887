#![no_main]

use libfuzzer_sys::fuzz_target;
use mog_core::Marker;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(marker) = Marker::parse(text) {
        assert!(!marker.model.is_empty());
        assert!(!marker.property.is_empty());
        let reparsed = Marker::parse(&marker.to_string()).expect("display output reparses");
        assert_eq!(reparsed, marker);
    }
});
