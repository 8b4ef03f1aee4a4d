#![no_main]

use libfuzzer_sys::fuzz_target;
use vatmoss::vat::VatinRegistry;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(parsed) = vatmoss::vat::parse_vatin(s) {
            // A parsed VATIN must parse again to itself.
            let again = vatmoss::vat::parse_vatin(&parsed.normalized()).unwrap();
            assert_eq!(again, parsed);
        }
        let _ = vatmoss::vat::FormatRegistry.validate(s);
    }
});
