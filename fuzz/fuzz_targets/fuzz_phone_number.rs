#![no_main]

use libfuzzer_sys::fuzz_target;
use vatmoss::vat::PhoneRateService;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Errors are fine, panics are bugs.
        let _ = vatmoss::tables::parse_phone_number(s);
        let _ = vatmoss::tables::PhoneRateTable::default().calculate_rate(s, "DE");
    }
});
