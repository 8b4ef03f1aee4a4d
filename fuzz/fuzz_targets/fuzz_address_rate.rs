#![no_main]

use libfuzzer_sys::fuzz_target;
use vatmoss::vat::AddressRateService;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let mut parts = s.splitn(3, '|');
        let country = parts.next().unwrap_or_default();
        let postcode = parts.next().unwrap_or_default();
        let city = parts.next().unwrap_or_default();
        let _ = vatmoss::tables::AddressRateTable::default().calculate_rate(country, postcode, city);
    }
});
