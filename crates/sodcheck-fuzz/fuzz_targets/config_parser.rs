#![no_main]
use libfuzzer_sys::fuzz_target;
use sodcheck_core::config::parse_pr_number;
use sodcheck_core::Config;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(n) = parse_pr_number(s) {
            assert!(n > 0);
        }

        // Feed the same input to every variable; must never panic
        let _ = Config::from_lookup(|_| Some(s.to_string()));
    }
});
