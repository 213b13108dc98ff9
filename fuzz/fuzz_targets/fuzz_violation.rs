#![no_main]
use libfuzzer_sys::fuzz_target;
use sodcheck_core::coordination::find_violation;
use sodcheck_core::LoginSet;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // "committers|approvers", comma-separated logins on each side
        let (left, right) = s.split_once('|').unwrap_or((s, ""));
        let committers: LoginSet = left.split(',').map(str::to_string).collect();
        let approvers: LoginSet = right.split(',').map(str::to_string).collect();

        let violation = find_violation(&committers, &approvers);
        for login in violation.logins() {
            assert!(committers.contains(login) && approvers.contains(login));
        }
        assert_eq!(violation.is_empty(), committers.is_disjoint(&approvers));
    }
});
