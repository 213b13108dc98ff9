#![no_main]
use libfuzzer_sys::fuzz_target;
use sodcheck_core::types::split_repository;
use sodcheck_core::PullRequestRef;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok((owner, repo)) = split_repository(s) {
            // Accepted identifiers must be safe to splice into an API path
            assert!(!owner.is_empty() && !repo.is_empty());
            assert!(!owner.contains('/') && !repo.contains('/'));
            assert_eq!(format!("{}/{}", owner, repo), s);

            let pr = PullRequestRef::parse(s, 1).expect("split succeeded");
            assert_eq!(pr.to_string(), format!("{}#1", s));
        }
    }
});
