#![no_main]
use libfuzzer_sys::fuzz_target;
use sodcheck_core::Config;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Split into repository / PR number / token on NUL
        let mut parts = s.splitn(3, '\0');
        let repository = parts.next().unwrap_or("").to_string();
        let pr_number = parts.next().unwrap_or("").to_string();
        let token = parts.next().unwrap_or("").to_string();

        let _ = Config::from_lookup(|name| match name {
            "GITHUB_REPOSITORY" => Some(repository.clone()),
            "PR_NUMBER" => Some(pr_number.clone()),
            "GITHUB_TOKEN" => Some(token.clone()),
            _ => None,
        });
    }
});
