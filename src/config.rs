//! Backend endpoint configuration.

use crate::api::DEFAULT_BASE_URL;

/// Environment variable overriding the backend base URL.
pub const ENV_BASE_URL: &str = "GRAMDECK_API_URL";

/// Resolve the backend base URL.
///
/// Precedence: `--url` flag, then [`ENV_BASE_URL`], then the compiled
/// default.
pub fn resolve_base_url(flag: Option<String>) -> String {
    if let Some(url) = flag {
        return url;
    }
    match std::env::var(ENV_BASE_URL) {
        Ok(url) if !url.trim().is_empty() => url,
        _ => DEFAULT_BASE_URL.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_wins_over_default() {
        let url = resolve_base_url(Some("http://10.0.0.5:8000/api".to_string()));
        assert_eq!(url, "http://10.0.0.5:8000/api");
    }

    #[test]
    fn test_default_when_nothing_set() {
        // The env var is not set in the test environment unless a caller
        // exported it; guard against that rather than mutating process env.
        if std::env::var(ENV_BASE_URL).is_err() {
            assert_eq!(resolve_base_url(None), DEFAULT_BASE_URL);
        }
    }
}
