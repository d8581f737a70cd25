//! Shared provider helpers.
//!
//! Configuration extraction, endpoint completion, response cleaning, and
//! Retry-After parsing used by the concrete provider implementations.

use std::time::SystemTime;

use crate::config::ProviderConfig;
use crate::error::{GcaError, Result};

/// Resolve the API key: environment variable first, config file second.
///
/// # Arguments
/// * `config` - provider configuration
/// * `env_var` - environment variable name (e.g. `GROQ_API_KEY`)
/// * `provider_name` - used in the error message
pub fn extract_api_key(
    config: &ProviderConfig,
    env_var: &str,
    provider_name: &str,
) -> Result<String> {
    std::env::var(env_var)
        .ok()
        .filter(|key| !key.trim().is_empty())
        .or_else(|| {
            config
                .api_key
                .clone()
                .filter(|key| !key.trim().is_empty())
        })
        .ok_or_else(|| {
            GcaError::Auth(format!(
                "API key not found for the {} provider (checked {} and the config file)",
                provider_name, env_var
            ))
        })
}

/// Build the full endpoint from config, completing the API suffix when the
/// configured value is only a base URL.
pub fn build_endpoint(config: &ProviderConfig, default_base: &str, suffix: &str) -> String {
    let base = config.endpoint.as_deref().unwrap_or(default_base);
    complete_endpoint(base, suffix)
}

/// Append `expected_suffix` to `base_url` unless the URL already carries it
/// (wholly or partially), or already looks like a custom full API path.
pub fn complete_endpoint(base_url: &str, expected_suffix: &str) -> String {
    let url = base_url.trim_end_matches('/');
    let suffix = expected_suffix.trim_start_matches('/');

    if url.ends_with(suffix) {
        return url.to_string();
    }

    // The URL may already contain a prefix of the suffix
    // (e.g. url ".../openai/v1" + suffix "openai/v1/chat/completions").
    let suffix_parts: Vec<&str> = suffix.split('/').collect();
    for i in 0..suffix_parts.len() {
        let partial_suffix = suffix_parts[..=i].join("/");
        if url.ends_with(&partial_suffix) {
            let remaining_suffix = suffix_parts[i + 1..].join("/");
            if remaining_suffix.is_empty() {
                return url.to_string();
            }
            return format!("{}/{}", url, remaining_suffix);
        }
    }

    if is_complete_api_path(url) {
        return url.to_string();
    }

    format!("{}/{}", url, suffix)
}

/// Heuristic: a path depth >= 2 is treated as a user-supplied full endpoint.
fn is_complete_api_path(url: &str) -> bool {
    let path = url
        .strip_prefix("http://")
        .or_else(|| url.strip_prefix("https://"))
        .and_then(|rest| rest.split_once('/'))
        .map(|(_, path)| path)
        .unwrap_or("");

    if path.is_empty() {
        return false;
    }

    let segment_count = path.split('/').filter(|s| !s.is_empty()).count();
    segment_count >= 2
}

/// Mask an API key for display.
///
/// Length > 8: first 4 chars + `...` + last 4 chars; otherwise `****`.
pub fn mask_api_key(key: &str) -> String {
    if key.len() > 8 {
        format!("{}...{}", &key[..4], &key[key.len() - 4..])
    } else {
        "****".to_string()
    }
}

/// Strip markdown code fences around a generated commit message.
///
/// Models sometimes wrap the message:
/// ````text
/// ```
/// feat(auth): add login
/// ```
/// ````
pub fn clean_commit_response(response: &str) -> String {
    let trimmed = response.trim();

    if let Some(rest) = trimmed.strip_prefix("```") {
        // Skip an optional language tag (e.g. "text", "markdown").
        let after_lang = if let Some(newline_pos) = rest.find('\n') {
            let lang_part = &rest[..newline_pos];
            if lang_part.trim().len() <= 20 && !lang_part.contains(' ') {
                &rest[newline_pos + 1..]
            } else {
                rest
            }
        } else {
            rest
        };

        if let Some(inner) = after_lang.strip_suffix("```") {
            return inner.trim().to_string();
        }
    }

    trimmed.to_string()
}

/// Parse a Retry-After header value.
///
/// Accepts seconds (`120`) or an HTTP date (`Wed, 21 Oct 2015 07:28:00 GMT`,
/// clamped to 0 when already past). Returns `None` on an unparseable value.
pub fn parse_retry_after(value: &str) -> Option<u64> {
    if let Ok(secs) = value.parse::<u64>() {
        return Some(secs);
    }

    if let Ok(date) = httpdate::parse_http_date(value) {
        let now = SystemTime::now();
        return Some(date.duration_since(now).map(|d| d.as_secs()).unwrap_or(0));
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serial_test::serial;

    // === extract_api_key ===

    #[test]
    #[serial]
    fn test_extract_api_key_from_config() {
        // A var name no other test touches.
        let config = ProviderConfig {
            api_key: Some("gsk_from_config".to_string()),
            ..Default::default()
        };
        let key = extract_api_key(&config, "GCA_TEST_KEY_UNSET", "groq").unwrap();
        assert_eq!(key, "gsk_from_config");
    }

    #[test]
    #[serial]
    fn test_extract_api_key_env_wins() {
        // SAFETY: env mutation in tests, serialized via serial_test.
        unsafe { std::env::set_var("GCA_TEST_KEY_SET", "gsk_from_env") };
        let config = ProviderConfig {
            api_key: Some("gsk_from_config".to_string()),
            ..Default::default()
        };
        let key = extract_api_key(&config, "GCA_TEST_KEY_SET", "groq").unwrap();
        assert_eq!(key, "gsk_from_env");
        // SAFETY: test env.
        unsafe { std::env::remove_var("GCA_TEST_KEY_SET") };
    }

    #[test]
    #[serial]
    fn test_extract_api_key_missing_is_auth_error() {
        let config = ProviderConfig::default();
        let result = extract_api_key(&config, "GCA_TEST_KEY_UNSET", "groq");
        assert!(matches!(result, Err(crate::error::GcaError::Auth(_))));
    }

    #[test]
    #[serial]
    fn test_extract_api_key_blank_config_value_rejected() {
        let config = ProviderConfig {
            api_key: Some("   ".to_string()),
            ..Default::default()
        };
        let result = extract_api_key(&config, "GCA_TEST_KEY_UNSET", "groq");
        assert!(result.is_err());
    }

    // === complete_endpoint ===

    #[test]
    fn test_complete_endpoint_basic() {
        assert_eq!(
            complete_endpoint("https://api.groq.com/openai", "/v1/chat/completions"),
            "https://api.groq.com/openai/v1/chat/completions"
        );
    }

    #[test]
    fn test_complete_endpoint_with_trailing_slash() {
        assert_eq!(
            complete_endpoint("https://api.groq.com/openai/", "/v1/chat/completions"),
            "https://api.groq.com/openai/v1/chat/completions"
        );
    }

    #[test]
    fn test_complete_endpoint_already_complete() {
        assert_eq!(
            complete_endpoint(
                "https://api.groq.com/openai/v1/chat/completions",
                "/v1/chat/completions"
            ),
            "https://api.groq.com/openai/v1/chat/completions"
        );
    }

    #[test]
    fn test_complete_endpoint_partial_suffix() {
        assert_eq!(
            complete_endpoint("https://api.example.com/v1", "/v1/chat/completions"),
            "https://api.example.com/v1/chat/completions"
        );
    }

    #[test]
    fn test_complete_endpoint_custom_full_path_kept() {
        assert_eq!(
            complete_endpoint("https://custom.com/my/custom/path", "/v1/chat/completions"),
            "https://custom.com/my/custom/path"
        );
    }

    // === mask_api_key ===

    #[test]
    fn test_mask_api_key() {
        assert_eq!(mask_api_key("gsk_abcdefghijklmnop"), "gsk_...mnop");
        assert_eq!(mask_api_key("short"), "****");
        assert_eq!(mask_api_key(""), "****");
        assert_eq!(mask_api_key("123456789"), "1234...6789");
    }

    // === clean_commit_response ===

    #[test]
    fn test_clean_commit_plain_message() {
        assert_eq!(
            clean_commit_response("feat(auth): add login validation"),
            "feat(auth): add login validation"
        );
    }

    #[test]
    fn test_clean_commit_bare_fences() {
        assert_eq!(
            clean_commit_response("```\nfeat(auth): add login validation\n```"),
            "feat(auth): add login validation"
        );
    }

    #[test]
    fn test_clean_commit_text_lang_tag() {
        assert_eq!(
            clean_commit_response("```text\nfeat(auth): add login validation\n```"),
            "feat(auth): add login validation"
        );
    }

    #[test]
    fn test_clean_commit_multiline_body() {
        let input = "```\nfeat(auth): add login validation\n\nAdded email and password validation.\nCloses #42\n```";
        assert_eq!(
            clean_commit_response(input),
            "feat(auth): add login validation\n\nAdded email and password validation.\nCloses #42"
        );
    }

    #[test]
    fn test_clean_commit_no_closing_fence_kept_as_is() {
        let input = "```\nfeat(auth): add login validation";
        assert_eq!(clean_commit_response(input), input);
    }

    #[test]
    fn test_clean_commit_with_whitespace() {
        assert_eq!(
            clean_commit_response("  \n```\nfeat: update deps\n```\n  "),
            "feat: update deps"
        );
    }

    // === parse_retry_after ===

    #[test]
    fn test_parse_retry_after_seconds() {
        assert_eq!(parse_retry_after("120"), Some(120));
        assert_eq!(parse_retry_after("0"), Some(0));
    }

    #[test]
    fn test_parse_retry_after_past_http_date_clamps_to_zero() {
        assert_eq!(parse_retry_after("Wed, 21 Oct 2015 07:28:00 GMT"), Some(0));
    }

    #[test]
    fn test_parse_retry_after_garbage() {
        assert_eq!(parse_retry_after("soon"), None);
        assert_eq!(parse_retry_after(""), None);
    }
}
