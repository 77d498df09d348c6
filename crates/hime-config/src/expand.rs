//! `${VAR}` expansion in configuration strings.

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` references in `value`.
///
/// `field` names the configuration key in error messages. Values without
/// `${` are returned unchanged, so URLs containing a bare `$` survive.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |var| std::env::var(var).map(Some))
        .map(std::borrow::Cow::into_owned)
        .map_err(|e| ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{}}} not set", e.var_name),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_value_is_unchanged() {
        assert_eq!(
            expand_env("https://en.wikipedia.org/wiki/", "links.url").unwrap(),
            "https://en.wikipedia.org/wiki/"
        );
    }

    #[test]
    fn test_expands_set_variable() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::set_var("HIME_TEST_WIKI_HOST", "wiki.example.org");
        }
        let result = expand_env("https://${HIME_TEST_WIKI_HOST}/page/", "links.url").unwrap();
        assert_eq!(result, "https://wiki.example.org/page/");
        unsafe {
            std::env::remove_var("HIME_TEST_WIKI_HOST");
        }
    }

    #[test]
    fn test_default_used_when_unset() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::remove_var("HIME_TEST_UNSET_HOST");
        }
        let result = expand_env("https://${HIME_TEST_UNSET_HOST:-localhost}/", "links.url").unwrap();
        assert_eq!(result, "https://localhost/");
    }

    #[test]
    fn test_missing_variable_names_field() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::remove_var("HIME_TEST_MISSING");
        }
        let err = expand_env("${HIME_TEST_MISSING}", "links[0].url").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        let msg = err.to_string();
        assert!(msg.contains("HIME_TEST_MISSING"), "{msg}");
        assert!(msg.contains("links[0].url"), "{msg}");
    }

    #[test]
    fn test_bare_dollar_is_literal() {
        assert_eq!(
            expand_env("https://example.org/$wiki", "links.url").unwrap(),
            "https://example.org/$wiki"
        );
    }
}
