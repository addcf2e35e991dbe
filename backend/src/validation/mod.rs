//! Validation of the `/evaluation` query parameters.
//!
//! Sources are passed as `url1`, `url2`, ... and must arrive in that order.
//! The parameters are taken as an ordered list of `(name, value)` pairs
//! exactly as the client sent them.
//!
//! ```text
//! ?url2=A&url1=B&foo=C&url2=D
//!    │      │      │      │
//!    │      │      │      └─ accepted (url2)
//!    │      │      └──────── warning: not supported
//!    │      └─────────────── accepted (url1)
//!    └────────────────────── warning: not correctly ordered
//! ```

use once_cell::sync::Lazy;
use regex::Regex;

use crate::api::logs::Diagnostics;

static URL_PARAM: Lazy<Regex> = Lazy::new(|| Regex::new(r"^url[0-9]+$").expect("valid regex"));

/// Outcome for a single parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamCheck {
    /// Name is the expected `url<N>`.
    Accepted,
    /// Name is not of the form `url<digits>`.
    Unsupported,
    /// `url<digits>`, but not the next index.
    OutOfOrder { expected: String },
}

/// Sequential checker for `url<N>` parameter names.
#[derive(Debug, Clone)]
pub struct UrlParamValidator {
    next_index: usize,
}

impl Default for UrlParamValidator {
    fn default() -> Self {
        Self { next_index: 1 }
    }
}

impl UrlParamValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Name the next accepted parameter must have.
    pub fn expected_name(&self) -> String {
        format!("url{}", self.next_index)
    }

    /// Check `name`, advancing the counter only when it is accepted.
    pub fn check(&mut self, name: &str) -> ParamCheck {
        if !URL_PARAM.is_match(name) {
            return ParamCheck::Unsupported;
        }

        let expected = self.expected_name();
        if name != expected {
            return ParamCheck::OutOfOrder { expected };
        }

        self.next_index += 1;
        ParamCheck::Accepted
    }
}

/// Select the source URLs from ordered query parameters.
///
/// Rejected parameters are logged as warnings and skipped.
pub fn accepted_urls(params: &[(String, String)], diagnostics: &mut Diagnostics) -> Vec<String> {
    let mut validator = UrlParamValidator::new();
    let mut urls = Vec::new();

    for (name, value) in params {
        match validator.check(name) {
            ParamCheck::Accepted => urls.push(value.clone()),
            ParamCheck::Unsupported => {
                diagnostics.warning(format!("parameter '{}' is not supported", name));
            }
            ParamCheck::OutOfOrder { expected } => {
                diagnostics.warning(format!(
                    "parameters seem not to be correctly ordered: got '{}', expected '{}'",
                    name, expected
                ));
            }
        }
    }

    urls
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::logs::LogLevel;

    fn params(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_sequential_params_accepted() {
        let mut diag = Diagnostics::new();
        let urls = accepted_urls(&params(&[("url1", "a"), ("url2", "b"), ("url3", "c")]), &mut diag);

        assert_eq!(urls, vec!["a", "b", "c"]);
        assert!(diag.is_empty());
    }

    #[test]
    fn test_unknown_params_rejected() {
        let mut diag = Diagnostics::new();
        let urls = accepted_urls(&params(&[("url", "a"), ("urleins", "b"), ("URL1", "c")]), &mut diag);

        assert!(urls.is_empty());
        let warnings: Vec<_> = diag.at_level(LogLevel::Warning).collect();
        assert_eq!(warnings.len(), 3);
        assert_eq!(warnings[0].message, "parameter 'url' is not supported");
        assert_eq!(warnings[1].message, "parameter 'urleins' is not supported");
    }

    #[test]
    fn test_missing_url1_rejects_everything() {
        let mut diag = Diagnostics::new();
        let urls = accepted_urls(&params(&[("url2", "a"), ("url3", "b")]), &mut diag);

        assert!(urls.is_empty());
        assert_eq!(diag.entries().len(), 2);
        assert!(diag
            .entries()
            .iter()
            .all(|e| e.message.starts_with("parameters seem not to be correctly ordered")));
    }

    #[test]
    fn test_wrong_order_keeps_url1() {
        let mut diag = Diagnostics::new();
        let urls = accepted_urls(&params(&[("url2", "a"), ("url1", "b")]), &mut diag);

        assert_eq!(urls, vec!["b"]);
        assert_eq!(diag.entries().len(), 1);
        assert_eq!(diag.entries()[0].level, LogLevel::Warning);
        assert!(diag.entries()[0].message.contains("got 'url2', expected 'url1'"));
    }

    #[test]
    fn test_rejected_param_does_not_advance_counter() {
        let mut validator = UrlParamValidator::new();

        assert_eq!(validator.check("url1"), ParamCheck::Accepted);
        assert_eq!(
            validator.check("url3"),
            ParamCheck::OutOfOrder { expected: "url2".into() }
        );
        assert_eq!(validator.check("other"), ParamCheck::Unsupported);
        assert_eq!(validator.check("url2"), ParamCheck::Accepted);
        assert_eq!(validator.expected_name(), "url3");
    }

    #[test]
    fn test_leading_zero_is_out_of_order() {
        let mut validator = UrlParamValidator::new();
        assert_eq!(
            validator.check("url01"),
            ParamCheck::OutOfOrder { expected: "url1".into() }
        );
    }
}
