//! URL and email validation helpers
//!
//! Tenant provisioning takes a full URL but the host wants it split into
//! a domain and a path, so parsing and validation live together here.

use crate::error::{GroveError, GroveResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A validated site URL, decomposed into scheme, host, and path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteUrl {
    scheme: String,
    host: String,
    path: String,
}

impl SiteUrl {
    /// Parse and validate a site URL.
    ///
    /// Only `http` and `https` are accepted. The host must be non-empty
    /// and contain no whitespace. A missing path normalizes to `/`.
    pub fn parse(raw: &str) -> GroveResult<Self> {
        let raw = raw.trim();
        let (scheme, rest) = raw
            .split_once("://")
            .ok_or_else(|| GroveError::InvalidArgument(format!("URL missing scheme: {raw}")))?;

        let scheme = scheme.to_ascii_lowercase();
        if scheme != "http" && scheme != "https" {
            return Err(GroveError::InvalidArgument(format!(
                "unsupported URL scheme: {scheme}"
            )));
        }

        let (host, path) = match rest.split_once('/') {
            Some((host, tail)) => (host, format!("/{tail}")),
            None => (rest, "/".to_string()),
        };
        if host.is_empty() || host.chars().any(char::is_whitespace) {
            return Err(GroveError::InvalidArgument(format!("invalid URL host: {raw}")));
        }

        Ok(Self {
            scheme,
            host: host.to_ascii_lowercase(),
            path,
        })
    }

    /// Whether the given string parses as a site URL.
    pub fn is_valid(raw: &str) -> bool {
        Self::parse(raw).is_ok()
    }

    /// URL scheme, lowercased (`http` or `https`).
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Host (domain) portion, lowercased.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Path portion, always starting with `/`.
    pub fn path(&self) -> &str {
        &self.path
    }
}

impl fmt::Display for SiteUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}{}", self.scheme, self.host, self.path)
    }
}

/// Loose email shape check: one `@`, a non-empty local part, and a
/// domain containing a dot. The host is the authority on deliverability.
pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && domain.contains('.')
        && !email.chars().any(char::is_whitespace)
        && !domain.contains('@')
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_display_reparses(
            host in "[a-z0-9-]{1,10}\\.[a-z]{2,5}",
            path in "(/[a-z0-9-]{1,8}){0,3}",
        ) {
            let url = SiteUrl::parse(&format!("https://{host}{path}")).unwrap();
            let reparsed = SiteUrl::parse(&url.to_string()).unwrap();
            prop_assert_eq!(url, reparsed);
        }
    }

    #[test]
    fn test_parse_full_url() {
        let url = SiteUrl::parse("https://Example.com/blog/food").unwrap();
        assert_eq!(url.scheme(), "https");
        assert_eq!(url.host(), "example.com");
        assert_eq!(url.path(), "/blog/food");
        assert_eq!(url.to_string(), "https://example.com/blog/food");
    }

    #[test]
    fn test_parse_defaults_path() {
        let url = SiteUrl::parse("http://example.com").unwrap();
        assert_eq!(url.path(), "/");
    }

    #[test]
    fn test_rejects_bad_urls() {
        assert!(SiteUrl::parse("example.com").is_err());
        assert!(SiteUrl::parse("ftp://example.com").is_err());
        assert!(SiteUrl::parse("https://").is_err());
        assert!(SiteUrl::parse("https://exa mple.com").is_err());
        assert!(!SiteUrl::is_valid(""));
    }

    #[test]
    fn test_email_validation() {
        assert!(is_valid_email("admin@example.com"));
        assert!(is_valid_email("  admin@example.com  "));
        assert!(!is_valid_email("admin"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("admin@example"));
        assert!(!is_valid_email("admin@.com"));
        assert!(!is_valid_email("ad min@example.com"));
    }
}
