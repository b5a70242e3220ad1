//! URL handling module for Quotes-Scroll
//!
//! This module provides domain extraction and the allowed-domain check
//! used to refuse offsite requests.

use ::url::Url;

/// Extracts the domain from a URL
///
/// This function retrieves the host portion of a URL and converts it to lowercase.
/// If the URL has no host (which shouldn't happen for valid HTTP(S) URLs), it returns None.
///
/// # Arguments
///
/// * `url` - The URL to extract the domain from
///
/// # Returns
///
/// * `Some(String)` - The lowercase domain/host
/// * `None` - If the URL has no host
///
/// # Examples
///
/// ```
/// use url::Url;
/// use quotes_scroll::url::extract_domain;
///
/// let url = Url::parse("http://quotes.toscrape.com/api/quotes?page=1").unwrap();
/// assert_eq!(extract_domain(&url), Some("quotes.toscrape.com".to_string()));
///
/// let url = Url::parse("https://EXAMPLE.COM/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("example.com".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Checks whether a domain falls within a list of allowed domains
///
/// An allowed entry matches itself and any of its subdomains, so
/// `"toscrape.com"` covers both `toscrape.com` and
/// `quotes.toscrape.com`. Entries are compared case-insensitively.
///
/// # Arguments
///
/// * `domain` - The candidate domain (as returned by [`extract_domain`])
/// * `allowed` - The configured allowed-domain list
///
/// # Returns
///
/// * `true` - If any allowed entry covers the candidate
/// * `false` - Otherwise
///
/// # Examples
///
/// ```
/// use quotes_scroll::url::domain_allowed;
///
/// let allowed = vec!["toscrape.com".to_string()];
/// assert!(domain_allowed("toscrape.com", &allowed));
/// assert!(domain_allowed("quotes.toscrape.com", &allowed));
/// assert!(!domain_allowed("example.com", &allowed));
/// ```
pub fn domain_allowed(domain: &str, allowed: &[String]) -> bool {
    let candidate = domain.to_lowercase();
    allowed.iter().any(|entry| {
        let entry = entry.to_lowercase();
        candidate == entry || candidate.ends_with(&format!(".{}", entry))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allowed(entries: &[&str]) -> Vec<String> {
        entries.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_extract_simple_domain() {
        let url = Url::parse("https://example.com/").unwrap();
        assert_eq!(extract_domain(&url), Some("example.com".to_string()));
    }

    #[test]
    fn test_extract_subdomain() {
        let url = Url::parse("http://quotes.toscrape.com/api/quotes?page=2").unwrap();
        assert_eq!(
            extract_domain(&url),
            Some("quotes.toscrape.com".to_string())
        );
    }

    #[test]
    fn test_extract_with_port() {
        let url = Url::parse("http://127.0.0.1:8080/api").unwrap();
        assert_eq!(extract_domain(&url), Some("127.0.0.1".to_string()));
    }

    #[test]
    fn test_extract_uppercase_converted_to_lowercase() {
        let url = Url::parse("https://EXAMPLE.COM/").unwrap();
        assert_eq!(extract_domain(&url), Some("example.com".to_string()));
    }

    #[test]
    fn test_exact_domain_allowed() {
        assert!(domain_allowed("toscrape.com", &allowed(&["toscrape.com"])));
    }

    #[test]
    fn test_subdomain_allowed() {
        assert!(domain_allowed(
            "quotes.toscrape.com",
            &allowed(&["toscrape.com"])
        ));
        assert!(domain_allowed(
            "api.v2.toscrape.com",
            &allowed(&["toscrape.com"])
        ));
    }

    #[test]
    fn test_unrelated_domain_refused() {
        assert!(!domain_allowed("example.com", &allowed(&["toscrape.com"])));
        assert!(!domain_allowed("toscrape.org", &allowed(&["toscrape.com"])));
    }

    #[test]
    fn test_suffix_lookalike_refused() {
        // "nottoscrape.com" must not ride on the ".toscrape.com" suffix rule
        assert!(!domain_allowed(
            "nottoscrape.com",
            &allowed(&["toscrape.com"])
        ));
        assert!(!domain_allowed(
            "toscrape.com.evil.org",
            &allowed(&["toscrape.com"])
        ));
    }

    #[test]
    fn test_multiple_allowed_entries() {
        let list = allowed(&["toscrape.com", "example.org"]);
        assert!(domain_allowed("example.org", &list));
        assert!(domain_allowed("sub.example.org", &list));
        assert!(!domain_allowed("example.com", &list));
    }

    #[test]
    fn test_case_insensitive_match() {
        assert!(domain_allowed("ToScrape.COM", &allowed(&["toscrape.com"])));
        assert!(domain_allowed("quotes.toscrape.com", &allowed(&["ToScrape.Com"])));
    }

    #[test]
    fn test_empty_allowed_list_refuses_everything() {
        assert!(!domain_allowed("toscrape.com", &allowed(&[])));
    }
}
