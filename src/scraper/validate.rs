//! SSRF gate for scrape targets.
//!
//! Pure and synchronous: no network I/O happens before a URL passes this
//! check.

use std::net::Ipv4Addr;

use url::{Host, Url};

use crate::scraper::errors::ScraperError;
use crate::scraper::policy::ALLOWED_HOSTS;

/// Validates a raw URL string and returns the parsed form.
///
/// Rejects malformed URLs, loopback/private/link-local targets, non-https
/// schemes, and hosts outside the publication allow-list. Every rejection
/// is `InvalidUrl`.
pub fn check_target(raw: &str) -> Result<Url, ScraperError> {
    let url = Url::parse(raw)
        .map_err(|e| ScraperError::InvalidUrl(format!("malformed url: {e}")))?;

    let host = url
        .host()
        .ok_or_else(|| ScraperError::InvalidUrl("url has no host".to_string()))?;

    // Host class first, so a private target is reported as such regardless
    // of scheme.
    match &host {
        Host::Domain(name) => {
            let name = name.to_ascii_lowercase();
            if name == "localhost" || name == "localhost.localdomain" {
                return Err(ScraperError::InvalidUrl(
                    "refusing to fetch localhost".to_string(),
                ));
            }
            // url::Url keeps IPv4 literals as Host::Ipv4, but cover the
            // domain branch anyway for odd inputs like trailing dots.
            if let Ok(addr) = name.trim_end_matches('.').parse::<Ipv4Addr>()
                && is_blocked_ipv4(addr)
            {
                return Err(ScraperError::InvalidUrl(
                    "refusing to fetch private address".to_string(),
                ));
            }
        }
        Host::Ipv4(addr) => {
            if is_blocked_ipv4(*addr) {
                return Err(ScraperError::InvalidUrl(
                    "refusing to fetch private address".to_string(),
                ));
            }
            // Any bare IPv4 literal also fails the allow-list below.
        }
        Host::Ipv6(addr) => {
            if addr.is_loopback() {
                return Err(ScraperError::InvalidUrl(
                    "refusing to fetch loopback address".to_string(),
                ));
            }
        }
    }

    if url.scheme() != "https" {
        return Err(ScraperError::InvalidUrl(
            "only https urls are supported".to_string(),
        ));
    }

    let hostname = match &host {
        Host::Domain(name) => name.to_ascii_lowercase(),
        _ => {
            return Err(ScraperError::InvalidUrl(
                "host is not an allowed publication domain".to_string(),
            ));
        }
    };

    if !is_allowed_host(&hostname) {
        return Err(ScraperError::InvalidUrl(format!(
            "host '{hostname}' is not an allowed publication domain"
        )));
    }

    Ok(url)
}

fn is_allowed_host(hostname: &str) -> bool {
    ALLOWED_HOSTS.iter().any(|allowed| {
        hostname == *allowed || hostname.ends_with(&format!(".{allowed}"))
    })
}

fn is_blocked_ipv4(addr: Ipv4Addr) -> bool {
    addr.is_loopback()
        || addr.is_private()
        || addr.is_link_local()
        || addr.octets()[0] == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reject(raw: &str) -> ScraperError {
        check_target(raw).unwrap_err()
    }

    #[test]
    fn rejects_private_hosts_regardless_of_scheme() {
        for host in [
            "localhost",
            "127.0.0.1",
            "10.0.0.1",
            "172.16.0.1",
            "192.168.1.1",
            "169.254.1.1",
            "[::1]",
        ] {
            for scheme in ["http", "https"] {
                let url = format!("{scheme}://{host}/article");
                assert!(
                    matches!(reject(&url), ScraperError::InvalidUrl(_)),
                    "expected rejection for {url}"
                );
            }
        }
    }

    #[test]
    fn rejects_more_private_ranges() {
        for host in ["127.255.255.254", "172.31.0.1", "0.0.0.0", "localhost.localdomain"] {
            assert!(matches!(
                reject(&format!("https://{host}/")),
                ScraperError::InvalidUrl(_)
            ));
        }
        // 172.32.x is outside the /12 private block; it fails, but only on
        // the allow-list.
        let err = reject("https://172.32.0.1/");
        assert!(matches!(err, ScraperError::InvalidUrl(_)));
    }

    #[test]
    fn rejects_non_https_even_for_allowed_hosts() {
        assert!(matches!(
            reject("http://medium.com/@a/post"),
            ScraperError::InvalidUrl(_)
        ));
        assert!(matches!(
            reject("ftp://medium.com/@a/post"),
            ScraperError::InvalidUrl(_)
        ));
    }

    #[test]
    fn rejects_hosts_outside_allow_list() {
        assert!(matches!(
            reject("https://example.com/article"),
            ScraperError::InvalidUrl(_)
        ));
        // Suffix match must not leak across label boundaries.
        assert!(matches!(
            reject("https://notmedium.com/article"),
            ScraperError::InvalidUrl(_)
        ));
    }

    #[test]
    fn accepts_allowed_hosts_and_subdomains() {
        for url in [
            "https://medium.com/@author/some-post-1234",
            "https://towardsdatascience.com/a-post",
            "https://blog.medium.com/announcement",
            "https://MEDIUM.com/case-insensitive",
        ] {
            assert!(check_target(url).is_ok(), "expected {url} to pass");
        }
    }

    #[test]
    fn rejects_malformed() {
        assert!(matches!(reject("not a url"), ScraperError::InvalidUrl(_)));
        assert!(matches!(reject(""), ScraperError::InvalidUrl(_)));
    }
}
