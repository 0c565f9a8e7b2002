//! Address and endpoint predicates.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::sync::LazyLock;

use regex::Regex;
use validator::{ValidateEmail, ValidateUrl};

/// Longest host name accepted by [`is_dns_name`].
const MAX_DNS_NAME_LEN: usize = 255;

static DNS_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([a-zA-Z0-9_][a-zA-Z0-9_-]{0,62})(\.[a-zA-Z0-9_][a-zA-Z0-9_-]{0,62})*[._]?$")
        .expect("valid regex")
});
static MAC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:[0-9A-Fa-f]{2}[:-]){5}[0-9A-Fa-f]{2}$|^(?:[0-9A-Fa-f]{4}\.){2}[0-9A-Fa-f]{4}$",
    )
    .expect("valid regex")
});

pub fn is_email(s: &str) -> bool {
    s.validate_email()
}

/// Absolute URL; a bare host such as `example.com/path` is accepted as if it
/// carried an `http://` scheme.
pub fn is_url(s: &str) -> bool {
    if s.is_empty() || s.len() >= 2083 || s.starts_with('.') {
        return false;
    }
    if s.contains("://") {
        return s.validate_url();
    }
    format!("http://{s}").validate_url()
}

/// Absolute URL with an explicit scheme.
pub fn is_request_url(s: &str) -> bool {
    s.contains("://") && s.validate_url()
}

/// Absolute URL or absolute path.
pub fn is_request_uri(s: &str) -> bool {
    (s.starts_with('/') && !s.contains(char::is_whitespace)) || is_request_url(s)
}

pub fn is_ip(s: &str) -> bool {
    s.parse::<IpAddr>().is_ok()
}

pub fn is_ipv4(s: &str) -> bool {
    s.parse::<Ipv4Addr>().is_ok()
}

pub fn is_ipv6(s: &str) -> bool {
    s.parse::<Ipv6Addr>().is_ok()
}

/// Port number in `1..=65535`.
pub fn is_port(s: &str) -> bool {
    matches!(s.parse::<u32>(), Ok(port) if (1..=65535).contains(&port))
}

/// Syntactically valid DNS name that is not an IP address.
pub fn is_dns_name(s: &str) -> bool {
    if s.is_empty() || s.len() > MAX_DNS_NAME_LEN {
        return false;
    }
    !is_ip(s) && DNS_NAME_RE.is_match(s)
}

/// IP address or DNS name.
pub fn is_host(s: &str) -> bool {
    is_ip(s) || is_dns_name(s)
}

/// `host:port`, with IPv6 hosts in brackets.
pub fn is_dial_string(s: &str) -> bool {
    let Some((host, port)) = s.rsplit_once(':') else {
        return false;
    };
    let host = host
        .strip_prefix('[')
        .and_then(|h| h.strip_suffix(']'))
        .unwrap_or(host);
    is_host(host) && is_port(port)
}

/// MAC address in colon, dash or dotted-quad notation.
pub fn is_mac(s: &str) -> bool {
    MAC_RE.is_match(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_basic() {
        assert!(is_email("foo@example.com"));
        assert!(!is_email("foo@"));
        assert!(!is_email("plainaddress"));
    }

    #[test]
    fn url_accepts_missing_scheme() {
        assert!(is_url("https://example.com/path?q=1"));
        assert!(is_url("example.com/path"));
        assert!(!is_url(".example.com"));
    }

    #[test]
    fn request_url_requires_scheme() {
        assert!(is_request_url("http://example.com"));
        assert!(!is_request_url("example.com"));
    }

    #[test]
    fn request_uri_accepts_absolute_path() {
        assert!(is_request_uri("/api/v1/items"));
        assert!(!is_request_uri("api/v1/items"));
    }

    #[test]
    fn ip_families() {
        assert!(is_ipv4("10.0.0.1"));
        assert!(!is_ipv4("::1"));
        assert!(is_ipv6("::1"));
        assert!(is_ip("192.168.1.1"));
        assert!(!is_ip("300.1.1.1"));
    }

    #[test]
    fn port_bounds() {
        assert!(is_port("1"));
        assert!(is_port("65535"));
        assert!(!is_port("0"));
        assert!(!is_port("65536"));
    }

    #[test]
    fn dns_name_excludes_ips() {
        assert!(is_dns_name("localhost"));
        assert!(is_dns_name("api.example.com"));
        assert!(!is_dns_name("127.0.0.1"));
        assert!(!is_dns_name("-bad.example.com"));
    }

    #[test]
    fn dial_string_forms() {
        assert!(is_dial_string("localhost:8080"));
        assert!(is_dial_string("[::1]:443"));
        assert!(!is_dial_string("localhost"));
        assert!(!is_dial_string("localhost:0"));
    }

    #[test]
    fn mac_notations() {
        assert!(is_mac("01:23:45:67:89:ab"));
        assert!(is_mac("01-23-45-67-89-AB"));
        assert!(is_mac("0123.4567.89ab"));
        assert!(!is_mac("01:23:45:67:89"));
    }
}
