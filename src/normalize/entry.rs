use ipnet::IpNet;
use std::net::{IpAddr, Ipv4Addr};
use url::{Host, Url};

/// Heuristic filter for URL/IP-shaped strings. Accepts bare IPv4/IPv6
/// addresses, CIDR blocks, and URLs with or without a scheme whose host is
/// an IP literal or a dotted hostname. Everything else (prose, numbers
/// without dots, strings with whitespace) is rejected.
pub fn looks_like_entry(candidate: &str) -> bool {
    if candidate.is_empty() || candidate.chars().any(char::is_whitespace) {
        return false;
    }
    if candidate.parse::<IpAddr>().is_ok() || candidate.parse::<IpNet>().is_ok() {
        return true;
    }
    parse_lenient(candidate).is_some()
}

/// Strips the scheme and lowercases the host, yielding the form the
/// gateway stores: `host[:port][path][?query][#fragment]`. Bare IPs and
/// CIDR blocks pass through verbatim.
pub fn canonical_entry(candidate: &str) -> String {
    if candidate.parse::<IpAddr>().is_ok() || candidate.parse::<IpNet>().is_ok() {
        return candidate.to_string();
    }
    let Some(parsed) = parse_lenient(candidate) else {
        return candidate.to_ascii_lowercase();
    };
    // The url crate already lowercases domain hosts.
    let mut out = parsed.host_str().unwrap_or_default().to_string();
    if let Some(port) = parsed.port() {
        out.push(':');
        out.push_str(&port.to_string());
    }
    let path = parsed.path();
    if !path.is_empty() && path != "/" {
        out.push_str(path);
    }
    if let Some(query) = parsed.query() {
        out.push('?');
        out.push_str(query);
    }
    if let Some(fragment) = parsed.fragment() {
        out.push('#');
        out.push_str(fragment);
    }
    out
}

/// Parses the candidate as a URL, tolerating a missing scheme. Returns the
/// parse only when the host is an IP literal or a hostname containing a
/// dot, which filters out free-form words and plain numbers. The textual
/// host is checked too: the URL parser normalizes numeric hosts like
/// `12345` or `42.5` into IPv4 addresses, and those must not slip through.
fn parse_lenient(candidate: &str) -> Option<Url> {
    let rest = candidate
        .split_once("://")
        .map_or(candidate, |(_, rest)| rest);
    let authority = rest.split(['/', '?', '#']).next().unwrap_or("");
    let host_text = textual_host(authority);

    let with_scheme = if candidate.contains("://") {
        candidate.to_string()
    } else {
        format!("http://{candidate}")
    };
    let parsed = Url::parse(&with_scheme).ok()?;
    match parsed.host() {
        Some(Host::Domain(domain)) if domain.contains('.') => Some(parsed),
        Some(Host::Ipv4(_)) if host_text.parse::<Ipv4Addr>().is_ok() => Some(parsed),
        Some(Host::Ipv6(_)) => Some(parsed),
        _ => None,
    }
}

/// The host portion of an authority as written: userinfo and port removed,
/// IPv6 brackets kept.
fn textual_host(authority: &str) -> &str {
    let host = authority
        .rsplit_once('@')
        .map_or(authority, |(_, host)| host);
    if host.starts_with('[') {
        return host;
    }
    host.split(':').next().unwrap_or(host)
}
