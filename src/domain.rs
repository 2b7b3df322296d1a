use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Url;

/// Labels are letters (any script), digits and hyphens. The last label is at
/// least two characters, starts with a letter or digit, and has no digits
/// in the middle.
static DOMAIN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9\p{L}.-]*[0-9\p{L}]\.[0-9\p{L}][\p{L}-]*[0-9\p{L}]+$").unwrap()
});

/// Upper bound on the characters in front of the last dot.
const MAX_PREFIX_CHARS: usize = 62;

/// Characters IDNA maps to `.` in hosts.
const IDNA_DOTS: [char; 3] = ['\u{3002}', '\u{ff0e}', '\u{ff61}'];

/// Validates a domain name and returns it in Unicode form.
///
/// Punycode labels (`xn--`) are converted to Unicode first, so
/// `xn--j1ail.xn--p1ai` yields `кто.рф`. The name must end in a suffix from
/// the public suffix list, with at least one label in front of it: `com`,
/// `google.local` and `google.com.` are all rejected.
pub fn get_domain(domain: &str) -> Option<String> {
    if domain.contains('_') || domain.starts_with('-') {
        return None;
    }

    let domain = convert_to_unicode(domain)?;

    if !DOMAIN_REGEX.is_match(&domain) {
        return None;
    }
    let prefix_len = match domain.rfind('.') {
        Some(idx) => domain[..idx].chars().count(),
        None => return None,
    };
    if prefix_len > MAX_PREFIX_CHARS {
        return None;
    }

    if !has_known_suffix(&domain) {
        return None;
    }

    Some(domain)
}

/// Extracts and validates the domain of an absolute `http` or `https` URL.
/// IP hosts and any other scheme yield `None`. Whitespace, control
/// characters and IDNA full stop variants are rejected rather than
/// trimmed or remapped by the URL parser.
pub fn get_domain_from_url(raw: &str) -> Option<String> {
    if raw
        .chars()
        .any(|c| c.is_control() || c.is_whitespace() || IDNA_DOTS.contains(&c))
    {
        return None;
    }

    let url = Url::parse(raw).ok()?;
    match url.scheme() {
        "http" | "https" => {}
        _ => return None,
    }

    get_domain(url.domain()?)
}

#[inline]
pub fn is_valid_domain(domain: &str) -> bool {
    get_domain(domain).is_some()
}

#[inline]
pub fn is_valid_url(raw: &str) -> bool {
    get_domain_from_url(raw).is_some()
}

fn convert_to_unicode(domain: &str) -> Option<String> {
    if !domain.contains("xn--") {
        return Some(domain.to_string());
    }

    let (unicode, result) = idna::domain_to_unicode(domain);
    result.ok()?;
    Some(unicode)
}

/// The public suffix list carries IDN rules in Unicode; lookups are also
/// tried with the ASCII form so either spelling matches.
fn has_known_suffix(domain: &str) -> bool {
    let lower = domain.to_lowercase();
    if is_registrable(&lower) {
        return true;
    }

    match idna::domain_to_ascii(&lower) {
        Ok(ascii) if ascii != lower => is_registrable(&ascii),
        _ => false,
    }
}

fn is_registrable(domain: &str) -> bool {
    match psl::domain(domain.as_bytes()) {
        Some(registrable) => registrable.suffix().is_known(),
        None => false,
    }
}
