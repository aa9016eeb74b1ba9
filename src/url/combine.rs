/// Schemes a relative reference may already carry to count as absolute
const ABSOLUTE_PREFIXES: &[&str] = &["http://", "https://"];

/// Resolves `relative` against `base` into an absolute URL string
///
/// # Resolution Rules
///
/// Applied in priority order:
///
/// 1. An empty `relative` yields `base` unchanged
/// 2. A `relative` that already starts with `http://` or `https://` is
///    returned unchanged
/// 3. A scheme-relative `relative` (leading `//`) takes the scheme of `base`
/// 4. A root-relative `relative` (leading `/`) is appended to the
///    `scheme://authority` part of `base`
/// 5. Anything else is appended to `base` (minus one trailing `/`) with a
///    single `/` separator
///
/// The function is pure string manipulation: hosts, ports and paths are
/// never re-encoded, so `combine_url(&combine_url(b, r), "")` always equals
/// `combine_url(b, r)`.
///
/// # Examples
///
/// ```
/// use burrow::url::combine_url;
///
/// assert_eq!(combine_url("https://a.com/p/q", "/r"), "https://a.com/r");
/// assert_eq!(combine_url("https://a.com/p/", "admin/"), "https://a.com/p/admin/");
/// assert_eq!(combine_url("https://a.com", "https://x/y"), "https://x/y");
/// ```
pub fn combine_url(base: &str, relative: &str) -> String {
    if relative.is_empty() {
        return base.to_string();
    }

    if is_absolute(relative) {
        return relative.to_string();
    }

    if relative.starts_with("//") {
        if let Some(scheme) = scheme_of(base) {
            return format!("{}:{}", scheme, relative);
        }
    }

    let trimmed = base.strip_suffix('/').unwrap_or(base);

    if relative.starts_with('/') {
        return match origin_of(trimmed) {
            Some(origin) => format!("{}{}", origin, relative),
            None => format!("{}{}", trimmed, relative),
        };
    }

    format!("{}/{}", trimmed, relative)
}

/// Returns true if `reference` carries an http(s) scheme
pub fn is_absolute(reference: &str) -> bool {
    ABSOLUTE_PREFIXES
        .iter()
        .any(|prefix| reference.starts_with(prefix))
}

/// Returns the http(s) scheme name of `url`, if any
fn scheme_of(url: &str) -> Option<&str> {
    ABSOLUTE_PREFIXES
        .iter()
        .find(|prefix| url.starts_with(*prefix))
        .map(|prefix| &prefix[..prefix.len() - 3])
}

/// Extracts the `scheme://authority` prefix of an http(s) URL
///
/// Returns None when `url` has no http(s) scheme or an empty authority.
fn origin_of(url: &str) -> Option<&str> {
    let prefix = ABSOLUTE_PREFIXES
        .iter()
        .find(|prefix| url.starts_with(*prefix))?;

    let rest = &url[prefix.len()..];
    let authority_len = rest.find('/').unwrap_or(rest.len());
    if authority_len == 0 {
        return None;
    }

    Some(&url[..prefix.len() + authority_len])
}
