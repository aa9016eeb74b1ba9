use crate::UrlError;
use url::Url;

/// Validates a user-supplied enumeration target
///
/// Two forms are accepted:
///
/// - a full URL: `https://example.com/path`
/// - a scheme and host separated by whitespace: `https example.com`
///
/// The scheme word of the second form is case-insensitive. Only `http` and
/// `https` targets are allowed, and the result must carry a host. The
/// returned string goes through [`normalize_root`], so a bare authority
/// gains its `/` path.
///
/// # Examples
///
/// ```
/// use burrow::url::parse_target;
///
/// assert_eq!(parse_target("https example.com").unwrap(), "https://example.com/");
/// assert_eq!(parse_target("http://10.0.0.1/app/").unwrap(), "http://10.0.0.1/app/");
/// assert!(parse_target("ftp://example.com").is_err());
/// ```
pub fn parse_target(input: &str) -> Result<String, UrlError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(UrlError::Malformed("target is empty".to_string()));
    }

    let words: Vec<&str> = input.split_whitespace().collect();
    let candidate = match words.as_slice() {
        [url] => url.to_string(),
        [scheme, host] if is_scheme_word(scheme) => {
            format!("{}://{}", scheme.to_ascii_lowercase(), host)
        }
        _ => {
            return Err(UrlError::Malformed(format!(
                "expected '<http(s)://url>' or '<http(s)> <host>', got '{}'",
                input
            )))
        }
    };

    if !candidate.starts_with("http://") && !candidate.starts_with("https://") {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS targets are supported, got: {}",
            candidate
        )));
    }

    let parsed = Url::parse(&candidate).map_err(|e| UrlError::Parse(e.to_string()))?;
    if parsed.host_str().map_or(true, str::is_empty) {
        return Err(UrlError::MissingHost);
    }

    Ok(normalize_root(&candidate))
}

/// Canonical form of a run's root URL
///
/// `http://host` and `http://host/` name the same directory, but only the
/// second one is what `combine_url(child, "/")` produces. A root with an
/// empty path is therefore re-serialized with its `/`; anything else, or
/// anything that does not parse, is returned unchanged.
///
/// ```
/// use burrow::url::normalize_root;
///
/// assert_eq!(normalize_root("http://127.0.0.1:8080"), "http://127.0.0.1:8080/");
/// assert_eq!(normalize_root("http://a.com/files"), "http://a.com/files");
/// ```
pub fn normalize_root(url: &str) -> String {
    match Url::parse(url) {
        Ok(parsed)
            if parsed.path() == "/"
                && parsed.query().is_none()
                && parsed.fragment().is_none()
                && !url.ends_with('/') =>
        {
            parsed.to_string()
        }
        _ => url.to_string(),
    }
}

fn is_scheme_word(word: &str) -> bool {
    word.eq_ignore_ascii_case("http") || word.eq_ignore_ascii_case("https")
}
