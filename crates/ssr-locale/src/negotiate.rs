//! Locale negotiation.
//!
//! Precedence: explicit `lang` query parameter, then the `locale` cookie,
//! then `Accept-Language`, then the configured default.

/// Request hints used to pick a locale.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocaleHints<'a> {
    /// `lang` query parameter.
    pub query: Option<&'a str>,
    /// `locale` cookie.
    pub cookie: Option<&'a str>,
    /// Raw `Accept-Language` header.
    pub accept_language: Option<&'a str>,
}

/// Pick a supported locale key for a request.
pub fn negotiate<'a, S: AsRef<str>>(
    hints: &LocaleHints<'_>,
    supported: &'a [S],
    default: &'a str,
) -> &'a str {
    let explicit = [hints.query, hints.cookie];
    for candidate in explicit.into_iter().flatten() {
        if let Some(key) = match_supported(candidate, supported) {
            return key;
        }
    }

    if let Some(header) = hints.accept_language {
        for candidate in parse_accept_language(header) {
            if let Some(key) = match_supported(&candidate, supported) {
                return key;
            }
        }
    }

    default
}

/// Match a tag against supported keys, exactly or by primary subtag.
fn match_supported<'a, S: AsRef<str>>(tag: &str, supported: &'a [S]) -> Option<&'a str> {
    let tag = tag.trim();
    if tag.is_empty() || tag == "*" {
        return None;
    }
    let primary = tag.split(['-', '_']).next().unwrap_or(tag);

    supported
        .iter()
        .map(|s| s.as_ref())
        .find(|s| s.eq_ignore_ascii_case(tag))
        .or_else(|| {
            supported
                .iter()
                .map(|s| s.as_ref())
                .find(|s| s.eq_ignore_ascii_case(primary))
        })
}

/// Language tags from an `Accept-Language` header, highest quality first.
pub fn parse_accept_language(header: &str) -> Vec<String> {
    let mut tags: Vec<(String, f32)> = header
        .split(',')
        .filter_map(|part| {
            let mut pieces = part.split(';');
            let tag = pieces.next()?.trim();
            if tag.is_empty() {
                return None;
            }
            let quality = pieces
                .find_map(|p| p.trim().strip_prefix("q="))
                .and_then(|q| q.parse::<f32>().ok())
                .unwrap_or(1.0);
            (quality > 0.0).then(|| (tag.to_string(), quality))
        })
        .collect();

    // Stable sort keeps header order among equal qualities.
    tags.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    tags.into_iter().map(|(tag, _)| tag).collect()
}
