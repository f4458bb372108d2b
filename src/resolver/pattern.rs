/// Marker that turns a module identifier into a pattern.
pub const WILDCARD: &str = "...";

pub fn is_pattern(identifier: &str) -> bool {
    identifier.contains(WILDCARD)
}

pub fn needs_expansion<S: AsRef<str>>(identifiers: &[S]) -> bool {
    identifiers.iter().any(|i| is_pattern(i.as_ref()))
}

/// Match a module identifier against a pattern.
///
/// `...` matches any run of characters, `/` included. A trailing `/...` also
/// matches the bare prefix, so `app/...` covers `app` itself.
pub fn pattern_matches(pattern: &str, module: &str) -> bool {
    if let Some(prefix) = pattern.strip_suffix("/...") {
        if module == prefix {
            return true;
        }
    }
    match_recursive(pattern, module)
}

fn match_recursive(pattern: &str, module: &str) -> bool {
    let Some(pos) = pattern.find(WILDCARD) else {
        return pattern == module;
    };

    let prefix = &pattern[..pos];
    let suffix = &pattern[pos + WILDCARD.len()..];

    if !module.starts_with(prefix) {
        return false;
    }

    let remaining = &module[prefix.len()..];
    if suffix.is_empty() {
        return true;
    }

    for (i, _) in remaining.char_indices() {
        if match_recursive(suffix, &remaining[i..]) {
            return true;
        }
    }
    match_recursive(suffix, "")
}
