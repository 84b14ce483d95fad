//! String-literal and path handling shared by all extractors.
//!
//! Three literal forms are understood: quoted plain strings (`'..'`, `".."`),
//! template strings with `${..}` interpolations, and absolute URLs inside
//! either form.

/// Unquote a raw literal (quotes included) into a candidate path.
///
/// Template strings yield the literal segment after the last interpolation;
/// when that segment is empty the nearest earlier non-empty `/`-segment is
/// used instead (`/api/users/${id}` → `/api/users`).
pub fn literal_path(raw: &str) -> Option<String> {
    let raw = raw.trim();
    let quote = raw.chars().next()?;
    if !matches!(quote, '\'' | '"' | '`') || raw.len() < 2 || !raw.ends_with(quote) {
        return None;
    }
    let inner = &raw[1..raw.len() - 1];
    if quote == '`' && inner.contains("${") {
        return template_path(inner);
    }
    Some(inner.to_string())
}

fn template_path(inner: &str) -> Option<String> {
    let segments = literal_segments(inner);
    let (last, earlier) = segments.split_last()?;

    let tail = strip_query(last);
    if tail.starts_with('/') && tail.len() > 1 {
        return Some(tail.to_string());
    }
    if is_absolute_url(tail) {
        return Some(tail.to_string());
    }

    earlier
        .iter()
        .rev()
        .map(|segment| strip_query(segment))
        .find(|segment| segment.starts_with('/') || is_absolute_url(segment))
        .map(|segment| {
            let trimmed = segment.trim_end_matches('/');
            if trimmed.is_empty() { "/".to_string() } else { trimmed.to_string() }
        })
}

/// Split template text into the literal runs between `${..}` interpolations.
/// Nested braces inside an interpolation are balanced.
fn literal_segments(inner: &str) -> Vec<&str> {
    let bytes = inner.as_bytes();
    let mut segments = Vec::new();
    let mut start = 0;
    let mut i = 0;
    while i + 1 < bytes.len() {
        if bytes[i] == b'$' && bytes[i + 1] == b'{' {
            segments.push(&inner[start..i]);
            let mut depth = 0usize;
            let mut j = i + 1;
            while j < bytes.len() {
                match bytes[j] {
                    b'{' => depth += 1,
                    b'}' => {
                        depth -= 1;
                        if depth == 0 {
                            break;
                        }
                    }
                    _ => {}
                }
                j += 1;
            }
            start = (j + 1).min(bytes.len());
            i = start;
        } else {
            i += 1;
        }
    }
    segments.push(&inner[start..]);
    segments
}

fn strip_query(path: &str) -> &str {
    match path.find(['?', '#']) {
        Some(idx) => &path[..idx],
        None => path,
    }
}

/// `http://` or `https://`, case-insensitive.
pub fn is_absolute_url(text: &str) -> bool {
    let lower = text.get(..8).unwrap_or(text).to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Normalise a candidate path into record form.
///
/// Query strings and fragments are dropped, a leading `/` is added to
/// relative paths, and `[param]` placeholders become `{param}`. Empty
/// paths and paths containing whitespace are rejected.
pub fn normalize_path(raw: &str) -> Option<String> {
    let path = strip_query(raw.trim());
    if path.is_empty() || path.chars().any(char::is_whitespace) {
        return None;
    }
    let rooted = if path.starts_with('/') || is_absolute_url(path) {
        path.to_string()
    } else {
        format!("/{}", path)
    };
    Some(brackets_to_braces(&rooted))
}

/// The `{..}` object opening at byte `open`, with nested braces balanced and
/// quoted strings skipped. Runs to the end of `text` when unbalanced.
pub fn balanced_object(text: &str, open: usize) -> &str {
    let bytes = text.as_bytes();
    let mut depth = 0usize;
    let mut quote: Option<u8> = None;
    let mut escaped = false;
    for (i, &b) in bytes.iter().enumerate().skip(open) {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == q {
                quote = None;
            }
            continue;
        }
        match b {
            b'\'' | b'"' | b'`' => quote = Some(b),
            b'{' => depth += 1,
            b'}' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return &text[open..=i];
                }
            }
            _ => {}
        }
    }
    &text[open..]
}

/// `[id]` → `{id}`, `[...slug]` → `{...slug}`.
pub fn brackets_to_braces(path: &str) -> String {
    path.replace('[', "{").replace(']', "}")
}

/// Inverse of [`brackets_to_braces`].
pub fn braces_to_brackets(path: &str) -> String {
    path.replace('{', "[").replace('}', "]")
}
