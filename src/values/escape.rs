//! Backslash escaping for list and map values, so that rendered elements may contain the
//! separators.

/// Put a backslash before each `\` and each char of `special`
pub(crate) fn escape(src: &str, special: &[char]) -> String {
    let mut result = String::with_capacity(src.len());
    for c in src.chars() {
        if c == '\\' || special.contains(&c) {
            result.push('\\');
        }
        result.push(c);
    }
    result
}

/// Drop one level of escaping: `\x` becomes `x`. A trailing lone backslash is kept.
pub(crate) fn unescape(src: &str) -> String {
    let mut result = String::with_capacity(src.len());
    let mut escaped = false;
    for c in src.chars() {
        if escaped || c != '\\' {
            result.push(c);
            escaped = false;
        } else {
            escaped = true;
        }
    }
    if escaped {
        result.push('\\');
    }
    result
}

/// Split on each `sep` which isn't escaped. The pieces keep their escapes.
pub(crate) fn split_unescaped(src: &str, sep: char) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut start = 0;
    let mut escaped = false;
    for (idx, c) in src.char_indices() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == sep {
            pieces.push(&src[start..idx]);
            start = idx + c.len_utf8();
        }
    }
    pieces.push(&src[start..]);
    pieces
}

/// Split at the first `sep` which isn't escaped
pub(crate) fn split_once_unescaped(src: &str, sep: char) -> Option<(&str, &str)> {
    let mut escaped = false;
    for (idx, c) in src.char_indices() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == sep {
            return Some((&src[..idx], &src[idx + c.len_utf8()..]));
        }
    }
    None
}
