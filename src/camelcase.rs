//! Splitting identifiers into their case-delimited words.
//!
//! `"PDFLoader"` becomes `["PDF", "Loader"]`, `"GL11Version"` becomes `["GL11", "Version"]`.
//! Concatenating the segments always reproduces the input.

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum CharClass {
    Lower,
    Upper,
    Digit,
    Other,
}

impl CharClass {
    fn of(c: char, prev: Option<CharClass>) -> Self {
        if c.is_lowercase() {
            Self::Lower
        } else if c.is_uppercase() {
            Self::Upper
        } else if c.is_numeric() {
            // Digits stick to the letters in front of them
            match prev {
                Some(prev @ (Self::Lower | Self::Upper)) => prev,
                _ => Self::Digit,
            }
        } else {
            Self::Other
        }
    }
}

/// Split an identifier into words at case transitions.
///
/// Runs of uppercase letters stay together, except that the last letter of such a run starts
/// the next word when a lowercase letter follows it (`"ABCDef"` is `["ABC", "Def"]`).
/// Non-alphanumeric runs become segments of their own. Empty input gives no segments.
pub fn split(src: &str) -> Vec<&str> {
    // Byte ranges of runs of one class
    let mut runs: Vec<(usize, usize)> = Vec::new();
    let mut last_class = None;
    for (idx, c) in src.char_indices() {
        let class = CharClass::of(c, last_class);
        match runs.last_mut() {
            Some(run) if Some(class) == last_class => run.1 = idx + c.len_utf8(),
            _ => runs.push((idx, idx + c.len_utf8())),
        }
        last_class = Some(class);
    }

    // Move the last uppercase letter of a run onto a following lowercase run
    for i in 0..runs.len().saturating_sub(1) {
        let (start, end) = runs[i];
        let next_start = runs[i + 1].0;
        let starts_upper = src[start..end].chars().next().is_some_and(char::is_uppercase);
        let next_starts_lower = src[next_start..].chars().next().is_some_and(char::is_lowercase);
        if starts_upper && next_starts_lower {
            if let Some(last) = src[start..end].chars().next_back() {
                runs[i].1 -= last.len_utf8();
                runs[i + 1].0 -= last.len_utf8();
            }
        }
    }

    runs.into_iter()
        .filter(|(start, end)| start < end)
        .map(|(start, end)| &src[start..end])
        .collect()
}

/// Like [`split`], for identifiers which may not be valid UTF-8.
///
/// Invalid input is passed through as one opaque segment.
pub fn split_bytes(src: &[u8]) -> Vec<&[u8]> {
    if src.is_empty() {
        return Vec::new();
    }
    match std::str::from_utf8(src) {
        Ok(text) => split(text).into_iter().map(str::as_bytes).collect(),
        Err(_) => vec![src],
    }
}
