/// Interpret common spellings of true and false, ignoring case. Anything else is `None`.
pub fn str_to_bool(src: &str) -> Option<bool> {
    match src.to_lowercase().as_str() {
        "1" | "t" | "true" | "y" | "yes" | "on" => Some(true),
        "0" | "f" | "false" | "n" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_str_to_bool() {
        for src in ["1", "t", "T", "true", "TRUE", "True", "y", "yes", "On"] {
            assert_eq!(str_to_bool(src), Some(true), "{src}");
        }
        for src in ["0", "f", "F", "false", "FALSE", "n", "No", "off"] {
            assert_eq!(str_to_bool(src), Some(false), "{src}");
        }
        for src in ["", "2", "tru", "enable"] {
            assert_eq!(str_to_bool(src), None, "{src}");
        }
    }
}
