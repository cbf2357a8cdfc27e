//! Default naming of flags and environment variables.

use crate::camelcase;

/// Turn a CamelCase identifier into a flag name, e.g. `ValueValue2Value3` -> `value-value2-value3`
pub fn camel_to_flag(name: &str, divider: &str) -> String {
    camelcase::split(name)
        .into_iter()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(divider)
}

/// Turn a flag name into an environment variable name, e.g. `value-value2` -> `VALUE_VALUE2`
///
/// This only swaps dividers and upper-cases, it does not split words again. An empty flag
/// divider sits between every char, so each char is joined with the env divider.
pub fn flag_to_env(flag: &str, flag_divider: &str, env_divider: &str) -> String {
    if flag_divider.is_empty() {
        return flag
            .chars()
            .map(|c| c.to_uppercase().to_string())
            .collect::<Vec<_>>()
            .join(env_divider);
    }
    flag.split(flag_divider)
        .map(str::to_uppercase)
        .collect::<Vec<_>>()
        .join(env_divider)
}

/// Turn a rust field identifier into a flag name.
///
/// Field identifiers are usually snake_case, so the identifier is split on underscores first,
/// and each piece goes through [`camel_to_flag`]: `string_value` -> `string-value`,
/// `HTTPServer` -> `http-server`. A raw identifier prefix `r#` is dropped.
pub fn field_to_flag(ident: &str, divider: &str) -> String {
    let ident = ident.strip_prefix("r#").unwrap_or(ident);
    ident
        .split('_')
        .filter(|piece| !piece.is_empty())
        .map(|piece| camel_to_flag(piece, divider))
        .collect::<Vec<_>>()
        .join(divider)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_to_flag() {
        assert_eq!(camel_to_flag("ValueValue2Value3", "-"), "value-value2-value3");
        assert_eq!(
            camel_to_flag("ValueValue2Value3Value4Value5Value6Value7", "-"),
            "value-value2-value3-value4-value5-value6-value7"
        );
        assert_eq!(camel_to_flag("Value", "-"), "value");
        assert_eq!(camel_to_flag("IP", "-"), "ip");
        assert_eq!(camel_to_flag("HTMLPage", "."), "html.page");
    }

    #[test]
    fn test_flag_to_env() {
        assert_eq!(flag_to_env("value-value2-value3", "-", "_"), "VALUE_VALUE2_VALUE3");
        assert_eq!(flag_to_env("value", "-", "_"), "VALUE");
        assert_eq!(flag_to_env("name_two", "-", "|"), "NAME_TWO");
        assert_eq!(flag_to_env("a.b", "", "_"), "A_._B");
        assert_eq!(flag_to_env("ab", "", ""), "AB");
        assert_eq!(flag_to_env("", "", "_"), "");
    }

    #[test]
    fn test_field_to_flag() {
        assert_eq!(field_to_flag("name", "-"), "name");
        assert_eq!(field_to_flag("string_value", "-"), "string-value");
        assert_eq!(field_to_flag("SUB2", "-"), "sub2");
        assert_eq!(field_to_flag("HTTPServer", "-"), "http-server");
        assert_eq!(field_to_flag("r#type", "-"), "type");
        assert_eq!(field_to_flag("_leading__double_", "-"), "leading-double");
    }
}
