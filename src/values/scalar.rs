use crate::{str_to_bool::str_to_bool, Value, ValueError};
use std::path::PathBuf;

impl Value for String {
    fn set(&mut self, raw: &str) -> Result<(), ValueError> {
        raw.clone_into(self);
        Ok(())
    }
    fn render(&self) -> String {
        self.clone()
    }
    fn type_name(&self) -> String {
        "string".into()
    }
}

impl Value for bool {
    fn set(&mut self, raw: &str) -> Result<(), ValueError> {
        *self = str_to_bool(raw)
            .ok_or_else(|| ValueError::parse("bool", raw, "expected a boolean like true or false"))?;
        Ok(())
    }
    fn render(&self) -> String {
        self.to_string()
    }
    fn type_name(&self) -> String {
        "bool".into()
    }
    fn is_bool_flag(&self) -> bool {
        true
    }
}

impl Value for PathBuf {
    fn set(&mut self, raw: &str) -> Result<(), ValueError> {
        *self = PathBuf::from(raw);
        Ok(())
    }
    fn render(&self) -> String {
        self.to_string_lossy().into_owned()
    }
    fn type_name(&self) -> String {
        "path".into()
    }
}

/// Parse an integer, in decimal or with a `0x`, `0o` or `0b` radix prefix, and an optional sign
pub(crate) fn parse_int(raw: &str) -> Result<i128, String> {
    let (negative, unsigned) = match raw.as_bytes().first() {
        Some(b'-') => (true, &raw[1..]),
        Some(b'+') => (false, &raw[1..]),
        _ => (false, raw),
    };
    let lowered = unsigned.get(..2).map(str::to_ascii_lowercase);
    let (radix, digits) = match lowered.as_deref() {
        Some("0x") => (16, &unsigned[2..]),
        Some("0o") => (8, &unsigned[2..]),
        Some("0b") => (2, &unsigned[2..]),
        _ => (10, unsigned),
    };
    // from_str_radix would accept a second sign
    if digits.starts_with(['+', '-']) {
        return Err("invalid digit found in string".into());
    }
    let magnitude = i128::from_str_radix(digits, radix).map_err(|err| err.to_string())?;
    Ok(if negative { -magnitude } else { magnitude })
}

macro_rules! int_value {
    ($($ty:ty => $name:literal),* $(,)?) => {
        $(
            impl Value for $ty {
                fn set(&mut self, raw: &str) -> Result<(), ValueError> {
                    let wide = parse_int(raw).map_err(|reason| ValueError::parse($name, raw, reason))?;
                    *self = <$ty>::try_from(wide)
                        .map_err(|_| ValueError::parse($name, raw, "value out of range"))?;
                    Ok(())
                }
                fn render(&self) -> String {
                    self.to_string()
                }
                fn type_name(&self) -> String {
                    $name.into()
                }
            }
        )*
    };
}

int_value! {
    i8 => "int8",
    i16 => "int16",
    i32 => "int32",
    i64 => "int64",
    isize => "int",
    u8 => "uint8",
    u16 => "uint16",
    u32 => "uint32",
    u64 => "uint64",
    usize => "uint",
}

macro_rules! float_value {
    ($($ty:ty => $name:literal),* $(,)?) => {
        $(
            impl Value for $ty {
                fn set(&mut self, raw: &str) -> Result<(), ValueError> {
                    *self = raw
                        .parse::<$ty>()
                        .map_err(|err| ValueError::parse($name, raw, err))?;
                    Ok(())
                }
                fn render(&self) -> String {
                    self.to_string()
                }
                fn type_name(&self) -> String {
                    $name.into()
                }
            }
        )*
    };
}

float_value! {
    f32 => "float32",
    f64 => "float64",
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_parse_int() {
        assert_eq!(parse_int("42"), Ok(42));
        assert_eq!(parse_int("-42"), Ok(-42));
        assert_eq!(parse_int("+7"), Ok(7));
        assert_eq!(parse_int("0x1F"), Ok(31));
        assert_eq!(parse_int("0X1f"), Ok(31));
        assert_eq!(parse_int("-0b101"), Ok(-5));
        assert_eq!(parse_int("0o17"), Ok(15));
        assert!(parse_int("").is_err());
        assert!(parse_int("0x").is_err());
        assert!(parse_int("--1").is_err());
        assert!(parse_int("0x-1").is_err());
        assert!(parse_int("1.5").is_err());
    }

    #[test]
    fn test_int_ranges() {
        let mut small = 3i8;
        assert_matches!(small.set("128"), Err(ValueError::Parse { kind: "int8", .. }));
        assert_eq!(small, 3);
        small.set("-128").unwrap();
        assert_eq!(small.render(), "-128");

        let mut unsigned = 0u64;
        assert!(unsigned.set("-1").is_err());
        unsigned.set("18446744073709551615").unwrap();
        assert_eq!(unsigned, u64::MAX);
        assert_eq!(unsigned.type_name(), "uint64");
        assert_eq!(0usize.type_name(), "uint");
        assert_eq!(0isize.type_name(), "int");
    }

    #[test]
    fn test_bool() {
        let mut b = false;
        assert!(b.is_bool_flag());
        b.set("yes").unwrap();
        assert!(b);
        b.set("F").unwrap();
        assert!(!b);
        assert_matches!(b.set("maybe"), Err(ValueError::Parse { kind: "bool", .. }));
        assert_eq!(b.render(), "false");
    }

    #[test]
    fn test_float_and_string() {
        let mut f = 0f64;
        assert_eq!(f.render(), "0");
        f.set("10.5").unwrap();
        assert_eq!(f.render(), "10.5");
        assert!(f.set("ten").is_err());
        assert_eq!(f, 10.5);

        let mut s = String::from("stringValue");
        s.set("newVal").unwrap();
        assert_eq!(s.render(), "newVal");
        assert!(!s.is_bool_flag());
        assert!(!s.is_cumulative());

        let mut p = PathBuf::new();
        p.set("/tmp/x").unwrap();
        assert_eq!(p.render(), "/tmp/x");
    }
}
