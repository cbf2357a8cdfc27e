//! Validation driven by a struct tag.
//!
//! ```
//! use structflags::{validator, Flags, Options};
//!
//! #[derive(Default, Flags)]
//! struct Config {
//!     #[tag(valid = "host")]
//!     pub host: String,
//!     #[tag(valid = "port")]
//!     pub port: u16,
//! }
//!
//! let mut config = Config::default();
//! let options = Options::default().validator(validator::tag_validator(validator::DEFAULT_TAG));
//! let mut flags = config.parse_flags(options).unwrap();
//! assert!(flags[0].value.set("example.com").is_ok());
//! assert_eq!(
//!     flags[1].value.set("800000").unwrap_err().to_string(),
//!     "`800000` does not validate as port"
//! );
//! ```
//!
//! A tag is a comma separated list of rules. A rule may be negated with a leading `!`, and may
//! carry a custom failure message after `~`: `valid = "!numeric~must not be a number,length(2|8)"`.
//!
//! Plain rules: `alpha`, `alphanum`, `numeric`, `int`, `float`, `hexadecimal`, `ascii`,
//! `lowercase`, `uppercase`, `email`, `ip`, `ipv4`, `ipv6`, `port`, `host`, `uuid`.
//!
//! Rules with arguments: `length(min|max)` (in chars), `range(min|max)` (as a float),
//! `in(a|b|...)`, `matches(pattern)`.
//!
//! Rules with other names are ignored.

use crate::FieldOrigin;
use regex::Regex;
use std::{
    net::{IpAddr, Ipv4Addr, Ipv6Addr},
    sync::OnceLock,
};

/// The tag key read by the validator when no other is chosen
pub const DEFAULT_TAG: &str = "valid";

/// Make a validation function which checks values against the rules in the field's `tag` tag.
///
/// Fields without the tag accept everything.
pub fn tag_validator(
    tag: impl Into<String>,
) -> impl Fn(&str, &FieldOrigin) -> Result<(), String> + Send + Sync + 'static {
    let tag = tag.into();
    move |value, origin| match origin.field.tag(&tag) {
        Some(rules) => validate(value, rules),
        None => Ok(()),
    }
}

/// Check a value against a rule list, in order. The first failing rule decides the message.
pub fn validate(value: &str, rules: &str) -> Result<(), String> {
    for rule in parse_rules(rules) {
        let Some(passed) = check(rule.name, value) else {
            continue;
        };
        if passed != rule.negated {
            continue;
        }
        if let Some(message) = rule.message {
            return Err(message.to_owned());
        }
        let verb = if rule.negated { "does" } else { "does not" };
        return Err(format!("`{value}` {verb} validate as {}", rule.name));
    }
    Ok(())
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct Rule<'s> {
    name: &'s str,
    negated: bool,
    message: Option<&'s str>,
}

fn parse_rules(rules: &str) -> Vec<Rule<'_>> {
    rules
        .split(',')
        .filter_map(|src| {
            let mut parts = src.split('~');
            let head = parts.next().unwrap_or_default();
            if !is_valid_rule_name(head) {
                return None;
            }
            // `rule~message~more` is malformed, the message is dropped
            let message = match (parts.next(), parts.next()) {
                (Some(message), None) if !message.is_empty() => Some(message),
                _ => None,
            };
            let (name, negated) = match head.strip_prefix('!') {
                Some(name) => (name, true),
                None => (head, false),
            };
            Some(Rule {
                name,
                negated,
                message,
            })
        })
        .collect()
}

fn is_valid_rule_name(name: &str) -> bool {
    !name.is_empty()
        && name.chars().all(|c| {
            c.is_alphanumeric() || "!#$%&()*+-./:<=>?@[]^_{|}~ ".contains(c)
        })
}

// None if the rule is unknown
fn check(rule: &str, value: &str) -> Option<bool> {
    if let Some((name, args)) = rule
        .strip_suffix(')')
        .and_then(|rest| rest.split_once('('))
    {
        return check_with_args(name, args, value);
    }

    let passed = match rule {
        "alpha" => value.chars().all(|c| c.is_ascii_alphabetic()),
        "alphanum" => value.chars().all(|c| c.is_ascii_alphanumeric()),
        "numeric" => value.chars().all(|c| c.is_ascii_digit()),
        "hexadecimal" => value.chars().all(|c| c.is_ascii_hexdigit()),
        "ascii" => value.is_ascii(),
        "lowercase" => value == value.to_lowercase(),
        "uppercase" => value == value.to_uppercase(),
        "int" => value.is_empty() || int_regex().is_match(value),
        "float" => value.is_empty() || value.parse::<f64>().is_ok(),
        "email" => email_regex().is_match(value),
        "ip" => value.parse::<IpAddr>().is_ok(),
        "ipv4" => value.parse::<Ipv4Addr>().is_ok(),
        "ipv6" => value.parse::<Ipv6Addr>().is_ok(),
        "port" => value.parse::<u32>().is_ok_and(|port| (1..=65535).contains(&port)),
        "host" => value.parse::<IpAddr>().is_ok() || is_dns_name(value),
        "uuid" => uuid_regex().is_match(value),
        _ => return None,
    };
    Some(passed)
}

fn check_with_args(name: &str, args: &str, value: &str) -> Option<bool> {
    let passed = match name {
        "length" => {
            let (min, max) = args.split_once('|')?;
            let (min, max) = (min.parse::<usize>().ok()?, max.parse::<usize>().ok()?);
            (min..=max).contains(&value.chars().count())
        }
        "range" => {
            let (min, max) = args.split_once('|')?;
            let (min, max) = (min.parse::<f64>().ok()?, max.parse::<f64>().ok()?);
            value
                .parse::<f64>()
                .is_ok_and(|num| (min..=max).contains(&num))
        }
        "in" => args.split('|').any(|option| option == value),
        "matches" => Regex::new(args).is_ok_and(|re| re.is_match(value)),
        _ => return None,
    };
    Some(passed)
}

fn is_dns_name(value: &str) -> bool {
    !value.is_empty() && value.len() <= 255 && dns_regex().is_match(value)
}

macro_rules! static_regex {
    ($fn_name:ident, $pattern:literal) => {
        fn $fn_name() -> &'static Regex {
            static RE: OnceLock<Regex> = OnceLock::new();
            RE.get_or_init(|| Regex::new($pattern).expect("static regex must compile"))
        }
    };
}

static_regex!(int_regex, r"^[-+]?(?:0|[1-9][0-9]*)$");
static_regex!(
    email_regex,
    r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$"
);
static_regex!(
    dns_regex,
    r"^[a-zA-Z0-9_][a-zA-Z0-9_-]{0,62}(?:\.[a-zA-Z0-9_][a-zA-Z0-9_-]{0,62})*[._]?$"
);
static_regex!(
    uuid_regex,
    r"^(?i)[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}$"
);
