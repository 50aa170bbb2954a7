//! `{}` placeholder substitution.
//!
//! Placeholders are filled left to right. `\{}` produces a literal `{}` and
//! `\\{}` a backslash followed by the argument. Placeholders without an
//! argument stay as `{}`; arguments without a placeholder are dropped.

use std::fmt::{Display, Write};

const PLACEHOLDER: &str = "{}";

/// Fill the `{}` placeholders of `template` with `args`.
pub fn substitute(template: &str, args: &[&dyn Display]) -> String {
    let mut out = String::with_capacity(template.len() + 16 * args.len());
    let mut args = args.iter();
    let mut rest = template;

    while let Some(pos) = rest.find(PLACEHOLDER) {
        let (before, after) = rest.split_at(pos);
        rest = &after[PLACEHOLDER.len()..];

        if before.ends_with("\\\\") {
            out.push_str(&before[..before.len() - 1]);
        } else if let Some(stripped) = before.strip_suffix('\\') {
            out.push_str(stripped);
            out.push_str(PLACEHOLDER);
            continue;
        } else {
            out.push_str(before);
        }

        match args.next() {
            Some(arg) => {
                let _ = write!(out, "{}", arg);
            }
            None => out.push_str(PLACEHOLDER),
        }
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fills_in_order() {
        assert_eq!(substitute("{} + {} = {}", &[&1, &2, &3]), "1 + 2 = 3");
        assert_eq!(substitute("user {} logged in", &[&"ada"]), "user ada logged in");
    }

    #[test]
    fn test_surplus_placeholders_and_args() {
        assert_eq!(substitute("{} and {}", &[&"one"]), "one and {}");
        assert_eq!(substitute("only {}", &[&"a", &"b"]), "only a");
        assert_eq!(substitute("no placeholders", &[&42]), "no placeholders");
    }

    #[test]
    fn test_escapes() {
        assert_eq!(substitute(r"set \{} is {}", &[&"empty"]), "set {} is empty");
        assert_eq!(substitute(r"path C:\\{}", &[&"dir"]), r"path C:\dir");
    }

    #[test]
    fn test_adjacent_and_unicode() {
        assert_eq!(substitute("{}{}", &[&'a', &'b']), "ab");
        assert_eq!(substitute("→ {} ←", &[&"ü"]), "→ ü ←");
    }
}
