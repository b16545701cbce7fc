//! Shell-style name patterns.
//!
//! Names match the way `fnmatch` matches them: a run of `*` acts as a single
//! `*`, and a `[` with no closing `]` is an ordinary character.

use glob::{Pattern, PatternError};

pub fn compile(raw: &str) -> Result<Pattern, PatternError> {
    Pattern::new(&translate(raw))
}

fn translate(raw: &str) -> String {
    let chars: Vec<char> = raw.chars().collect();
    let mut out = String::with_capacity(raw.len());
    let mut i = 0;
    while i < chars.len() {
        match chars[i] {
            '*' => {
                out.push('*');
                while chars.get(i + 1) == Some(&'*') {
                    i += 1;
                }
            }
            '[' => match class_end(&chars, i) {
                Some(end) => {
                    out.extend(&chars[i..=end]);
                    i = end;
                }
                None => out.push_str("[[]"),
            },
            c => out.push(c),
        }
        i += 1;
    }
    out
}

/// Index of the `]` closing the class opened at `start`. A `]` right after
/// `[` or `[!` belongs to the class.
fn class_end(chars: &[char], start: usize) -> Option<usize> {
    let mut j = start + 1;
    if chars.get(j) == Some(&'!') {
        j += 1;
    }
    if chars.get(j) == Some(&']') {
        j += 1;
    }
    (j..chars.len()).find(|&k| chars[k] == ']')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matches(pattern: &str, name: &str) -> bool {
        compile(pattern).unwrap().matches(name)
    }

    #[test]
    fn repeated_stars_collapse() {
        assert_eq!(translate("**.dat"), "*.dat");
        assert_eq!(translate("a***b*"), "a*b*");
        assert!(matches("**.dat", "data.dat"));
        assert!(matches("a**b", "ab"));
        assert!(matches("a**b", "axyzb"));
        assert!(!matches("a**b", "abc"));
    }

    #[test]
    fn unclosed_bracket_is_literal() {
        assert_eq!(translate("data[*"), "data[[]*");
        assert!(matches("data[*", "data["));
        assert!(matches("data[*", "data[1].dat"));
        assert!(!matches("data[*", "data1"));
        assert!(matches("[", "["));
    }

    #[test]
    fn closed_classes_keep_their_meaning() {
        assert!(matches("file[0-9].dat", "file3.dat"));
        assert!(!matches("file[0-9].dat", "filex.dat"));
        assert!(matches("[!a]*", "b.dat"));
        assert!(!matches("[!a]*", "a.dat"));
        assert!(matches("[]]x", "]x"));
        assert!(matches("x[*]", "x*"));
        assert!(!matches("x[*]", "xy"));
    }

    #[test]
    fn matching_is_case_sensitive() {
        assert!(!matches("*.DAT", "a.dat"));
        assert!(matches("?.dat", "a.dat"));
    }
}
