use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::Error;

/// Flags that modify the behavior of a [`crate::NamedRegExp`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Flags {
    /// `g`: [`crate::NamedRegExp::replace`] replaces every match.
    pub global: bool,
    /// `i`: letters match both upper and lower case.
    pub case_insensitive: bool,
    /// `m`: `^` and `$` match at the start and end of each line.
    pub multi_line: bool,
    /// `s`: `.` matches newlines too.
    pub dot_matches_new_line: bool,
}

impl Flags {
    /// Returns the inline-flags group that must prefix the pattern for the
    /// engine to honor these flags, like `(?im)`. Returns an empty string if
    /// no such group is needed.
    pub(crate) fn inline_prefix(&self) -> String {
        let mut inline = String::new();
        if self.case_insensitive {
            inline.push('i');
        }
        if self.multi_line {
            inline.push('m');
        }
        if self.dot_matches_new_line {
            inline.push('s');
        }
        if inline.is_empty() {
            inline
        } else {
            format!("(?{})", inline)
        }
    }
}

impl FromStr for Flags {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut flags = Flags::default();
        for c in s.chars() {
            let flag = match c {
                'g' => &mut flags.global,
                'i' => &mut flags.case_insensitive,
                'm' => &mut flags.multi_line,
                's' => &mut flags.dot_matches_new_line,
                _ => return Err(Error::InvalidFlags(s.to_string())),
            };
            if *flag {
                return Err(Error::InvalidFlags(s.to_string()));
            }
            *flag = true;
        }
        Ok(flags)
    }
}

impl Display for Flags {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.global {
            write!(f, "g")?;
        }
        if self.case_insensitive {
            write!(f, "i")?;
        }
        if self.multi_line {
            write!(f, "m")?;
        }
        if self.dot_matches_new_line {
            write!(f, "s")?;
        }
        Ok(())
    }
}
