use std::borrow::Cow;
use std::fmt::{Display, Write};

use crate::generator::GroupIndex;
use crate::regexp::Captures;

/// Prefix of a named placeholder in a replacement template, `$+{name}`.
const PLACEHOLDER_START: &str = "$+{";

/// Produces the replacement for each match found by
/// [`crate::NamedRegExp::replace`].
///
/// This trait is implemented for:
///
/// * `&str`, `String` and `&String`: templates where `$+{name}` is replaced
///   with the text captured by the group `name`. The engine-style tokens
///   `$1`, `${1}`, `$&`, `` $` ``, `$'` and `$$` are supported as well.
/// * Closures `FnMut(&Captures, &GroupIndex) -> T` where `T: AsRef<str>`.
///   The [`GroupIndex`] translates group names into positions in the
///   [`Captures`].
/// * [`Literal`], for inserting any [`Display`] value verbatim.
pub trait Replacer {
    /// Appends the replacement for `caps` to `dst`.
    fn replace_append(
        &mut self,
        caps: &Captures<'_>,
        groups: &GroupIndex,
        dst: &mut String,
    );

    /// Returns the replacement template, if this replacer is one.
    ///
    /// A template is expanded by [`crate::NamedRegExp::replace`] itself,
    /// which resolves its `$+{name}` placeholders once for all the matches
    /// instead of calling [`Replacer::replace_append`] for each of them.
    /// Returns `None` by default.
    fn template(&mut self) -> Option<Cow<'_, str>> {
        None
    }
}

impl Replacer for &str {
    fn replace_append(
        &mut self,
        caps: &Captures<'_>,
        groups: &GroupIndex,
        dst: &mut String,
    ) {
        expand(&resolve_placeholders(self, groups), caps, dst)
    }

    fn template(&mut self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed(*self))
    }
}

impl Replacer for String {
    fn replace_append(
        &mut self,
        caps: &Captures<'_>,
        groups: &GroupIndex,
        dst: &mut String,
    ) {
        self.as_str().replace_append(caps, groups, dst)
    }

    fn template(&mut self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed(self.as_str()))
    }
}

impl Replacer for &String {
    fn replace_append(
        &mut self,
        caps: &Captures<'_>,
        groups: &GroupIndex,
        dst: &mut String,
    ) {
        self.as_str().replace_append(caps, groups, dst)
    }

    fn template(&mut self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed(self.as_str()))
    }
}

impl<F, T> Replacer for F
where
    F: FnMut(&Captures<'_>, &GroupIndex) -> T,
    T: AsRef<str>,
{
    fn replace_append(
        &mut self,
        caps: &Captures<'_>,
        groups: &GroupIndex,
        dst: &mut String,
    ) {
        dst.push_str((*self)(caps, groups).as_ref())
    }
}

/// A replacement that is inserted verbatim, without expanding any `$`
/// token. Any value implementing [`Display`] can be used.
///
/// ```
/// # use named_regexp::{Literal, NamedRegExp};
/// let re = NamedRegExp::new("(?<n>\\d+)", None).unwrap();
/// assert_eq!(re.replace("a1", Literal("$+{n}")).unwrap(), "a$+{n}");
/// assert_eq!(re.replace("a1", Literal(2.5)).unwrap(), "a2.5");
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Literal<T>(pub T);

impl<T: Display> Replacer for Literal<T> {
    fn replace_append(
        &mut self,
        _caps: &Captures<'_>,
        _groups: &GroupIndex,
        dst: &mut String,
    ) {
        // Writing into a `String` can't fail.
        let _ = write!(dst, "{}", self.0);
    }
}

/// Rewrites every `$+{name}` in `template` as `${N}`, where `N` is the
/// capture index for `name`. Placeholders for unknown names are removed.
pub(crate) fn resolve_placeholders<'a>(
    template: &'a str,
    groups: &GroupIndex,
) -> Cow<'a, str> {
    if !template.contains(PLACEHOLDER_START) {
        return Cow::Borrowed(template);
    }

    let mut result = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(pos) = rest.find(PLACEHOLDER_START) {
        result.push_str(&rest[..pos]);
        let tail = &rest[pos + PLACEHOLDER_START.len()..];

        match placeholder_name(tail) {
            Some(name) => {
                if let Some(idx) = groups.name(name) {
                    let _ = write!(result, "${{{}}}", idx);
                }
                rest = &tail[name.len() + 1..];
            }
            None => {
                result.push_str(PLACEHOLDER_START);
                rest = tail;
            }
        }
    }

    result.push_str(rest);
    Cow::Owned(result)
}

/// Returns the name in `name}...`, if it is a valid group name.
fn placeholder_name(text: &str) -> Option<&str> {
    let end = text.find('}')?;
    let name = &text[..end];
    let mut chars = name.chars();

    let valid = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        && name.len() <= 51;

    valid.then_some(name)
}

/// Expands the engine-style tokens in `template` and appends the result to
/// `dst`:
///
/// * `$$` inserts a `$`.
/// * `$&` inserts the whole match.
/// * `` $` `` and `$'` insert the text before and after the match.
/// * `$N` and `$NN` insert the text of capture group `N`, using two digits
///   only when they form a valid group number.
/// * `${N}` inserts the text of capture group `N`, or nothing if there's no
///   such group.
///
/// Anything else is copied literally.
pub(crate) fn expand(template: &str, caps: &Captures<'_>, dst: &mut String) {
    let mut rest = template;

    while let Some(pos) = rest.find('$') {
        dst.push_str(&rest[..pos]);
        rest = &rest[pos + 1..];

        let bytes = rest.as_bytes();
        let consumed = match bytes.first() {
            Some(b'$') => {
                dst.push('$');
                1
            }
            Some(b'&') => {
                dst.push_str(caps.as_str());
                1
            }
            Some(b'`') => {
                dst.push_str(caps.before());
                1
            }
            Some(b'\'') => {
                dst.push_str(caps.after());
                1
            }
            Some(b'{') => match braced_group(rest) {
                Some((idx, len)) => {
                    dst.push_str(caps.get(idx).unwrap_or_default());
                    len
                }
                None => {
                    dst.push('$');
                    0
                }
            },
            Some(b'0'..=b'9') => match numbered_group(bytes, caps.len()) {
                Some((idx, len)) => {
                    dst.push_str(caps.get(idx).unwrap_or_default());
                    len
                }
                None => {
                    dst.push('$');
                    0
                }
            },
            _ => {
                dst.push('$');
                0
            }
        };

        rest = &rest[consumed..];
    }

    dst.push_str(rest);
}

/// Parses `{N}` at the start of `text`, returning `N` and the number of
/// bytes consumed.
fn braced_group(text: &str) -> Option<(usize, usize)> {
    let end = text.find('}')?;
    let digits = &text[1..end];
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some((digits.parse().ok()?, end + 1))
}

/// Parses one or two digits at the start of `bytes` as a group number
/// between 1 and `num_slots - 1`, preferring two digits when valid.
fn numbered_group(bytes: &[u8], num_slots: usize) -> Option<(usize, usize)> {
    let digit = |i: usize| {
        bytes.get(i).filter(|b| b.is_ascii_digit()).map(|b| (b - b'0') as usize)
    };

    let first = digit(0)?;

    if let Some(second) = digit(1) {
        let idx = first * 10 + second;
        if idx >= 1 && idx < num_slots {
            return Some((idx, 2));
        }
    }

    if first >= 1 && first < num_slots {
        Some((first, 1))
    } else {
        None
    }
}
