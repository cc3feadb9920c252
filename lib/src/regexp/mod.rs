/*! A regular expression with named capture groups.

[`NamedRegExp`] compiles a pattern with [`crate::generate`], hands the
rewritten pattern to the engine, and uses the resulting [`GroupIndex`] for
translating the engine's positional results into named ones.
*/

use std::borrow::Cow;
use std::fmt::{Debug, Display, Formatter, Write};
use std::ops::{Index, Range};
use std::str::FromStr;

use indexmap::IndexMap;
use log::debug;

use crate::generator::{
    generate, GroupIndex, GroupKey, KeyRef, NamedSources,
};
use crate::pattern::Pattern;
use crate::Error;

use self::replacer::{expand, resolve_placeholders};

pub use flags::Flags;
pub use replacer::{Literal, Replacer};

mod flags;
mod replacer;

#[cfg(test)]
mod tests;

/// A regular expression that supports named capture groups and named
/// backreferences.
///
/// Named groups are written `(?<name>...)` or `(:<name>...)`, named
/// backreferences `(?&name)` or `(:&name)`. A backreference is replaced with
/// the source code of the group it refers to, so `(?<n>\d+)-(?&n)` is the
/// same as `(\d+)-(\d+)`.
///
/// A `NamedRegExp` is immutable once created, it can be shared between
/// threads.
///
/// ```
/// # use named_regexp::NamedRegExp;
/// let re = NamedRegExp::new(r"(?<y>\d+)-(?<m>\d+)-(?<d>\d+)", None).unwrap();
///
/// let caps = re.exec("on 2017-01-02").unwrap().unwrap();
/// assert_eq!(caps.index(), 3);
/// assert_eq!(caps.name("m"), Some("01"));
///
/// assert_eq!(
///     re.replace("2017-01-02", "$+{d}/$+{m}/$+{y}").unwrap(),
///     "02/01/2017"
/// );
/// ```
#[derive(Clone)]
pub struct NamedRegExp {
    regex: fancy_regex::Regex,
    /// The pattern as it was given, with named groups.
    pattern: String,
    source: String,
    flags: Flags,
    groups: GroupIndex,
    named: NamedSources,
}

impl NamedRegExp {
    /// Creates a new regular expression from `pattern`.
    ///
    /// `flags` can contain `g`, `i`, `m` and `s`. If `flags` is `None` the
    /// flags are taken from the pattern (see [`Pattern::flags`]).
    ///
    /// Returns an error if the flags are invalid or the engine rejects the
    /// rewritten pattern.
    pub fn new<P: Pattern + ?Sized>(
        pattern: &P,
        flags: Option<&str>,
    ) -> Result<Self, Error> {
        let generated = generate(pattern, flags);
        let pattern = pattern.source().to_string();
        let flags: Flags = generated.flags.parse()?;

        let regex = fancy_regex::Regex::new(&format!(
            "{}{}",
            flags.inline_prefix(),
            generated.source
        ))
        .map_err(|err| Error::Compile {
            pattern: generated.source.clone(),
            err: Box::new(err),
        })?;

        debug!(
            "compiled `/{}/{}` with groups {:?}",
            generated.source, flags, generated.groups
        );

        Ok(Self {
            regex,
            pattern,
            source: generated.source,
            flags,
            groups: generated.groups,
            named: generated.named,
        })
    }

    /// Returns the rewritten pattern, without named groups or
    /// backreferences.
    #[inline]
    pub fn source(&self) -> &str {
        self.source.as_str()
    }

    /// Returns the flags for this regular expression.
    #[inline]
    pub fn flags(&self) -> Flags {
        self.flags
    }

    /// Returns the index that maps group names and ordinals to capture
    /// indexes.
    #[inline]
    pub fn groups(&self) -> &GroupIndex {
        &self.groups
    }

    /// Returns the source code of each named group.
    #[inline]
    pub fn named(&self) -> &NamedSources {
        &self.named
    }

    /// Searches for the first match in `text`.
    ///
    /// Returns `None` if there's no match.
    pub fn exec<'t>(
        &self,
        text: &'t str,
    ) -> Result<Option<Captures<'t>>, Error> {
        self.captures_from_pos(text, 0)
    }

    /// Same as [`NamedRegExp::exec`].
    #[doc(alias = "match")]
    pub fn match_<'t>(
        &self,
        text: &'t str,
    ) -> Result<Option<Captures<'t>>, Error> {
        self.exec(text)
    }

    /// Returns true if there's some match in `text`.
    pub fn test(&self, text: &str) -> Result<bool, Error> {
        Ok(self.regex.is_match(text)?)
    }

    /// Returns the byte offset of the first match in `text`, or `None` if
    /// there's no match.
    pub fn search(&self, text: &str) -> Result<Option<usize>, Error> {
        Ok(self.regex.find(text)?.map(|m| m.start()))
    }

    /// Replaces the first match in `text` with `rep`, or every match if the
    /// regular expression has the `g` flag.
    ///
    /// See [`Replacer`] for the kinds of replacements supported.
    pub fn replace<'t, R: Replacer>(
        &self,
        text: &'t str,
        mut rep: R,
    ) -> Result<Cow<'t, str>, Error> {
        // Templates are resolved once per call.
        if let Some(template) = rep.template() {
            let template = resolve_placeholders(&template, &self.groups);
            return self.replace_with(text, |caps, dst| {
                expand(&template, caps, dst)
            });
        }

        self.replace_with(text, |caps, dst| {
            rep.replace_append(caps, &self.groups, dst)
        })
    }

    fn replace_with<'t, F>(
        &self,
        text: &'t str,
        mut append: F,
    ) -> Result<Cow<'t, str>, Error>
    where
        F: FnMut(&Captures<'t>, &mut String),
    {
        let mut result = String::new();
        let mut replaced = false;
        let mut last = 0;
        let mut pos = 0;

        while pos <= text.len() {
            let Some(caps) = self.captures_from_pos(text, pos)? else {
                break;
            };

            let range = caps.range();
            result.push_str(&text[last..range.start]);
            append(&caps, &mut result);
            replaced = true;
            last = range.end;

            if !self.flags.global {
                break;
            }

            pos = if range.is_empty() {
                next_char_boundary(text, range.end)
            } else {
                range.end
            };
        }

        if !replaced {
            return Ok(Cow::Borrowed(text));
        }

        result.push_str(&text[last..]);
        Ok(Cow::Owned(result))
    }

    /// Splits `text` at each match.
    ///
    /// As in most engines, the text captured by the groups in each
    /// separator is included in the result, `None` is used for groups that
    /// didn't participate in the match.
    ///
    /// ```
    /// # use named_regexp::NamedRegExp;
    /// let re = NamedRegExp::new("(:<foo>foo)+", None).unwrap();
    /// assert_eq!(
    ///     re.split("afoofoofooz").unwrap(),
    ///     vec![Some("a"), Some("foo"), Some("z")]
    /// );
    /// ```
    pub fn split<'t>(
        &self,
        text: &'t str,
    ) -> Result<Vec<Option<&'t str>>, Error> {
        if text.is_empty() {
            return Ok(if self.regex.is_match(text)? {
                vec![]
            } else {
                vec![Some(text)]
            });
        }

        let mut pieces = Vec::new();
        let mut last = 0;
        let mut pos = 0;

        while pos < text.len() {
            let Some(caps) = self.captures_from_pos(text, pos)? else {
                break;
            };

            let range = caps.range();

            if range.start >= text.len() {
                break;
            }

            // An empty match at the point where the previous piece ended
            // doesn't split anything.
            if range.end == last {
                pos = next_char_boundary(text, range.start);
                continue;
            }

            pieces.push(Some(&text[last..range.start]));
            pieces.extend((1..caps.len()).map(|i| caps.get(i)));

            last = range.end;
            pos = if range.is_empty() {
                next_char_boundary(text, range.end)
            } else {
                range.end
            };
        }

        pieces.push(Some(&text[last..]));
        Ok(pieces)
    }

    fn captures_from_pos<'t>(
        &self,
        text: &'t str,
        pos: usize,
    ) -> Result<Option<Captures<'t>>, Error> {
        let Some(caps) = self.regex.captures_from_pos(text, pos)? else {
            return Ok(None);
        };

        let slots =
            (0..caps.len()).map(|i| caps.get(i).map(|m| m.range())).collect();

        Ok(Some(Captures::new(text, slots, &self.groups)))
    }
}

impl Debug for NamedRegExp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NamedRegExp")
            .field("source", &self.source)
            .field("flags", &self.flags)
            .field("groups", &self.groups)
            .finish()
    }
}

/// Displays the regular expression as `/source/flags`. Any `/` in the
/// source that is not already escaped is written as `\/`.
impl Display for NamedRegExp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_char('/')?;
        let mut chars = self.source.chars();
        while let Some(c) = chars.next() {
            match c {
                '\\' => {
                    f.write_char(c)?;
                    if let Some(escaped) = chars.next() {
                        f.write_char(escaped)?;
                    }
                }
                '/' => f.write_str("\\/")?,
                _ => f.write_char(c)?,
            }
        }
        write!(f, "/{}", self.flags)
    }
}

impl FromStr for NamedRegExp {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NamedRegExp::new(s, None)
    }
}

/// A compiled [`NamedRegExp`] can be used as the pattern for a new one. The
/// new regular expression is built from the same pattern, so it has the same
/// named groups and flags.
impl Pattern for NamedRegExp {
    fn source(&self) -> &str {
        self.pattern.as_str()
    }

    fn case_insensitive(&self) -> bool {
        self.flags.case_insensitive
    }

    fn multi_line(&self) -> bool {
        self.flags.multi_line
    }

    fn global(&self) -> bool {
        self.flags.global
    }

    fn flags(&self) -> Cow<'_, str> {
        Cow::Owned(self.flags.to_string())
    }
}

/// The result of a successful match.
///
/// Capture groups can be accessed by position with [`Captures::get`], or by
/// name and ordinal with [`Captures::name`], [`Captures::ordinal`] and
/// [`Captures::groups`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Captures<'t> {
    input: &'t str,
    /// Byte range for each capture group, the first one is the whole match.
    slots: Vec<Option<Range<usize>>>,
    groups: IndexMap<GroupKey, Option<&'t str>>,
}

impl<'t> Captures<'t> {
    fn new(
        input: &'t str,
        slots: Vec<Option<Range<usize>>>,
        index: &GroupIndex,
    ) -> Self {
        let groups = index
            .iter()
            .map(|(key, idx)| {
                let text = slots
                    .get(idx)
                    .cloned()
                    .flatten()
                    .map(|range| &input[range]);
                (key.clone(), text)
            })
            .collect();

        Self { input, slots, groups }
    }

    /// Returns the text matched by the capture group at position `i`, where
    /// 0 is the whole match. Returns `None` if the group didn't participate
    /// in the match, or there's no such group.
    pub fn get(&self, i: usize) -> Option<&'t str> {
        self.slots.get(i).cloned().flatten().map(|range| &self.input[range])
    }

    /// Text matched by the group with the given name.
    pub fn name(&self, name: &str) -> Option<&'t str> {
        self.groups.get(&KeyRef::Name(name)).copied().flatten()
    }

    /// Text matched by the unnamed group with the given ordinal.
    pub fn ordinal(&self, n: usize) -> Option<&'t str> {
        self.groups.get(&KeyRef::Ordinal(n)).copied().flatten()
    }

    /// Text matched by every group in the [`GroupIndex`], keyed by name or
    /// ordinal.
    pub fn groups(&self) -> &IndexMap<GroupKey, Option<&'t str>> {
        &self.groups
    }

    /// Number of positional slots, including the whole match.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Byte offset where the match starts.
    pub fn index(&self) -> usize {
        self.range().start
    }

    /// Byte range of the whole match.
    pub fn range(&self) -> Range<usize> {
        self.slots.first().cloned().flatten().unwrap_or_default()
    }

    /// The whole match.
    pub fn as_str(&self) -> &'t str {
        &self.input[self.range()]
    }

    /// The text where the match was found.
    pub fn input(&self) -> &'t str {
        self.input
    }

    /// Text before the match.
    pub fn before(&self) -> &'t str {
        &self.input[..self.index()]
    }

    /// Text after the match.
    pub fn after(&self) -> &'t str {
        &self.input[self.range().end..]
    }
}

impl<'t> Index<usize> for Captures<'t> {
    type Output = str;

    /// # Panics
    ///
    /// If the group at position `i` didn't participate in the match, or
    /// there's no such group.
    fn index(&self, i: usize) -> &str {
        self.get(i)
            .unwrap_or_else(|| panic!("no capture group at position {}", i))
    }
}

impl<'t> Index<&str> for Captures<'t> {
    type Output = str;

    /// # Panics
    ///
    /// If there's no group with the given name, or it didn't participate in
    /// the match.
    fn index(&self, name: &str) -> &str {
        self.name(name)
            .unwrap_or_else(|| panic!("no capture group named `{}`", name))
    }
}

/// Returns the offset of the character that follows the one at `pos`, or
/// `pos + 1` if `pos` is at the end of `text`.
fn next_char_boundary(text: &str, pos: usize) -> usize {
    pos + text[pos..].chars().next().map_or(1, char::len_utf8)
}
