/*! Rewrites patterns containing named groups into engine-native patterns.

The engine behind [`crate::NamedRegExp`] only understands positional capture
groups. This module takes a pattern that may contain named groups
(`(?<name>...)` or `(:<name>...)`) and named backreferences (`(?&name)` or
`(:&name)`), erases that syntax, and produces a [`GroupIndex`] that tells
which positional slot ended up holding each group.

The rewrite is a single left-to-right pass over the fragments produced by
[`splitter::split_groups`], keeping a stack with the groups that are still
open.
*/

use std::borrow::Cow;
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};
use std::ops::Index;

use indexmap::{Equivalent, IndexMap};
use log::{debug, trace};

use crate::pattern::Pattern;

use self::splitter::{split_groups, Fragment};

mod splitter;


/// Body used for named groups that were left empty, like in `(?<foo>)`. An
/// empty body would produce a group that always captures the empty string,
/// instead this matches one or more characters, including newlines.
pub(crate) const ANY_NON_EMPTY: &str = r"[\s\S]+";

/// Maximum length for a group name.
const MAX_NAME_LEN: usize = 51;

/// Key in a [`GroupIndex`].
///
/// Named groups are indexed by their name. Groups without a name, and groups
/// that reuse a name already taken by some group at their left, are indexed
/// by an ordinal number (0, 1, 2, ...) that counts only those groups.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum GroupKey {
    /// Key for a named group.
    Name(String),
    /// Key for an unnamed group.
    Ordinal(usize),
}

/// Borrowed counterpart of [`GroupKey`], used for looking up keys without
/// allocating a `String`.
#[derive(Clone, Copy, Debug, Hash)]
pub(crate) enum KeyRef<'a> {
    Name(&'a str),
    Ordinal(usize),
}

impl GroupKey {
    pub(crate) fn as_key_ref(&self) -> KeyRef<'_> {
        match self {
            GroupKey::Name(name) => KeyRef::Name(name.as_str()),
            GroupKey::Ordinal(n) => KeyRef::Ordinal(*n),
        }
    }

    /// Returns the group name if this key is a [`GroupKey::Name`].
    pub fn as_name(&self) -> Option<&str> {
        match self {
            GroupKey::Name(name) => Some(name.as_str()),
            GroupKey::Ordinal(_) => None,
        }
    }
}

// `GroupKey` and `KeyRef` must produce the same hash for equivalent keys.
impl Hash for GroupKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_key_ref().hash(state)
    }
}

impl Equivalent<GroupKey> for KeyRef<'_> {
    fn equivalent(&self, key: &GroupKey) -> bool {
        match (self, key) {
            (KeyRef::Name(a), GroupKey::Name(b)) => *a == b.as_str(),
            (KeyRef::Ordinal(a), GroupKey::Ordinal(b)) => a == b,
            _ => false,
        }
    }
}

impl Display for GroupKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            GroupKey::Name(name) => write!(f, "{}", name),
            GroupKey::Ordinal(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for GroupKey {
    fn from(name: &str) -> Self {
        GroupKey::Name(name.to_string())
    }
}

impl From<String> for GroupKey {
    fn from(name: String) -> Self {
        GroupKey::Name(name)
    }
}

impl From<usize> for GroupKey {
    fn from(n: usize) -> Self {
        GroupKey::Ordinal(n)
    }
}

/// Maps group names and ordinals to the 1-based index of the capture group
/// in the rewritten pattern.
///
/// Keys are kept in the order in which the groups were found in the pattern.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct GroupIndex {
    map: IndexMap<GroupKey, usize>,
}

impl GroupIndex {
    /// Returns the capture index for the given key.
    pub fn get(&self, key: &GroupKey) -> Option<usize> {
        self.map.get(&key.as_key_ref()).copied()
    }

    /// Returns the capture index of the group with the given name.
    pub fn name(&self, name: &str) -> Option<usize> {
        self.map.get(&KeyRef::Name(name)).copied()
    }

    /// Returns the capture index of the unnamed group with the given
    /// ordinal.
    pub fn ordinal(&self, n: usize) -> Option<usize> {
        self.map.get(&KeyRef::Ordinal(n)).copied()
    }

    /// Returns true if some group has the given name.
    pub fn contains_name(&self, name: &str) -> bool {
        self.map.contains_key(&KeyRef::Name(name))
    }

    /// Iterates over `(key, capture index)` pairs in the order the groups
    /// appear in the pattern.
    pub fn iter(&self) -> impl Iterator<Item = (&GroupKey, usize)> {
        self.map.iter().map(|(key, idx)| (key, *idx))
    }

    /// Number of groups in the index.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// True if the pattern doesn't have capturing groups.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    fn insert(&mut self, key: GroupKey, idx: usize) {
        self.map.insert(key, idx);
    }
}

impl<K: Into<GroupKey>> FromIterator<(K, usize)> for GroupIndex {
    fn from_iter<T: IntoIterator<Item = (K, usize)>>(iter: T) -> Self {
        Self {
            map: iter.into_iter().map(|(key, idx)| (key.into(), idx)).collect(),
        }
    }
}

impl Index<&str> for GroupIndex {
    type Output = usize;

    /// Returns the capture index of the group with the given name.
    ///
    /// # Panics
    ///
    /// If there's no group with that name.
    fn index(&self, name: &str) -> &usize {
        self.map
            .get(&KeyRef::Name(name))
            .unwrap_or_else(|| panic!("no group named `{}`", name))
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for GroupKey {
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for GroupIndex {
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

/// Maps the name of a named group to its source code, as it was when the
/// group was closed. Only the first group with a given name is recorded.
pub type NamedSources = IndexMap<String, String>;

/// Result produced by [`generate`].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Generated {
    /// Engine-native pattern, without named groups or backreferences.
    pub source: String,
    /// Flags for the pattern.
    pub flags: String,
    /// Positional index for each named and unnamed group.
    pub groups: GroupIndex,
    /// Source code for each named group.
    pub named: NamedSources,
}

/// Rewrites `pattern` into an engine-native pattern.
///
/// If `flags` is `None` or empty, the flags are taken from the pattern
/// itself (see [`Pattern::flags`]).
///
/// This function never fails. Patterns that are not valid regular
/// expressions produce garbage that will be rejected by the engine later.
///
/// ```
/// # use named_regexp::generate;
/// let generated = generate("(?<foo>foo)(bar)(?:waah)", None);
///
/// assert_eq!(generated.source, "(foo)(bar)(?:waah)");
/// assert_eq!(generated.groups.name("foo"), Some(1));
/// assert_eq!(generated.groups.ordinal(0), Some(2));
/// ```
pub fn generate<P: Pattern + ?Sized>(
    pattern: &P,
    flags: Option<&str>,
) -> Generated {
    let flags = match flags {
        Some(flags) if !flags.is_empty() => flags.to_string(),
        _ => pattern.flags().into_owned(),
    };

    let fragments = split_groups(pattern.source());
    let mut tracker = GroupTracker::default();

    for (i, fragment) in fragments.iter().enumerate() {
        trace!("fragment {}: {:?}", i, fragment);
        match fragment {
            Fragment::Open => tracker.open(),
            Fragment::Close => tracker.close(),
            Fragment::Text(text) => {
                let after_open =
                    i > 0 && matches!(fragments[i - 1], Fragment::Open);
                let before_close =
                    matches!(fragments.get(i + 1), Some(Fragment::Close));

                if after_open && is_capturing(text) {
                    tracker.capture(text, before_close)
                } else {
                    tracker.source.push_str(text)
                }
            }
        }
    }

    let source = remove_empty_groups(&tracker.source);

    debug!(
        "generated `{}` with {} capture groups from `{}`",
        source,
        tracker.captures,
        pattern.source()
    );

    Generated {
        source,
        flags,
        groups: tracker.groups,
        named: tracker.named,
    }
}

/// A group that has been opened but not closed yet.
#[derive(Debug)]
struct OpenGroup {
    /// Name of the group. Only set for the first group with a given name.
    name: Option<String>,
    /// Offset within the output where the group's body starts.
    start: usize,
}

#[derive(Default)]
struct GroupTracker {
    /// Output produced so far.
    source: String,
    /// Stack of open groups, innermost at the top.
    open: Vec<OpenGroup>,
    /// Number of capturing groups found so far.
    captures: usize,
    /// Number of ordinals assigned so far.
    ordinals: usize,
    groups: GroupIndex,
    named: NamedSources,
}

impl GroupTracker {
    fn open(&mut self) {
        self.source.push('(');
        self.open.push(OpenGroup { name: None, start: self.source.len() });
    }

    fn close(&mut self) {
        // Unbalanced closing parenthesis are passed through, the engine will
        // complain about them.
        if let Some(OpenGroup { name: Some(name), start }) = self.open.pop() {
            if !self.named.contains_key(&name) {
                let body = self.source[start..].to_string();
                self.named.insert(name, body);
            }
        }
        self.source.push(')');
    }

    /// Handles the text that immediately follows the opening parenthesis of
    /// a capturing group. `closes` indicates whether the group is closed
    /// right after `text`.
    fn capture(&mut self, text: &str, closes: bool) {
        self.captures += 1;
        let idx = self.captures;

        let mut body = Cow::Borrowed(text);

        if let Some((name, rest)) = parse_group_header(text) {
            if self.groups.contains_name(name) {
                self.push_ordinal(idx);
            } else {
                self.groups.insert(GroupKey::from(name), idx);
                if let Some(group) = self.open.last_mut() {
                    group.name = Some(name.to_string());
                }
            }
            body = if rest.is_empty() && closes {
                Cow::Borrowed(ANY_NON_EMPTY)
            } else {
                Cow::Borrowed(rest)
            };
        } else {
            // Unnamed groups, and named headers whose name is not valid here.
            // The latter are left untouched for the engine.
            self.push_ordinal(idx);
        }

        let referenced = parse_backref(&body)
            .map(|name| self.named.get(name).cloned().unwrap_or_default());

        if let Some(referenced) = referenced {
            body = Cow::Owned(referenced);
        }

        self.source.push_str(&body);
    }

    fn push_ordinal(&mut self, idx: usize) {
        self.groups.insert(GroupKey::Ordinal(self.ordinals), idx);
        self.ordinals += 1;
    }
}

/// Returns true if `text`, which follows an opening parenthesis, starts a
/// capturing group.
///
/// Every construct starting with `?` is non-capturing (clusters,
/// lookarounds, inline flags, atomic groups), except for named groups and
/// named backreferences. A `?<` or `?P<` header is a named group for the
/// engine even when the name is one we don't recognize, like `(?<über>x)`,
/// so it counts as capturing too.
fn is_capturing(text: &str) -> bool {
    let Some(rest) = text.strip_prefix('?') else {
        return true;
    };

    if rest.starts_with("P<") {
        return true;
    }

    if let Some(rest) = rest.strip_prefix('<') {
        return !rest.starts_with(['=', '!']);
    }

    parse_backref(text).is_some()
}

/// Parses the header of a named group (`?<name>`, `:<name>` or
/// `?P<name>`) at the start of `text`, returning the name and whatever
/// follows the header.
fn parse_group_header(text: &str) -> Option<(&str, &str)> {
    let tail = text
        .strip_prefix("?<")
        .or_else(|| text.strip_prefix(":<"))
        .or_else(|| text.strip_prefix("?P<"))?;

    let len = name_len(tail);
    if len == 0 {
        return None;
    }

    let rest = tail[len..].strip_prefix('>')?;
    Some((&tail[..len], rest))
}

/// Parses a named backreference (`?&name` or `:&name`) at the start of
/// `text` and returns the name.
fn parse_backref(text: &str) -> Option<&str> {
    let tail = text.strip_prefix("?&").or_else(|| text.strip_prefix(":&"))?;
    match name_len(tail) {
        0 => None,
        len => Some(&tail[..len]),
    }
}

/// Returns the length of the group name at the start of `text`, zero if
/// there isn't any.
fn name_len(text: &str) -> usize {
    let mut len = 0;
    for (i, b) in text.bytes().enumerate().take(MAX_NAME_LEN) {
        let valid = match b {
            b'a'..=b'z' | b'A'..=b'Z' | b'_' | b'$' => true,
            b'0'..=b'9' => i > 0,
            _ => false,
        };
        if !valid {
            break;
        }
        len += 1;
    }
    len
}

/// Removes every unescaped `()` from `source`. This is a single pass, so
/// `(())` becomes `()`.
fn remove_empty_groups(source: &str) -> String {
    let mut result = String::with_capacity(source.len());
    let mut chars = source.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                result.push(c);
                if let Some(escaped) = chars.next() {
                    result.push(escaped);
                }
            }
            '(' if chars.peek() == Some(&')') => {
                chars.next();
            }
            _ => result.push(c),
        }
    }

    result
}
