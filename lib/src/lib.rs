/*! Named capture groups and named backreferences for regular expressions.

The regular expression engine used by this crate only exposes capture groups
by position. This crate rewrites patterns that use named groups into patterns
that the engine understands, and keeps an index that maps each group name to
the position where the engine reports it.

Named groups can be written in two ways: `(?<name>...)` and `(:<name>...)`.
The second one is useful when the pattern must pass through validators that
reject `?<`. Named backreferences, `(?&name)` or `(:&name)`, are replaced
with the source code of the group they refer to, so they match the same
pattern, not the same text.

There are two main pieces in this crate. The [`generate`] function performs
the rewrite and returns the engine-native pattern together with a
[`GroupIndex`]. The [`NamedRegExp`] type compiles the rewritten pattern and
provides name-aware `exec`, `replace`, `split` and `search` operations.

# Example

```rust
# use named_regexp::NamedRegExp;
let re = NamedRegExp::new("(?<foo>foo)(bar)(?:waah)", None).unwrap();

assert_eq!(re.source(), "(foo)(bar)(?:waah)");

let caps = re.exec("nanafoobarwaah").unwrap().unwrap();

assert_eq!(caps.index(), 4);
assert_eq!(caps.name("foo"), Some("foo"));
assert_eq!(caps.ordinal(0), Some("bar"));
```
*/

#![deny(missing_docs)]

pub use errors::Error;

pub use generator::generate;
pub use generator::Generated;
pub use generator::GroupIndex;
pub use generator::GroupKey;
pub use generator::NamedSources;

pub use pattern::Pattern;

pub use regexp::Captures;
pub use regexp::Flags;
pub use regexp::Literal;
pub use regexp::NamedRegExp;
pub use regexp::Replacer;

mod errors;
mod generator;
mod pattern;
mod regexp;
