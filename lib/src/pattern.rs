use std::borrow::Cow;

/// The [`Pattern`] trait represents anything that can be turned into a
/// [`crate::NamedRegExp`].
///
/// Raw strings are patterns without flags. Already compiled regular
/// expressions expose their source code and, optionally, their flags.
pub trait Pattern {
    /// Must return the pattern source code, without any delimiters like `/`.
    /// For instance, if the regexp is `/foo/i`, this must return "foo".
    fn source(&self) -> &str;

    /// Must return true if the pattern is case-insensitive. For instance,
    /// this is true for `/foo/i`.
    fn case_insensitive(&self) -> bool {
        false
    }

    /// Must return true if `^` and `$` match at line boundaries. For
    /// instance, this is true for `/foo/m`.
    fn multi_line(&self) -> bool {
        false
    }

    /// Must return true if the pattern replaces every match instead of the
    /// first one. For instance, this is true for `/foo/g`.
    fn global(&self) -> bool {
        false
    }

    /// Returns the flags for this pattern.
    ///
    /// By default, the flags are derived from [`Pattern::case_insensitive`],
    /// [`Pattern::multi_line`] and [`Pattern::global`].
    fn flags(&self) -> Cow<'_, str> {
        let mut flags = String::new();
        if self.case_insensitive() {
            flags.push('i');
        }
        if self.multi_line() {
            flags.push('m');
        }
        if self.global() {
            flags.push('g');
        }
        Cow::Owned(flags)
    }
}

impl Pattern for str {
    #[inline]
    fn source(&self) -> &str {
        self
    }
}

impl Pattern for String {
    #[inline]
    fn source(&self) -> &str {
        self.as_str()
    }
}

impl Pattern for fancy_regex::Regex {
    #[inline]
    fn source(&self) -> &str {
        self.as_str()
    }
}

impl<P: Pattern + ?Sized> Pattern for &P {
    #[inline]
    fn source(&self) -> &str {
        (**self).source()
    }

    #[inline]
    fn case_insensitive(&self) -> bool {
        (**self).case_insensitive()
    }

    #[inline]
    fn multi_line(&self) -> bool {
        (**self).multi_line()
    }

    #[inline]
    fn global(&self) -> bool {
        (**self).global()
    }

    #[inline]
    fn flags(&self) -> Cow<'_, str> {
        (**self).flags()
    }
}

/// A missing pattern is the same as the empty pattern.
impl<P: Pattern> Pattern for Option<P> {
    fn source(&self) -> &str {
        self.as_ref().map_or("", |pattern| pattern.source())
    }

    fn flags(&self) -> Cow<'_, str> {
        self.as_ref().map_or(Cow::Borrowed(""), |pattern| pattern.flags())
    }
}
