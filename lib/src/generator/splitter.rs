/// A piece of a pattern produced by [`split_groups`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Fragment<'a> {
    /// An unescaped `(`.
    Open,
    /// An unescaped `)`.
    Close,
    /// Anything between two parenthesis, possibly empty. Escaped parenthesis
    /// are kept verbatim inside the text.
    Text(&'a str),
}

/// Splits `pattern` at every unescaped parenthesis.
///
/// The resulting sequence always starts and ends with a [`Fragment::Text`],
/// and text fragments alternate with parenthesis, so `((a))` produces:
///
/// ```text
/// Text(""), Open, Text(""), Open, Text("a"), Close, Text(""), Close, Text("")
/// ```
///
/// A backslash escapes the character that follows it, whatever it is. This
/// means that `\\(` is an escaped backslash followed by an opening
/// parenthesis.
pub(crate) fn split_groups(pattern: &str) -> Vec<Fragment<'_>> {
    let mut fragments = Vec::new();
    let mut text_start = 0;
    let mut chars = pattern.char_indices();

    while let Some((pos, c)) = chars.next() {
        let paren = match c {
            '\\' => {
                chars.next();
                continue;
            }
            '(' => Fragment::Open,
            ')' => Fragment::Close,
            _ => continue,
        };
        fragments.push(Fragment::Text(&pattern[text_start..pos]));
        fragments.push(paren);
        text_start = pos + 1;
    }

    fragments.push(Fragment::Text(&pattern[text_start..]));
    fragments
}
