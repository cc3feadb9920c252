use std::borrow::Cow;
use std::cell::Cell;
use std::thread;

use pretty_assertions::assert_eq;

use crate::{
    Captures, Error, GroupIndex, GroupKey, Literal, NamedRegExp, Replacer,
};

fn re(pattern: &str) -> NamedRegExp {
    NamedRegExp::new(pattern, None).unwrap()
}

fn groups<'t>(caps: &Captures<'t>) -> Vec<(String, Option<&'t str>)> {
    caps.groups().iter().map(|(k, v)| (k.to_string(), *v)).collect()
}

#[test]
fn new_from_empty_pattern() {
    let r = NamedRegExp::new(&None::<&str>, None).unwrap();

    assert_eq!(r.source(), "");
    assert!(r.groups().is_empty());
}

#[test]
fn new_from_string() {
    assert_eq!(re("^string").source(), "^string");
}

#[test]
fn new_from_named_regexp() {
    let original = NamedRegExp::new("(?<a>x)^regex$", Some("gi")).unwrap();
    let r = NamedRegExp::new(&original, None).unwrap();

    assert_eq!(r.to_string(), "/(x)^regex$/gi");
    assert_eq!(r.groups(), original.groups());
    assert_eq!(r.groups().name("a"), Some(1));
    assert_eq!(r.named(), original.named());
}

#[test]
fn display_escapes_slashes() {
    assert_eq!(re("a/b").to_string(), r"/a\/b/");
    assert_eq!(re(r"a\\/b").to_string(), r"/a\\\/b/");
    assert_eq!(re("[/]").to_string(), r"/[\/]/");
}

#[test]
fn exec_unrecognized_group_names() {
    let long = format!("(?<{}>x)(y)", "a".repeat(52));

    for r in [re("(?<über>x)(y)"), re(&long)] {
        let caps = r.exec("xy").unwrap().unwrap();

        assert_eq!(caps.len(), 3);
        assert_eq!(caps.ordinal(0), Some("x"));
        assert_eq!(caps.ordinal(1), Some("y"));
    }
}

#[test]
fn new_from_engine_regex() {
    let regex = fancy_regex::Regex::new("(:<w>\\w+)").unwrap();
    let r = NamedRegExp::new(&regex, Some("g")).unwrap();

    assert_eq!(r.to_string(), r"/(\w+)/g");
    assert_eq!(r.groups().name("w"), Some(1));
}

#[test]
fn parse() {
    let r: NamedRegExp = "(?<foo>foo)".parse().unwrap();
    assert_eq!(r.to_string(), "/(foo)/");
}

#[test]
fn invalid_pattern() {
    let err = NamedRegExp::new("(?<foo>foo", None).unwrap_err();

    assert!(matches!(
        &err,
        Error::Compile { pattern, .. } if pattern == "(foo"
    ));
}

#[test]
fn invalid_flags() {
    assert!(matches!(
        NamedRegExp::new("foo", Some("gx")),
        Err(Error::InvalidFlags(_))
    ));
}

#[test]
fn exec_unnamed_group() {
    let r = re("(foo)");

    assert_eq!(r.groups(), &GroupIndex::from_iter([(0, 1)]));

    let caps = r.exec("foobar").unwrap().unwrap();

    assert_eq!(caps.len(), 2);
    assert_eq!(&caps[0], "foo");
    assert_eq!(&caps[1], "foo");
    assert_eq!(caps.ordinal(0), Some("foo"));
    assert_eq!(groups(&caps), vec![("0".to_string(), Some("foo"))]);

    assert_eq!(r.exec("bar").unwrap(), None);
}

#[test]
fn exec_cluster() {
    let r = re("(?:foo)");

    assert_eq!(r.source(), "(?:foo)");
    assert!(r.groups().is_empty());
    assert!(r.exec("foo").unwrap().unwrap().groups().is_empty());
    assert_eq!(r.exec("bar").unwrap(), None);
}

#[test]
fn exec_named_group() {
    let r = re("(?<foo>foo)");

    assert_eq!(r.source(), "(foo)");

    let caps = r.exec("foo").unwrap().unwrap();

    assert_eq!(caps.get(1), Some("foo"));
    assert_eq!(caps.name("foo"), Some("foo"));
    assert_eq!(&caps["foo"], "foo");
}

#[test]
fn exec_named_and_unnamed() {
    let r = re("(foo)(?<bar>bar)");

    assert_eq!(r.source(), "(foo)(bar)");

    let caps = r.exec("foofoobar").unwrap().unwrap();

    assert_eq!(caps.index(), 3);
    assert_eq!(caps.as_str(), "foobar");
    assert_eq!(caps.input(), "foofoobar");
    assert_eq!(
        groups(&caps),
        vec![
            ("0".to_string(), Some("foo")),
            ("bar".to_string(), Some("bar"))
        ]
    );
}

#[test]
fn exec_non_participating_group() {
    let r = re("(:<foo>(?:foo)+)(?<bar>bar)(bar)?");

    assert_eq!(r.source(), "((?:foo)+)(bar)(bar)?");

    let caps = r.exec("foofoobarbar").unwrap().unwrap();

    assert_eq!(caps.name("foo"), Some("foofoo"));
    assert_eq!(caps.name("bar"), Some("bar"));
    assert_eq!(caps.ordinal(0), Some("bar"));

    let caps = r.exec("foofoobar").unwrap().unwrap();

    assert_eq!(caps.get(3), None);
    assert_eq!(caps.ordinal(0), None);
    assert_eq!(caps.groups().get(&GroupKey::Ordinal(0)), Some(&None));

    assert_eq!(r.exec("bar").unwrap(), None);
}

#[test]
fn exec_repeated_name() {
    let r = re("(:<foo>(?:foo)+)(?<foo>bar)(bar)?");

    let caps = r.exec("foofoobar").unwrap().unwrap();

    assert_eq!(
        groups(&caps),
        vec![
            ("foo".to_string(), Some("foofoo")),
            ("0".to_string(), Some("bar")),
            ("1".to_string(), None),
        ]
    );
}

#[test]
fn exec_with_backreference() {
    let r = re(r"aaa(?<bb>\(cc\)bb(dd(?<ee>ee))(?<ff>)(?&ee))zzz");
    let caps = r.exec("000aaa(cc)bbddeehahahaeezzz111").unwrap().unwrap();

    assert_eq!(caps.index(), 3);
    assert_eq!(
        (0..caps.len()).map(|i| caps.get(i)).collect::<Vec<_>>(),
        vec![
            Some("aaa(cc)bbddeehahahaeezzz"),
            Some("(cc)bbddeehahahaee"),
            Some("ddee"),
            Some("ee"),
            Some("hahaha"),
            Some("ee"),
        ]
    );
    assert_eq!(caps.name("ff"), Some("hahaha"));
    assert_eq!(caps.ordinal(1), Some("ee"));
}

#[test]
fn empty_named_group_matches_newlines() {
    let r = re("<(?<body>)>");
    let caps = r.exec("<a\nb>").unwrap().unwrap();

    assert_eq!(caps.name("body"), Some("a\nb"));
    assert!(!r.test("<>").unwrap());
}

#[test]
fn match_is_exec() {
    let r = re("(:<foo>(?:foo)+)(?<bar>bar)(bar)?");

    assert_eq!(r.match_("foofoobar").unwrap(), r.exec("foofoobar").unwrap());
    assert_eq!(r.match_("bar").unwrap(), None);
}

#[test]
fn test_for_match() {
    assert!(re("(foo)").test("foobar").unwrap());
    assert!(!re("(foo)").test("bar").unwrap());
    assert!(re("(?<foo>foo)(?<bar>bar)").test("foobar").unwrap());
    assert!(!re("(?<foo>foo)(?<bar>bar)").test("bar").unwrap());
    assert!(re("(:<foo>foo|bar)").test("bar").unwrap());
}

#[test]
fn flags() {
    let r = NamedRegExp::new("^(?<w>b)", Some("im")).unwrap();

    assert!(r.flags().case_insensitive);
    assert!(r.flags().multi_line);
    assert!(r.test("a\nB").unwrap());
    assert_eq!(r.to_string(), "/^(b)/im");

    let r = NamedRegExp::new("a.b", Some("s")).unwrap();
    assert!(r.test("a\nb").unwrap());
    assert!(!re("a.b").test("a\nb").unwrap());
}

#[test]
fn lookaround() {
    let r = re("(?<=\\$)(?<amount>\\d+)(?!%)");

    assert_eq!(r.groups().name("amount"), Some(1));
    assert_eq!(r.exec("10% or $25").unwrap().unwrap().name("amount"), Some("25"));
}

#[test]
fn replace_literal_string() {
    assert_eq!(re("(foo)").replace("foo", "bar").unwrap(), "bar");
    assert_eq!(
        re("(?<foo>(?:foo){3})").replace("foofoofoofoo", "bar").unwrap(),
        "barfoo"
    );
}

#[test]
fn replace_named_placeholders() {
    let r = re(r"(:<y>\d+)-(:<m>\d+)-(:<d>\d+)");

    assert_eq!(
        r.replace("2017-01-02", "day: $+{d}, month: $+{m}, year: $+{y}")
            .unwrap(),
        "day: 02, month: 01, year: 2017"
    );
}

#[test]
fn replace_unknown_placeholder() {
    let r = re(r"(:<y>\d+)-(:<m>\d+)-(:<d>\d+)");

    assert_eq!(
        r.replace(
            "date 2017-01-02",
            "$+{date} day:$+{d} month:$+{m} year:$+{y}"
        )
        .unwrap(),
        "date  day:02 month:01 year:2017"
    );
}

#[test]
fn replace_engine_tokens() {
    let r = re(r"(:<k>\w+)=(\w+)");

    assert_eq!(r.replace("a=b;", "$2=$1").unwrap(), "b=a;");
    assert_eq!(r.replace("a=b;", "${2}0").unwrap(), "b0;");
    assert_eq!(r.replace("x a=b;", "[$&]").unwrap(), "x [a=b];");
    assert_eq!(r.replace("x a=b;", "<$`|$'>").unwrap(), "x <x |;>;");
    assert_eq!(r.replace("a=b", "$$1 $9 $x").unwrap(), "$1 $9 $x");
    assert_eq!(r.replace("a=b", "$+{nope").unwrap(), "$+{nope");
}

#[test]
fn replace_with_closure() {
    let r = re(r"(:<y>\d+)-(:<m>\d+)-(:<d>\d+)");

    let result = r
        .replace("2016-11-22", |caps: &Captures, g: &GroupIndex| {
            format!(
                "day: {}, month: {}, year: {}",
                &caps[g["d"]], &caps[g["m"]], &caps[g["y"]]
            )
        })
        .unwrap();

    assert_eq!(result, "day: 22, month: 11, year: 2016");
}

#[test]
fn replace_with_literal() {
    let r = re("regex");

    assert_eq!(r.replace("string", Literal("x")).unwrap(), "string");
    assert_eq!(r.replace("a regex", Literal("$&")).unwrap(), "a $&");
    assert_eq!(r.replace("a regex", Literal(42)).unwrap(), "a 42");
}

#[test]
fn replace_global() {
    let r = NamedRegExp::new("(?<d>\\d)", Some("g")).unwrap();

    assert_eq!(r.replace("a1b2c3", "<$+{d}>").unwrap(), "a<1>b<2>c<3>");
    assert_eq!(re("(?<d>\\d)").replace("a1b2", "<$+{d}>").unwrap(), "a<1>b2");
}

#[test]
fn replace_global_empty_matches() {
    let r = NamedRegExp::new("x*", Some("g")).unwrap();
    assert_eq!(r.replace("aé", "-").unwrap(), "-a-é-");
}

#[test]
fn replace_without_match_borrows() {
    let result = re("(foo)").replace("bar", "baz").unwrap();
    assert!(matches!(result, std::borrow::Cow::Borrowed("bar")));
}

#[test]
fn split() {
    let r = re("(:<foo>foo)+");

    assert_eq!(
        r.split("afoofoofooz").unwrap(),
        vec![Some("a"), Some("foo"), Some("z")]
    );
    assert_eq!(r.split("az").unwrap(), vec![Some("az")]);
}

#[test]
fn split_non_participating_group() {
    let r = re(",(?<sp> )?");

    assert_eq!(
        r.split("a, b,c").unwrap(),
        vec![Some("a"), Some(" "), Some("b"), None, Some("c")]
    );
}

#[test]
fn split_empty_matches() {
    let r = re("");

    assert_eq!(r.split("abc").unwrap(), vec![Some("a"), Some("b"), Some("c")]);
    assert_eq!(r.split("").unwrap(), Vec::<Option<&str>>::new());
    assert_eq!(re("x").split("").unwrap(), vec![Some("")]);
}

/// A template that counts how many times it is asked for, and panics if
/// it is ever expanded match by match.
struct CountingTemplate<'a> {
    calls: &'a Cell<usize>,
}

impl Replacer for CountingTemplate<'_> {
    fn replace_append(
        &mut self,
        _caps: &Captures<'_>,
        _groups: &GroupIndex,
        _dst: &mut String,
    ) {
        panic!("templates must be expanded by `replace`")
    }

    fn template(&mut self) -> Option<Cow<'_, str>> {
        self.calls.set(self.calls.get() + 1);
        Some(Cow::Borrowed("<$+{v}>"))
    }
}

#[test]
fn replace_resolves_template_once() {
    let r = NamedRegExp::new("(:<v>[aeiou])", Some("g")).unwrap();
    let calls = Cell::new(0);

    assert_eq!(
        r.replace("banana", CountingTemplate { calls: &calls }).unwrap(),
        "b<a>n<a>n<a>"
    );
    assert_eq!(calls.get(), 1);
}

#[test]
fn search() {
    let r = re("(:<foo>foo)+");

    assert_eq!(r.search("afoofoofooz").unwrap(), Some(1));
    assert_eq!(r.search("az").unwrap(), None);
}

#[test]
fn share_between_threads() {
    let r = re(r"(?<word>\w+)");

    thread::scope(|s| {
        for text in ["alpha", "beta", "gamma"] {
            let r = &r;
            s.spawn(move || {
                let caps = r.exec(text).unwrap().unwrap();
                assert_eq!(caps.name("word"), Some(text));
            });
        }
    });
}
