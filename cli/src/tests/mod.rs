use assert_cmd::Command;
use predicates::prelude::*;

/// Returns a command for running `nre` that doesn't pick up the config file
/// in the user's home directory.
fn nre() -> Command {
    let mut cmd = Command::cargo_bin("nre").unwrap();
    cmd.env("HOME", "src/tests/testdata");
    cmd
}

#[test]
fn cli_compile() {
    nre()
        .arg("compile")
        .arg("(?<foo>foo)(bar)(?:waah)")
        .assert()
        .success()
        .stdout(predicate::str::contains("/(foo)(bar)(?:waah)/"))
        .stdout(predicate::str::contains("foo => 1"))
        .stdout(predicate::str::contains("0 => 2"))
        .stdout(predicate::str::contains("foo: foo"));
}

#[test]
fn cli_compile_json() {
    nre()
        .arg("compile")
        .arg("--output-format=json")
        .arg("(:<n>\\d+)-(?&n)")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""source":"(\\d+)-(\\d+)""#))
        .stdout(predicate::str::contains(r#""n":1"#))
        .stdout(predicate::str::contains(r#""0":2"#));
}

#[test]
fn cli_exec() {
    nre()
        .arg("exec")
        .arg("(?<y>\\d+)-(?<m>\\d+)")
        .arg("on 2017-01")
        .assert()
        .success()
        .stdout(predicate::str::contains("2017-01 at 3"))
        .stdout(predicate::str::contains("y: 2017"))
        .stdout(predicate::str::contains("m: 01"));
}

#[test]
fn cli_exec_no_match() {
    nre()
        .arg("exec")
        .arg("(?<y>\\d+)")
        .arg("no digits here")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("no match"));
}

#[test]
fn cli_exec_json() {
    nre()
        .arg("exec")
        .arg("-o")
        .arg("json")
        .arg("(?<y>\\d+)-(?<m>\\d+)")
        .arg("on 2017-01")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""index":3"#))
        .stdout(predicate::str::contains(r#""m":"01""#))
        .stdout(predicate::str::contains(r#""y":"2017""#));
}

#[test]
fn cli_replace() {
    nre()
        .arg("replace")
        .arg("(?<y>\\d+)-(?<m>\\d+)")
        .arg("2017-01")
        .arg("$+{m}/$+{y}")
        .assert()
        .success()
        .stdout("01/2017\n");
}

#[test]
fn cli_replace_global() {
    nre()
        .arg("replace")
        .arg("--flags=g")
        .arg("(:<v>[aeiou])")
        .arg("banana")
        .arg("<$+{v}>")
        .assert()
        .success()
        .stdout("b<a>n<a>n<a>\n");
}

#[test]
fn cli_replace_literal() {
    nre()
        .arg("replace")
        .arg("--literal")
        .arg("(?<y>\\d+)")
        .arg("year 2017")
        .arg("$+{y}")
        .assert()
        .success()
        .stdout("year $+{y}\n");
}

#[test]
fn cli_replace_no_match() {
    nre()
        .arg("replace")
        .arg("(?<y>\\d+)")
        .arg("no digits")
        .arg("x")
        .assert()
        .code(1)
        .stdout("no digits\n");
}

#[test]
fn cli_search() {
    nre()
        .arg("search")
        .arg("(?<bar>bar)")
        .arg("foobar")
        .assert()
        .success()
        .stdout("3\n");

    nre()
        .arg("search")
        .arg("(?<bar>bar)")
        .arg("foo")
        .assert()
        .code(1)
        .stdout("-1\n");
}

#[test]
fn cli_split() {
    nre()
        .arg("split")
        .arg("--output-format=json")
        .arg("(:<foo>foo)+")
        .arg("afoofoofooz")
        .assert()
        .success()
        .stdout("[\"a\",\"foo\",\"z\"]\n");
}

#[test]
fn cli_invalid_pattern() {
    nre()
        .arg("exec")
        .arg("(?<foo>foo")
        .arg("foo")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("error:"))
        .stderr(predicate::str::contains("can not compile"));
}

#[test]
fn cli_invalid_flags() {
    nre()
        .arg("exec")
        .arg("--flags=x")
        .arg("foo")
        .arg("foo")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("error:"));
}

#[test]
fn cli_config_file() {
    // The config file sets `i` as the default flags and JSON as the output
    // format.
    nre()
        .arg("--config")
        .arg("src/tests/testdata/config.toml")
        .arg("search")
        .arg("(?<foo>FOO)")
        .arg("xfoo")
        .assert()
        .success()
        .stdout("{\"offset\":1}\n");
}

#[test]
fn cli_config_file_overridden() {
    nre()
        .arg("--config")
        .arg("src/tests/testdata/config.toml")
        .arg("search")
        .arg("--flags=m")
        .arg("--output-format=text")
        .arg("(?<foo>FOO)")
        .arg("xfoo")
        .assert()
        .code(1)
        .stdout("-1\n");
}

#[test]
fn cli_invalid_config_file() {
    nre()
        .arg("--config")
        .arg("src/tests/testdata/invalid.toml")
        .arg("search")
        .arg("foo")
        .arg("foo")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("can not load"));
}
