pub const CONFIG_FILE: &str = r#"Config file for nre

Specifies a config file which controls the behavior of nre. If config file is not
specified, ${HOME}/.nre.toml is used. If it does not exist the default options are
applied.

Supported options:

default_flags = "i"       # flags used when --flags is not given
output_format = "json"    # either "text" or "json""#;

pub const FLAGS_LONG_HELP: &str = r#"Flags for the regular expression

Any combination of:

g   replace every match instead of the first one
i   case-insensitive matching
m   ^ and $ match at the start and end of each line
s   . matches newlines too

Overrides the `default_flags` option in the config file."#;

pub const PATTERN_LONG_HELP: &str = r#"Regular expression with named groups

Named groups are written as (?<name>...) or (:<name>...), named backreferences
as (?&name) or (:&name). A named backreference matches the same pattern as the
group it refers to, not necessarily the same text.

Examples:

(?<year>\d{4})-(?<month>\d{2})
(:<word>\w+) (?&word)"#;

pub const REPLACEMENT_LONG_HELP: &str = r#"Replacement for the matched text

The following placeholders are supported:

$+{name}   text captured by the group `name`
$1, ${1}   text captured by the first group
$&         the whole match
$`         text before the match
$'         text after the match
$$         a literal $

Example:

nre replace '(?<y>\d+)-(?<m>\d+)' '2017-01' '$+{m}/$+{y}'"#;

pub const OUTPUT_FORMAT_LONG_HELP: &str = r#"Output format

The `text` format is meant for humans, `json` produces a single JSON object
that can be processed with other tools.

Overrides the `output_format` option in the config file."#;
