use std::borrow::Cow;

use clap::{arg, ArgMatches, Command};
use named_regexp::Literal;
use serde_json::json;

use crate::commands::{
    output_format, print_json, regexp_from_args, with_pattern_args,
    with_text_arg,
};
use crate::config::{Config, OutputFormat};
use crate::help;

pub fn replace() -> Command {
    with_text_arg(with_pattern_args(
        super::command("replace")
            .about("Replace the first match, or every match with the `g` flag"),
    ))
    .arg(
        arg!(<REPLACEMENT>)
            .help("Replacement for the matched text")
            .long_help(help::REPLACEMENT_LONG_HELP),
    )
    .arg(
        arg!(-l --literal)
            .help("Use the replacement verbatim, without expanding placeholders"),
    )
}

pub fn exec_replace(
    args: &ArgMatches,
    config: &Config,
) -> anyhow::Result<bool> {
    let re = regexp_from_args(args, config)?;
    let text = args.get_one::<String>("TEXT").unwrap();
    let replacement = args.get_one::<String>("REPLACEMENT").unwrap();

    let result = if args.get_flag("literal") {
        re.replace(text, Literal(replacement))?
    } else {
        re.replace(text, replacement)?
    };

    let replaced = matches!(result, Cow::Owned(_));

    match output_format(args, config) {
        OutputFormat::Json => print_json(&json!({
            "replaced": replaced,
            "result": result,
        }))?,
        OutputFormat::Text => println!("{}", result),
    }

    Ok(replaced)
}
