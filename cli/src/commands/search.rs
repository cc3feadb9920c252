use clap::{ArgMatches, Command};
use serde_json::json;

use crate::commands::{
    output_format, print_json, regexp_from_args, with_pattern_args,
    with_text_arg,
};
use crate::config::{Config, OutputFormat};

pub fn search() -> Command {
    with_text_arg(with_pattern_args(
        super::command("search")
            .about("Show the byte offset of the first match, or -1"),
    ))
}

pub fn exec_search(
    args: &ArgMatches,
    config: &Config,
) -> anyhow::Result<bool> {
    let re = regexp_from_args(args, config)?;
    let text = args.get_one::<String>("TEXT").unwrap();

    let offset = re.search(text)?;

    match output_format(args, config) {
        OutputFormat::Json => print_json(&json!({ "offset": offset }))?,
        OutputFormat::Text => match offset {
            Some(offset) => println!("{}", offset),
            None => println!("-1"),
        },
    }

    Ok(offset.is_some())
}
