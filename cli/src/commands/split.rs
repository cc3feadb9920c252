use clap::{ArgMatches, Command};
use yansi::Paint;

use crate::commands::{
    output_format, print_json, regexp_from_args, with_pattern_args,
    with_text_arg,
};
use crate::config::{Config, OutputFormat};

pub fn split() -> Command {
    with_text_arg(with_pattern_args(
        super::command("split")
            .about("Split the text at each match, including captured groups"),
    ))
}

pub fn exec_split(args: &ArgMatches, config: &Config) -> anyhow::Result<bool> {
    let re = regexp_from_args(args, config)?;
    let text = args.get_one::<String>("TEXT").unwrap();

    let pieces = re.split(text)?;

    match output_format(args, config) {
        OutputFormat::Json => print_json(&pieces)?,
        OutputFormat::Text => {
            for piece in &pieces {
                match piece {
                    Some(piece) => println!("{}", piece),
                    // Groups that didn't participate in the separator.
                    None => println!("{}", "<none>".dim()),
                }
            }
        }
    }

    Ok(true)
}
