mod compile;
mod exec;
mod replace;
mod search;
mod split;

pub use compile::*;
pub use exec::*;
pub use replace::*;
pub use search::*;
pub use split::*;

use std::path::PathBuf;

use anyhow::{anyhow, Context};
use clap::{arg, command, crate_authors, value_parser, ArgMatches, Command};
use named_regexp::NamedRegExp;

use crate::config::{Config, OutputFormat};
use crate::{commands, help, APP_HELP_TEMPLATE};

pub fn command(name: &'static str) -> Command {
    Command::new(name).help_template(
        r#"{about-with-newline}
{usage-heading}
  {usage}

{all-args}
"#,
    )
}

pub fn cli() -> Command {
    command!()
        .author(crate_authors!("\n")) // requires `cargo` feature
        .arg_required_else_help(true)
        .arg(
            arg!(-C --config <CONFIG_FILE> "Config file")
                .value_parser(existing_path_parser)
                .long_help(help::CONFIG_FILE),
        )
        .arg(
            arg!(-o --"output-format" <FORMAT>)
                .help("Output format")
                .long_help(help::OUTPUT_FORMAT_LONG_HELP)
                .value_parser(value_parser!(OutputFormat))
                .global(true),
        )
        .help_template(APP_HELP_TEMPLATE)
        .subcommand_required(true)
        .subcommands(vec![
            commands::compile(),
            commands::exec(),
            commands::replace(),
            commands::search(),
            commands::split(),
        ])
}

/// Adds the arguments shared by every command: the pattern and its flags.
fn with_pattern_args(command: Command) -> Command {
    command
        .arg(
            arg!(<PATTERN>)
                .help("Regular expression with named groups")
                .long_help(help::PATTERN_LONG_HELP),
        )
        .arg(
            arg!(-f --flags <FLAGS>)
                .help("Flags for the regular expression")
                .long_help(help::FLAGS_LONG_HELP),
        )
}

/// Adds the `TEXT` argument to commands that match against some text.
fn with_text_arg(command: Command) -> Command {
    command.arg(arg!(<TEXT>).help("Text to match against"))
}

/// Builds the [`NamedRegExp`] from the `PATTERN` and `--flags` arguments.
/// If `--flags` is missing, the flags in the config file are used.
fn regexp_from_args(
    args: &ArgMatches,
    config: &Config,
) -> anyhow::Result<NamedRegExp> {
    let pattern = args.get_one::<String>("PATTERN").unwrap();
    let flags = args
        .get_one::<String>("flags")
        .map(String::as_str)
        .unwrap_or(config.default_flags.as_str());

    NamedRegExp::new(pattern, Some(flags))
        .with_context(|| format!("can not compile `{}`", pattern))
}

/// Prints `value` to stdout as a single line of JSON.
fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string(value)?);
    Ok(())
}

/// Returns the output format from the `--output-format` argument, or from
/// the config file if the argument is missing.
fn output_format(args: &ArgMatches, config: &Config) -> OutputFormat {
    args.get_one::<OutputFormat>("output-format")
        .copied()
        .unwrap_or(config.output_format)
}

/// Parses a path and makes sure that it exists.
fn existing_path_parser(input: &str) -> Result<PathBuf, anyhow::Error> {
    let path = PathBuf::from(input);
    if path.try_exists()? {
        Ok(path)
    } else {
        Err(anyhow!("file not found"))
    }
}
