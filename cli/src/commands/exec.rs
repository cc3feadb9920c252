use clap::{ArgMatches, Command};
use serde_json::json;
use yansi::Color::{Cyan, Green, Yellow};
use yansi::Paint;

use crate::commands::{
    output_format, print_json, regexp_from_args, with_pattern_args,
    with_text_arg,
};
use crate::config::{Config, OutputFormat};

pub fn exec() -> Command {
    with_text_arg(with_pattern_args(
        super::command("exec")
            .about("Find the first match and show what each group captured"),
    ))
}

pub fn exec_exec(args: &ArgMatches, config: &Config) -> anyhow::Result<bool> {
    let re = regexp_from_args(args, config)?;
    let text = args.get_one::<String>("TEXT").unwrap();

    let caps = re.exec(text)?;

    match (output_format(args, config), &caps) {
        (OutputFormat::Json, None) => print_json(&serde_json::Value::Null)?,
        (OutputFormat::Json, Some(caps)) => print_json(&json!({
            "index": caps.index(),
            "match": caps.as_str(),
            "groups": caps.groups(),
        }))?,
        (OutputFormat::Text, None) => println!("{}", "no match".paint(Yellow)),
        (OutputFormat::Text, Some(caps)) => {
            println!(
                "{} at {}",
                caps.as_str().paint(Green).bold(),
                caps.index()
            );
            for (key, captured) in caps.groups() {
                match captured {
                    Some(captured) => {
                        println!("  {}: {}", key.paint(Cyan), captured)
                    }
                    None => println!("  {}: {}", key.paint(Cyan), "-".dim()),
                }
            }
        }
    }

    Ok(caps.is_some())
}
