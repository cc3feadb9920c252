use clap::{ArgMatches, Command};
use serde_json::json;
use yansi::Color::{Cyan, Green};
use yansi::Paint;

use crate::commands::{
    output_format, print_json, regexp_from_args, with_pattern_args,
};
use crate::config::{Config, OutputFormat};

pub fn compile() -> Command {
    with_pattern_args(
        super::command("compile")
            .about("Show the rewritten pattern and the index of its groups"),
    )
}

pub fn exec_compile(
    args: &ArgMatches,
    config: &Config,
) -> anyhow::Result<bool> {
    let re = regexp_from_args(args, config)?;

    match output_format(args, config) {
        OutputFormat::Json => print_json(&json!({
            "source": re.source(),
            "flags": re.flags().to_string(),
            "groups": re.groups(),
            "named": re.named(),
        }))?,
        OutputFormat::Text => {
            println!("{}", re.paint(Green).bold());
            for (key, idx) in re.groups().iter() {
                println!("  {} => {}", key.paint(Cyan), idx);
            }
            for (name, source) in re.named() {
                println!("  {}: {}", name.paint(Cyan), source);
            }
        }
    }

    Ok(true)
}
