mod commands;
mod config;
mod help;

#[cfg(test)]
mod tests;

use std::{io, process};

use crossterm::tty::IsTty;
use yansi::Color::Red;
use yansi::Paint;

use crate::commands::cli;
use crate::config::{load_config_from_file, Config};

const APP_HELP_TEMPLATE: &str = r#"nre {version}, regular expressions with named groups.

{author-with-newline}
{before-help}{usage-heading}
  {usage}

{all-args}{after-help}
"#;

// Same exit codes as grep.
const EXIT_NO_MATCH: i32 = 1;
const EXIT_ERROR: i32 = 2;
const CONFIG_FILE: &str = ".nre.toml";

fn main() -> anyhow::Result<()> {
    // Enable support for ANSI escape codes in Windows. In other platforms
    // this is a no-op.
    if let Err(err) = enable_ansi_support::enable_ansi_support() {
        println!("could not enable ANSI support: {}", err)
    }

    #[cfg(feature = "logging")]
    env_logger::init();

    // If stdout is not a tty (for example, because it was redirected to a
    // file) turn off colors.
    if !io::stdout().is_tty() {
        yansi::disable();
    }

    let args = cli().get_matches();

    let config_file = match args.get_one::<std::path::PathBuf>("config") {
        Some(path) => Some(path.clone()),
        None => home::home_dir()
            .filter(|home_path| !home_path.as_os_str().is_empty())
            .map(|home_path| home_path.join(CONFIG_FILE)),
    };

    // A config file passed with `--config` must be valid, the default one
    // is ignored if it doesn't exist or can't be loaded.
    let config: Config = match config_file {
        Some(path) if args.contains_id("config") => {
            match load_config_from_file(&path) {
                Ok(config) => config,
                Err(err) => {
                    report_error(&anyhow::anyhow!(
                        "can not load `{}`: {}",
                        path.display(),
                        err
                    ));
                    process::exit(EXIT_ERROR);
                }
            }
        }
        Some(path) => load_config_from_file(&path).unwrap_or_default(),
        None => Config::default(),
    };

    log::debug!("using config: {:?}", config);

    let result = match args.subcommand() {
        Some(("compile", args)) => commands::exec_compile(args, &config),
        Some(("exec", args)) => commands::exec_exec(args, &config),
        Some(("replace", args)) => commands::exec_replace(args, &config),
        Some(("search", args)) => commands::exec_search(args, &config),
        Some(("split", args)) => commands::exec_split(args, &config),
        _ => unreachable!(),
    };

    match result {
        Ok(true) => Ok(()),
        Ok(false) => process::exit(EXIT_NO_MATCH),
        Err(err) => {
            report_error(&err);
            process::exit(EXIT_ERROR);
        }
    }
}

fn report_error(err: &anyhow::Error) {
    if let Some(source) = err.source() {
        eprintln!("{} {}: {}", "error:".paint(Red).bold(), err, source);
    } else {
        eprintln!("{} {}", "error:".paint(Red).bold(), err);
    }
}
