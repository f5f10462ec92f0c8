// crates/hxcrepair-cli/src/main.rs

use std::process::ExitCode;

use clap::{CommandFactory, Parser};

mod cmd;
mod io;
mod logging;

#[derive(Parser)]
#[command(name = "hxcrepair-cli")]
#[command(
    about = "Repairs missing sectors in HxC XML dumps; writes the fixed XML to stdout",
    long_about = None
)]
pub struct Cli {
    #[command(flatten)]
    pub repair: cmd::repair::RepairArgs,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // --help/--version go to stdout and succeed; anything else is a usage error
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    if let Err(err) = logging::init_logging() {
        eprintln!("Err: {err:#}");
        return ExitCode::FAILURE;
    }

    let Some(input) = cli.repair.input.as_deref() else {
        return help("Filename missing");
    };
    if let Err(err) = io::xml_file::check_input(input) {
        return help(&format!("{err:#}"));
    }

    match cmd::repair::run(input) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Err: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn help(message: &str) -> ExitCode {
    eprintln!("Err: {message}");
    eprintln!("{}", Cli::command().render_help());
    ExitCode::FAILURE
}
