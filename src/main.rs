use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use tasksheet::cli::{Arguments, Command, ExitStatus};
use tasksheet::config::Config;

fn main() -> ExitCode {
    let args = Arguments::parse();

    match args.command {
        Some(Command::Serve(serve_args)) => {
            let config = match Config::resolve(&serve_args) {
                Ok(config) => config,
                Err(err) => {
                    eprintln!("Error: {:#}", err);
                    return ExitStatus::Error.into();
                }
            };

            if let Err(err) = tasksheet::mcp::run_server(config) {
                eprintln!("Error: {:#}", err);
                return ExitStatus::Error.into();
            }
            ExitStatus::Success.into()
        }
        None => {
            Arguments::command().print_help().ok();
            ExitStatus::Success.into()
        }
    }
}
