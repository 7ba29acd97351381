//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

use curbside_cli::CliError;

fn main() {
    match curbside_cli::run() {
        Ok(()) => {}
        // Help and version requests are reported by clap itself.
        Err(CliError::ArgumentParsing(err)) => err.exit(),
        Err(err) => {
            eprintln!("curbside: {err}");
            std::process::exit(1);
        }
    }
}
