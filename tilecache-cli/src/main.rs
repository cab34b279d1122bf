//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

use std::error::Error as _;

use log::error;
use tilecache_cli::CliError;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match tilecache_cli::run() {
        Ok(()) => {}
        Err(CliError::ArgumentParsing(err)) => err.exit(),
        Err(err) => {
            error!("{err}");
            let mut source = err.source();
            while let Some(cause) = source {
                error!("caused by: {cause}");
                source = cause.source();
            }
            std::process::exit(1);
        }
    }
}
