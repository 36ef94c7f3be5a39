use clap::Parser;
use gf_core::cli::{run, Cli};
use gf_core::{logging, ExitCode};

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // Help and version go to stdout and are not failures.
            let code = if err.use_stderr() {
                ExitCode::InputError
            } else {
                ExitCode::Safe
            };
            let _ = err.print();
            std::process::exit(code.as_i32());
        }
    };

    logging::init(cli.log_format);
    std::process::exit(run(&cli).as_i32());
}
