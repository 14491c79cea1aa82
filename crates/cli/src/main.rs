use std::process::ExitCode;

fn main() -> ExitCode {
    sufra_cli::run()
}
