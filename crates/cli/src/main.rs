use std::process::ExitCode;

fn main() -> ExitCode {
    bridget_cli::run()
}
