use apkfetch_core::logging;

mod cli;

use crate::cli::CliCommand;

fn main() {
    // Log file when possible, stderr otherwise.
    let log_target = logging::init();

    if let Err(err) = CliCommand::run_from_args(&log_target) {
        eprintln!("apkfetch error: {:#}", err);
        std::process::exit(1);
    }
}
