//! task-mermaid - Convert task tables into mermaid dependency diagrams

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = task_mermaid::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
