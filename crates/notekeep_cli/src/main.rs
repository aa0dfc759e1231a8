//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `notekeep_core` linkage.
//! - Open the configured store and print deterministic status lines.

use notekeep_core::{core_version, init_logging_from, open_manager, ping, CoreConfig};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("notekeep_core ping={}", ping());
    println!("notekeep_core version={}", core_version());

    let config = match CoreConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("notekeep config error={err}");
            return ExitCode::FAILURE;
        }
    };
    if let Err(err) = init_logging_from(&config) {
        eprintln!("notekeep logging error={err}");
    }

    match open_manager(&config) {
        Ok(manager) => {
            let stats = manager.stats();
            log::info!("event=cli_probe module=cli status=ok notes={}", stats.note_count);
            println!("notekeep storage={}", manager.storage_location());
            println!("notekeep notes={}", stats.note_count);
            println!("notekeep characters={}", stats.total_characters);
            println!("notekeep draft_pending={}", manager.has_pending_draft());
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("notekeep storage error={err}");
            ExitCode::FAILURE
        }
    }
}
