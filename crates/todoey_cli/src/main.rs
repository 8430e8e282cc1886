//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `todoey_core` linkage.
//! - Open an in-memory store to confirm schema bootstrap end to end.

use std::process::ExitCode;

fn main() -> ExitCode {
    println!("todoey_core ping={}", todoey_core::ping());
    println!("todoey_core version={}", todoey_core::core_version());

    let conn = match todoey_core::db::open_db_in_memory() {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!("todoey_core db_open=error {err}");
            return ExitCode::FAILURE;
        }
    };
    match todoey_core::db::migrations::current_user_version(&conn) {
        Ok(version) => {
            println!("todoey_core schema_version={version}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("todoey_core schema_version=error {err}");
            ExitCode::FAILURE
        }
    }
}
