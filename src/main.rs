// svnwrap-rs: Subversion command wrapper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> EditorProxy(files) --> run_editor_proxy_command
//!              --> Wrapper(cli) --> Logging --> run_wrapper_command
//! client exit code relayed; wrapper failures exit with WRAPPER_FAILURE
//! ```

use std::process::ExitCode;

use svnwrap_rs::cli::{self, EntryPoint};
use svnwrap_rs::cmd::{run_editor_proxy_command, run_wrapper_command};
use svnwrap_rs::error::WRAPPER_FAILURE;
use svnwrap_rs::logging::init_logging;

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> ExitCode {
    let entry = match cli::parse() {
        Ok(entry) => entry,
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(WRAPPER_FAILURE);
        }
    };

    let result = match entry {
        EntryPoint::EditorProxy(files) => run_editor_proxy_command(files).await,
        EntryPoint::Wrapper(cli) => {
            let _log_guard = match init_logging(&cli.global.log_config()) {
                Ok(guard) => guard,
                Err(e) => {
                    eprintln!("svnwrap: failed to initialize logging: {e}");
                    return ExitCode::from(WRAPPER_FAILURE);
                }
            };
            run_wrapper_command(&cli).await
        }
    };

    match result {
        Ok(code) => ExitCode::from(u8::try_from(code).unwrap_or(WRAPPER_FAILURE)),
        Err(e) => {
            eprintln!("svnwrap: {e:#}");
            ExitCode::from(WRAPPER_FAILURE)
        }
    }
}
