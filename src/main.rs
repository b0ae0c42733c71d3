/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use arbiter::{Engine, EngineCommand};
use clap::{error::ErrorKind, Parser};
use tracing_subscriber::EnvFilter;

fn main() {
    // Logs go to stderr so that stdout only carries command output
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut engine = Engine::new();

    // Skip the executable name
    let args = std::env::args().skip(1).collect::<Vec<_>>();

    // Commands given on the command line run before any typed ones.
    // Find the longest prefix of the remaining arguments that parses as one command.
    let mut arg_idx = args.len();
    let mut parsed_idx = 0;
    while parsed_idx < arg_idx {
        let slice = &args[parsed_idx..arg_idx];

        match EngineCommand::try_parse_from(slice) {
            Ok(cmd) => {
                if let Err(e) = engine.send_command(cmd) {
                    eprintln!("{e:#}");
                }
                parsed_idx = arg_idx;
                arg_idx = args.len();
            }

            // Edge case: `--help` and `--version` are both "error" cases according to Clap
            Err(e)
                if matches!(e.kind(), ErrorKind::DisplayHelp)
                    || matches!(e.kind(), ErrorKind::DisplayVersion) =>
            {
                println!("{e}");
                parsed_idx = arg_idx;
                arg_idx = args.len();
            }

            // A single argument that isn't a command can't be fixed by shortening the slice
            Err(e) if arg_idx - parsed_idx == 1 => {
                eprintln!("Skipping {slice:?}: {e}");
                parsed_idx += 1;
                arg_idx = args.len();
            }

            Err(_) => arg_idx -= 1,
        }
    }

    if let Err(e) = engine.run() {
        eprintln!("{} encountered an error: {e:#}", engine.name());
    }
}
