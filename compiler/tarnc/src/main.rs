//! Tarn command-line runner.

use std::process::ExitCode;

use tarnc::commands::{check_file, run_file, Options};

fn main() -> ExitCode {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();
    let Some(command) = args.get(1) else {
        print_usage();
        return ExitCode::FAILURE;
    };

    match command.as_str() {
        "run" | "check" => {
            let options = match Options::parse(&args[2..]) {
                Ok(options) => options,
                Err(message) => {
                    eprintln!("error: {message}");
                    eprintln!("Usage: tarn {command} <file.tarn> [--sdk <dir>]");
                    return ExitCode::FAILURE;
                }
            };
            if command == "run" {
                run_file(&options)
            } else {
                check_file(&options)
            }
        }
        "help" | "--help" | "-h" => {
            print_usage();
            ExitCode::SUCCESS
        }
        "version" | "--version" | "-V" => {
            println!("tarn {}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        _ => {
            // A bare path runs the file.
            let is_source = std::path::Path::new(command)
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case(tarnc::SOURCE_EXTENSION));
            if is_source {
                match Options::parse(&args[1..]) {
                    Ok(options) => run_file(&options),
                    Err(message) => {
                        eprintln!("error: {message}");
                        ExitCode::FAILURE
                    }
                }
            } else {
                eprintln!("Unknown command: {command}");
                eprintln!();
                print_usage();
                ExitCode::FAILURE
            }
        }
    }
}

/// Install a hierarchical subscriber when `RUST_LOG` is set.
fn init_tracing() {
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let Ok(filter) = EnvFilter::try_from_default_env() else {
        return;
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_tree::HierarchicalLayer::new(2)
                .with_targets(true)
                .with_writer(std::io::stderr),
        )
        .init();
    tracing::debug!("tracing initialized");
}

fn print_usage() {
    println!("Tarn interpreter");
    println!();
    println!("Usage: tarn <command> [options]");
    println!();
    println!("Commands:");
    println!("  run <file.tarn>      Check and run a program");
    println!("  check <file.tarn>    Check a program without running it");
    println!("  help                 Show this help message");
    println!("  version              Show version information");
    println!();
    println!("Options:");
    println!("  --sdk <dir>          Import every .tarn file in <dir> first");
    println!("  --fail-fast          Stop at the first runtime fault");
    println!("  --max-depth <n>      Limit nested calls (default 1024)");
    println!();
    println!("Set RUST_LOG (e.g. RUST_LOG=tarn_eval=debug) to trace the pipeline.");
}
