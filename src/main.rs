//! Disguise Bench Plotter - Main CLI Application
//!
//! Turns benchmark result files from a privacy-disguise system into
//! summary statistics and paper-ready figures.

use clap::Parser;
use disguise_bench_plotter::{
    app::App,
    cli::Cli,
    error::AppError,
    PKG_NAME, VERSION,
};
use std::process;

fn main() {
    // Set up better panic handling
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Application panic: {}", panic_info);
        process::exit(1);
    }));

    // Parse command line arguments
    let cli = Cli::parse();

    if let Err(message) = cli.validate() {
        eprintln!("Error: {}", message);
        process::exit(1);
    }

    if cli.should_show_topic_help() {
        println!("{}", cli.display_help());
        return;
    }

    if let Err(e) = run_application(cli) {
        eprintln!("Error: {}", e);

        // Print suggestions for common errors
        print_error_suggestions(&e);

        process::exit(e.exit_code());
    }
}

/// Main application logic
fn run_application(cli: Cli) -> disguise_bench_plotter::Result<()> {
    if cli.debug {
        println!("{} v{} (built {})", PKG_NAME, VERSION, env!("BUILD_TIME"));
        if let Some(commit) = option_env!("GIT_COMMIT") {
            println!("Commit: {}", commit);
        }
        println!("Debug mode enabled");
        println!();
    }

    let app = App::from_cli(&cli)?;
    app.run(&cli)
}

/// Print helpful suggestions for common errors
fn print_error_suggestions(error: &AppError) {
    match error {
        AppError::Config(_) | AppError::Validation(_) => {
            eprintln!();
            eprintln!("Configuration help:");
            eprintln!("  - Check your .env file and DBP_* environment variables");
            eprintln!("  - Units must be one of: us, ms, s");
            eprintln!("  - Output files must end in .svg or .png");
        }
        AppError::Parse(_) => {
            eprintln!();
            eprintln!("Input help:");
            eprintln!("  - Check that the file matches the selected format (--format)");
            eprintln!("  - See 'dbp --help-topic formats' for the recognized layouts");
        }
        AppError::Discovery(_) => {
            eprintln!();
            eprintln!("Discovery help:");
            eprintln!("  - Quote glob patterns so the shell does not expand them");
            eprintln!("  - Scaling needs user counts in filenames or --x-values");
        }
        _ => {}
    }
}
