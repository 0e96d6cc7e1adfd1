//! twirl - animated console spinners driven by a JSON style table.
//!
//! This is the main entry point for the twirl CLI tool.

use clap::Parser;
use twirl::cli::{handle_result, Cli, CliResult, Commands, DemoCommand};

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    twirl::logging::init(cli.verbose);

    let styles = cli.styles.as_deref();
    let result: CliResult = match cli.command {
        // No subcommand provided - run the demo with defaults
        None => DemoCommand::default().execute(styles),
        Some(cmd) => match cmd {
            Commands::Demo(c) => c.execute(styles),
            Commands::List(c) => c.execute(styles),
            Commands::Completions(c) => c.execute(),
        },
    };

    handle_result(result)
}
