pub mod commands;
pub mod logging;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use commands::halal::HalalTarget;

#[derive(Debug, Parser)]
#[command(
    name = "sufra",
    about = "Sufra recipe analytics CLI",
    long_about = "Manage the saved-recipe store, compute cooking analytics, and run halal checks.",
    after_help = "Examples:\n  sufra migrate\n  sufra analytics --user sample-cook --advanced\n  sufra halal --ingredient \"pork belly\""
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Apply pending storage migrations and return structured status output")]
    Migrate,
    #[command(about = "Load the deterministic demo profile and sample account")]
    Seed,
    #[command(about = "Compute cooking analytics for a user from the saved-recipe store")]
    Analytics {
        #[arg(long, help = "User id whose favorites and collections are analysed")]
        user: String,
        #[arg(long, help = "Read the shared demo profile instead of the user's own keys")]
        demo: bool,
        #[arg(long, help = "Include achievement progress and recommendations")]
        advanced: bool,
    },
    #[command(about = "Check an ingredient or a meal record against the halal blocklist")]
    Halal {
        #[arg(
            long,
            conflicts_with = "file",
            required_unless_present = "file",
            help = "Single ingredient name to check"
        )]
        ingredient: Option<String>,
        #[arg(long, help = "Path to a meal record JSON file")]
        file: Option<PathBuf>,
    },
    #[command(about = "Inspect effective configuration values with source attribution")]
    Config,
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();
    logging::init_from_env();

    let result = match cli.command {
        Command::Migrate => commands::migrate::run(),
        Command::Seed => commands::seed::run(),
        Command::Analytics { user, demo, advanced } => {
            commands::analytics::run(&user, demo, advanced)
        }
        Command::Halal { ingredient, file } => {
            let target = match (ingredient, file) {
                (Some(term), _) => HalalTarget::Ingredient(term),
                (None, Some(path)) => HalalTarget::File(path),
                (None, None) => HalalTarget::Ingredient(String::new()),
            };
            commands::halal::run(target)
        }
        Command::Config => {
            commands::CommandResult { exit_code: 0, output: commands::config::run() }
        }
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
