use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "nocrastination-cli", version, about = "nocrastination CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Synthetic data generation
    Seed {
        #[command(subcommand)]
        action: commands::seed::SeedAction,
    },
    /// User management
    User {
        #[command(subcommand)]
        action: commands::user::UserAction,
    },
    /// Task management
    Task {
        #[command(subcommand)]
        action: commands::task::TaskAction,
    },
    /// Pomodoro session management
    Session {
        #[command(subcommand)]
        action: commands::session::SessionAction,
    },
    /// Daily productivity statistics
    Stats {
        #[command(subcommand)]
        action: commands::stats::StatsAction,
    },
    /// User profile management
    Profile {
        #[command(subcommand)]
        action: commands::profile::ProfileAction,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Seed { action } => commands::seed::run(action),
        Commands::User { action } => commands::user::run(action),
        Commands::Task { action } => commands::task::run(action),
        Commands::Session { action } => commands::session::run(action),
        Commands::Stats { action } => commands::stats::run(action),
        Commands::Profile { action } => commands::profile::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
