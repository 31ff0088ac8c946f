use clap::{Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod commands;

#[derive(Parser)]
#[command(name = "liftquest", version, about = "LiftQuest CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// User registration and overview
    User {
        #[command(subcommand)]
        action: commands::user::UserAction,
    },
    /// Log and browse workouts
    Workout {
        #[command(subcommand)]
        action: commands::workout::WorkoutAction,
    },
    /// Direct body-part progression
    Progress {
        #[command(subcommand)]
        action: commands::progress::ProgressAction,
    },
    /// Grade a strength metric without recording it
    Grade(commands::grade::GradeArgs),
    /// Recommend the next session for an exercise
    Recommend(commands::recommend::RecommendArgs),
    /// Skill tree
    Skills {
        #[command(subcommand)]
        action: commands::skills::SkillsAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing() {
    // stdout carries JSON output, so logs go to stderr
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "liftquest=info,liftquest_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::User { action } => commands::user::run(action),
        Commands::Workout { action } => commands::workout::run(action),
        Commands::Progress { action } => commands::progress::run(action),
        Commands::Grade(args) => commands::grade::run(args),
        Commands::Recommend(args) => commands::recommend::run(args),
        Commands::Skills { action } => commands::skills::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
