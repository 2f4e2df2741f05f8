use clap::{Parser, Subcommand};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

mod domain;
mod application;
mod infrastructure;

use infrastructure::config::Config;
use infrastructure::adapters::ConsoleAdapter;
use application::messaging::{Exit, MessageDispatcher};
use application::services::CommandService;
use domain::entities::Variant;

#[derive(Parser)]
#[command(name = "sample-bot")]
#[command(about = "A line-oriented toy bot driven over stdin/stdout", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file path
    #[arg(short, long, default_value = "config.yaml", global = true)]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Read commands from stdin until quit or end of input (default)
    Run(RunArgs),
    /// List the commands the configured variant understands
    Verbs(RunArgs),
    /// Show version
    Version,
    /// Generate default config
    InitConfig,
}

#[derive(clap::Args, Default)]
struct RunArgs {
    /// Protocol variant (overrides config): counter or plain
    #[arg(long)]
    variant: Option<Variant>,

    /// Seconds reported by the timer (overrides config)
    #[arg(long)]
    timer_seconds: Option<u64>,
}

fn main() {
    // Logs share stderr with the protocol diagnostic, so they stay off unless RUST_LOG asks
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::OFF.into())
                .from_env_lossy(),
        )
        .init();

    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Run(RunArgs::default())) {
        Commands::Run(args) => {
            run_bot(resolve_config(&cli.config, &args));
        }
        Commands::Verbs(args) => {
            list_commands(resolve_config(&cli.config, &args));
        }
        Commands::Version => {
            println!("sample-bot v{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::InitConfig => {
            init_config();
        }
    }
}

/// Defaults, then the config file, then environment, then flags
fn resolve_config(config_path: &str, args: &RunArgs) -> Config {
    let mut config = if std::path::Path::new(config_path).exists() {
        match Config::load(config_path) {
            Ok(mut config) => {
                if let Err(e) = config.apply_env(|key| std::env::var(key).ok()) {
                    tracing::warn!("Ignoring environment override: {}", e);
                }
                config
            }
            Err(e) => {
                tracing::warn!("Failed to load config: {}, using defaults", e);
                Config::load_env()
            }
        }
    } else {
        Config::load_env()
    };

    if let Some(variant) = args.variant {
        config.bot.variant = variant;
    }
    if let Some(seconds) = args.timer_seconds {
        config.session.timer_seconds = seconds;
    }
    config
}

fn build_commands(config: &Config) -> CommandService {
    let mut commands = CommandService::new(config.bot.variant, config.session.timer_seconds);
    commands.register_defaults();
    commands
}

fn run_bot(config: Config) {
    tracing::info!("Starting {} ({} variant)", config.bot.name, config.bot.variant);

    let mut dispatcher = MessageDispatcher::new(build_commands(&config), config.trailer_on_quit());
    let mut bot = ConsoleAdapter::stdio(config.bot.name.clone());

    // Every exit path, the failed one included, ends with status 0
    match dispatcher.run(&mut bot) {
        Exit::Failed(e) => tracing::debug!("Exiting after failure: {}", e),
        exit => tracing::debug!("Exiting after {:?}", exit),
    }
}

fn list_commands(config: Config) {
    let commands = build_commands(&config);
    println!("Commands ({} variant):", config.bot.variant);
    for (name, description) in commands.describe() {
        println!("  {} - {}", name, description);
    }
}

fn init_config() {
    match Config::default().to_yaml() {
        Ok(yaml) => {
            println!("{}", yaml);
            println!("\nSave this to config.yaml and adjust as needed.");
        }
        Err(e) => tracing::error!("{}", e),
    }
}
