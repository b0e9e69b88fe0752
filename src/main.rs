use std::path::PathBuf;

use clap::{Parser, Subcommand};

use churn_pipeline::pipeline::{prediction, training};
use churn_pipeline::utils::logger;
use churn_pipeline::AppConfig;

#[derive(Parser, Debug)]
#[command(name = "churn-pipeline")]
#[command(about = "Customer churn prediction pipeline", version)]
struct Cli {
    /// Path to YAML configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the training pipeline end to end
    Train,
    /// Score the configured dataset with the stored model
    Predict,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // 載入並驗證設定
    let config = match AppConfig::from_file(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "❌ Failed to load config file '{}': {}",
                cli.config.display(),
                e
            );
            eprintln!("💡 Make sure the file exists and is valid YAML");
            std::process::exit(1);
        }
    };

    // 初始化日誌
    let mut settings = config.log_settings();
    if cli.verbose {
        settings.level = "debug".to_string();
    }
    logger::init(&settings)?;

    tracing::info!("Starting churn-pipeline CLI");
    if cli.verbose {
        tracing::debug!("CLI args: {:?}", cli);
    }

    let result = match cli.command {
        Command::Train => training::run(&config),
        Command::Predict => prediction::run(&config),
    };

    match result {
        Ok(()) => {
            tracing::info!("✅ Pipeline completed successfully!");
            println!("✅ Pipeline completed successfully!");
        }
        Err(e) => {
            tracing::error!("❌ Pipeline failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}
