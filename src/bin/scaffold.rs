use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use churn_pipeline::scaffold;

#[derive(Parser, Debug)]
#[command(name = "churn-scaffold")]
#[command(about = "Generate the directory skeleton for a churn project")]
struct Args {
    /// Directory to generate the skeleton in
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Project name used in seeded files
    #[arg(long, default_value = "churn-pipeline")]
    project: String,

    /// Show what would be created without touching the filesystem
    #[arg(long)]
    dry_run: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // 產生器自備簡單的主控台日誌
    let level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .compact()
        .init();

    tracing::info!("🚀 Scaffolding '{}' under {}", args.project, args.root.display());

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No files will be created");
        println!("🔍 Dry run, skeleton for '{}':", args.project);
        for path in scaffold::skeleton(&args.project) {
            println!("  {}", args.root.join(path).display());
        }
        return Ok(());
    }

    match scaffold::create_project_structure(&args.root, &args.project) {
        Ok(report) => {
            tracing::info!("✅ Project skeleton ready under {}", args.root.display());
            println!("✅ Project skeleton ready under {}", args.root.display());
            println!(
                "📁 {} files created, {} already in place",
                report.created.len(),
                report.skipped.len()
            );
        }
        Err(e) => {
            eprintln!("❌ Scaffold failed: {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}
