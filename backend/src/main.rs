//! NeuroScan CLI - gateway server and prediction client
//!
//! ```bash
//! neuroscan serve --upstream http://localhost:8501    # Start the gateway (port 8000)
//! neuroscan predict scan.png                          # Classify one image
//! ```

use clap::{Parser, Subcommand};
use neuroscan::config::{DEFAULT_PORT, DEFAULT_STATIC_DIR};
use neuroscan::{client, PredictOutcome, ServerConfig};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "neuroscan")]
#[command(about = "Brain MRI classification gateway", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start HTTP server
    Serve {
        /// Port to listen on
        #[arg(short, long, env = "NEUROSCAN_PORT", default_value_t = DEFAULT_PORT)]
        port: u16,

        /// Base URL of the prediction service
        #[arg(short, long, env = "NEUROSCAN_UPSTREAM")]
        upstream: Option<String>,

        /// Directory holding the built frontend
        #[arg(long, env = "NEUROSCAN_STATIC_DIR", default_value = DEFAULT_STATIC_DIR)]
        static_dir: PathBuf,
    },

    /// Classify one image through a prediction endpoint
    Predict {
        /// Image file (JPG or PNG)
        input: PathBuf,

        /// Prediction endpoint URL
        #[arg(short, long, default_value = client::DEFAULT_ENDPOINT)]
        endpoint: String,
    },
}

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve {
            port,
            upstream,
            static_dir,
        } => cmd_serve(port, upstream, static_dir).await,

        Commands::Predict { input, endpoint } => cmd_predict(&input, &endpoint).await,
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

async fn cmd_serve(
    port: u16,
    upstream: Option<String>,
    static_dir: PathBuf,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::new(port, upstream, static_dir)?;
    neuroscan::server::start_server(config).await?;
    Ok(())
}

async fn cmd_predict(input: &Path, endpoint: &str) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("📄 Analyzing: {}", input.display());

    let outcome = client::predict_file(input, endpoint).await?;
    println!("{}", outcome.headline());

    match outcome {
        PredictOutcome::Classified { confidence, .. } => {
            println!("Confidence: {:.2}%", confidence);
            Ok(())
        }
        PredictOutcome::Rejected(_) => std::process::exit(1),
    }
}
