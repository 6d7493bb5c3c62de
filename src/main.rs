use std::error::Error;
use std::fs;
use std::io::{self, Read};
use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use buyout_engine::api::{create_router, AppState, CalculationRequest};
use buyout_engine::calculation::evaluate;
use buyout_engine::config::ConfigLoader;
use buyout_engine::models::CalculationInput;

/// Federal buyout versus pension estimator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(name = "buyout-engine")]
struct Cli {
    /// Directory holding metadata.yaml and years/*.yaml
    #[arg(short, long, default_value = "./config/federal", env = "BUYOUT_CONFIG_DIR")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP API
    Serve(ServeArgs),
    /// Evaluate one JSON request and print the result
    Evaluate(EvaluateArgs),
}

#[derive(Args, Debug)]
struct ServeArgs {
    /// Address to bind
    #[arg(long, default_value = "0.0.0.0", env = "BUYOUT_BIND")]
    bind: String,

    /// Port to listen on
    #[arg(short, long, default_value_t = 8080, env = "PORT")]
    port: u16,
}

#[derive(Args, Debug)]
struct EvaluateArgs {
    /// Request file; reads stdin when omitted
    input: Option<PathBuf>,

    /// Data year to evaluate against; latest when omitted
    #[arg(short, long)]
    year: Option<i32>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let loader = ConfigLoader::load(&cli.config)?;

    match cli.command {
        Command::Serve(args) => serve(loader, args).await,
        Command::Evaluate(args) => evaluate_once(&loader, args),
    }
}

async fn serve(loader: ConfigLoader, args: ServeArgs) -> Result<(), Box<dyn Error>> {
    let addr: SocketAddr = format!("{}:{}", args.bind, args.port).parse()?;
    let years: Vec<i32> = loader
        .catalog()
        .versions()
        .iter()
        .map(|version| version.data_year)
        .collect();

    let app = create_router(AppState::new(loader));
    let listener = TcpListener::bind(addr).await?;
    info!(address = %addr, data_years = ?years, "Buyout engine listening");

    axum::serve(listener, app).await?;
    Ok(())
}

fn evaluate_once(loader: &ConfigLoader, args: EvaluateArgs) -> Result<(), Box<dyn Error>> {
    let raw = match &args.input {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    let request: CalculationRequest = serde_json::from_str(&raw)?;
    let input = CalculationInput::try_from(&request)?;
    let config = loader.resolve(args.year)?;

    let result = evaluate(&input, config);
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
