mod commands;
mod output;

use anyhow::Result;
use breeders_lib::brapi_api::{BASE_URL_ENV, DEFAULT_BASE_URL};
use breeders_lib::Client;
use clap::{Parser, Subcommand};

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "breeders")]
#[command(about = "Browse breeding programs on a BrAPI v2 server")]
struct Cli {
    /// Output format: table, markdown, csv or json
    #[arg(long, default_value = "table", global = true)]
    output: String,

    /// Base URL of the BrAPI server
    #[arg(long, env = BASE_URL_ENV, default_value = DEFAULT_BASE_URL, global = true)]
    base_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List programs or look one up by id
    Programs(Box<commands::programs::ProgramsArgs>),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("breeders_cli=info".parse()?)
                .add_directive("breeders_lib=info".parse()?)
                .add_directive("brapi_api=warn".parse()?),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let format = OutputFormat::parse(&cli.output);
    let client = Client::with_base_url(&cli.base_url);
    tracing::debug!("using BrAPI server {}", client.base_url());

    match &cli.command {
        Commands::Programs(args) => commands::programs::run(args.as_ref(), &client, &format).await?,
    }

    Ok(())
}
