//! Sunglasses CLI - data set tools for the storefront.
//!
//! # Usage
//!
//! ```bash
//! # Validate the bundled data set
//! sg-cli check
//!
//! # Validate a data directory
//! sg-cli check --data-dir ./data
//!
//! # List brands with their products
//! sg-cli brands
//!
//! # Replace plaintext passwords in users.json with Argon2 hashes
//! sg-cli hash-passwords --data-dir ./data
//! ```
//!
//! `--data-dir` defaults to `SUNGLASSES_DATA_DIR` (also read from `.env`).

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "sg-cli")]
#[command(author, version, about = "Sunglasses storefront data tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load and validate a data set, then print its row counts
    Check {
        /// Directory with brands.json, products.json and users.json
        /// (bundled data when omitted)
        #[arg(short, long, env = "SUNGLASSES_DATA_DIR")]
        data_dir: Option<PathBuf>,
    },
    /// List brands with their products and prices
    Brands {
        /// Directory with brands.json, products.json and users.json
        /// (bundled data when omitted)
        #[arg(short, long, env = "SUNGLASSES_DATA_DIR")]
        data_dir: Option<PathBuf>,
    },
    /// Rewrite users.json, replacing plaintext passwords with Argon2 hashes
    HashPasswords {
        /// Directory holding users.json
        #[arg(short, long, env = "SUNGLASSES_DATA_DIR")]
        data_dir: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Check { data_dir } => {
            commands::data::check(data_dir.as_deref()).await?;
        }
        Commands::Brands { data_dir } => {
            commands::data::brands(data_dir.as_deref()).await?;
        }
        Commands::HashPasswords { data_dir } => {
            commands::passwords::hash_passwords(&data_dir).await?;
        }
    }
    Ok(())
}
