//! Userdeck - Entry Point

// Force-link userdeck-providers to ensure linkme registrations are included
extern crate userdeck_providers;

use clap::Parser;
use userdeck::{Cli, run};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    run(cli).await
}
