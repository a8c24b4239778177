use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use icon_bundle::cli::Cli;
use icon_bundle::config::RunConfig;
use icon_bundle::pipeline::IconBuildPipeline;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let cwd = std::env::current_dir().context("Failed to read the working directory")?;
    let config = RunConfig::from_cli(&cli, &cwd)?;

    let report = IconBuildPipeline::default().run(&config).await?;

    println!(
        "{} Icon bundle written to {}",
        "✓".green(),
        report.layout.base.display()
    );
    Ok(())
}
