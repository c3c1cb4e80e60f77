use clap::Parser;
use schemock::cli::Cli;
use schemock::config::Settings;

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout carries only generated data
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let settings = Settings::new_with_cli(&cli)?;

    let output = schemock::run(&settings, &cli.schema)?;
    println!("{}", output.trim_end());

    Ok(())
}
