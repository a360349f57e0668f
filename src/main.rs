use anyhow::Context;
use clap::Parser;
use qr_scan::cli::Cli;
use qr_scan::config::Config;
use qr_scan::ui;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = Config::load().context("load config")?;
    cli.apply(&mut config);
    config.validate()?;

    if cli.show_config {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }
    if cli.save_config {
        let path = config.save().context("save config")?;
        info!(path = %path.display(), "config saved");
        return Ok(());
    }

    info!("=== QR Code & Barcode Scanner ===");
    ui::run(config)?;
    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
