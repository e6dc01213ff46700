//! Arlo Downloader - CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use arlo_downloader::{
    api::ArloApi,
    cli::Args,
    config::{validate_config, Config},
    download::{download_library, RunSummary},
    error::{exit_codes, Result},
    library::RecordingLibrary,
    output::{
        create_spinner, print_banner, print_config_summary, print_error, print_info,
        print_run_summary, print_success, print_warning,
    },
};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(_) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(e) => {
            print_error(&format!("{}", e));
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

async fn run() -> Result<RunSummary> {
    let args = Args::parse();

    // Set up logging
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(args.log_level()));
    fmt().with_env_filter(filter).with_target(false).init();

    print_banner();

    // Load configuration
    let config_path = args.config.clone();
    let mut config = if config_path.exists() {
        Config::load(&config_path)?
    } else {
        print_warning(&format!(
            "Configuration file not found: {}",
            config_path.display()
        ));
        print_info("Using default configuration with CLI arguments");
        Config::default()
    };

    args.merge_into_config(&mut config);
    validate_config(&config)?;
    print_config_summary(&config);

    let api = ArloApi::new()?;

    let spinner = create_spinner("Logging in to Arlo...");
    let session = api
        .login(&config.account.email, &config.account.password)
        .await;
    spinner.finish_and_clear();
    let session = session?;
    print_success(&format!("Logged in as {}", config.account.email));

    let summary = download_library(
        &api,
        &session,
        &config,
        api.http_client().clone(),
        chrono::Local::now(),
    )
    .await?;

    print_run_summary(&summary);
    Ok(summary)
}
