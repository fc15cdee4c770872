use clap::Parser;
use log::info;
use std::process;

use dash_serve::config::{Args, ServerConfig};
use dash_serve::constants::DEFAULT_LOG_FILTER;
use dash_serve::core::run;
use dash_serve::security::log_exposure_warnings;

#[tokio::main]
async fn main() {
    // Initialize logging (RUST_LOG overrides the default filter)
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(DEFAULT_LOG_FILTER),
    )
    .init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        // --help and --version print to stdout and exit 0
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            let _ = e.print();
            process::exit(1);
        }
    };

    let config = match ServerConfig::from_args(args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(e.exit_code());
        }
    };

    info!(
        "Configuration: host={}, port={}, directory={}",
        config.host,
        config.port,
        config.directory.display()
    );
    log_exposure_warnings(&config);

    if let Err(e) = run(config).await {
        eprintln!("{}", e);
        process::exit(e.exit_code());
    }
}
