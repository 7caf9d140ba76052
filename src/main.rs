use clap::Parser;
use contest_calendar::cli::Cli;
use contest_calendar::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Fails only if a provider is already installed.
    let _ = rustls::crypto::ring::default_provider().install_default();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Bad arguments end the run like any other error; --help and --version
    // also land here.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return;
        }
    };

    let result = match Config::build(&cli) {
        Ok(config) => contest_calendar::run(config).await.map(|_| ()),
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        tracing::error!("Critical error: {e}");
    }
}
