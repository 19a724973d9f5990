use clap::Parser;
use emoji_dataset::cli::EmojiFetchArgs;
use emoji_dataset::fetch::{Config, Fetcher};
use miette::Result;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let args = EmojiFetchArgs::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .with_env_filter(
            EnvFilter::try_from_env("EMOJI_FETCH_LOG")
                .unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let mut config = Config::load(&args.config)?;
    if let Some(output) = args.output {
        config.output.path = output;
    }
    if args.pretty {
        config.output.pretty = true;
    }

    let output = config.output.clone();
    let fetcher = Fetcher::new(config)?;
    let dataset = fetcher.build().await?;

    dataset.write_to(&output.path, output.pretty)?;
    tracing::info!(path = %output.path.display(), "wrote {} emoji", dataset.emoji.len());

    Ok(())
}
