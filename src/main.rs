mod cli;
mod fetch;
mod parser;
mod report;
mod scrape;
mod settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    cli::run(std::env::args_os()).await?;
    Ok(())
}
